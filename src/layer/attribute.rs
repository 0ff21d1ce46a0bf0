use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Closed vocabulary of census-sector attributes the viewer knows how to label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "CD_SETOR")]
    SectorCode,
    #[serde(rename = "SITUACAO")]
    Situation,
    #[serde(rename = "NM_BAIRRO")]
    Neighborhood,
    #[serde(rename = "NM_DIST")]
    District,
    #[serde(rename = "AREA_KM2")]
    AreaKm2,
    #[serde(rename = "v0001")]
    Residents,
    #[serde(rename = "v0002")]
    Households,
    #[serde(rename = "v0003")]
    PrivateHouseholds,
    #[serde(rename = "v0004")]
    CollectiveHouseholds,
    #[serde(rename = "v0005")]
    ResidentsPerHousehold,
    #[serde(rename = "v0006")]
    ImputedShare,
    #[serde(rename = "v0007")]
    OccupiedHouseholds,
}

impl Attribute {
    pub const ALL: [Attribute; 12] = [
        Attribute::SectorCode,
        Attribute::Situation,
        Attribute::Neighborhood,
        Attribute::District,
        Attribute::AreaKm2,
        Attribute::Residents,
        Attribute::Households,
        Attribute::PrivateHouseholds,
        Attribute::CollectiveHouseholds,
        Attribute::ResidentsPerHousehold,
        Attribute::ImputedShare,
        Attribute::OccupiedHouseholds,
    ];

    /// Property key as it appears in the GeoJSON documents.
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::SectorCode => "CD_SETOR",
            Attribute::Situation => "SITUACAO",
            Attribute::Neighborhood => "NM_BAIRRO",
            Attribute::District => "NM_DIST",
            Attribute::AreaKm2 => "AREA_KM2",
            Attribute::Residents => "v0001",
            Attribute::Households => "v0002",
            Attribute::PrivateHouseholds => "v0003",
            Attribute::CollectiveHouseholds => "v0004",
            Attribute::ResidentsPerHousehold => "v0005",
            Attribute::ImputedShare => "v0006",
            Attribute::OccupiedHouseholds => "v0007",
        }
    }

    pub fn from_key(key: &str) -> Option<Attribute> {
        Self::ALL.into_iter().find(|attr| attr.key() == key)
    }

    /// Numeric attributes are the ones offered for thematic classification.
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            Attribute::SectorCode | Attribute::Situation | Attribute::Neighborhood | Attribute::District
        )
    }

    /// Fixed number of decimals, for fields that are not locale-grouped.
    pub fn precision(&self) -> Option<usize> {
        match self {
            Attribute::AreaKm2 => Some(4),
            Attribute::ResidentsPerHousehold => Some(1),
            _ => None,
        }
    }

    /// Attributes offered in the thematic dropdown.
    pub fn thematic() -> impl Iterator<Item = Attribute> {
        Self::ALL.into_iter().filter(Attribute::is_numeric)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Property key: a known attribute or a raw key outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrKey {
    Known(Attribute),
    Raw(Arc<str>),
}

impl AttrKey {
    pub fn parse(key: &str) -> Self {
        match Attribute::from_key(key) {
            Some(attr) => AttrKey::Known(attr),
            None => AttrKey::Raw(Arc::from(key)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AttrKey::Known(attr) => attr.key(),
            AttrKey::Raw(key) => key,
        }
    }
}

/// Tagged property value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Text(Arc<str>),
    Absent,
}

impl AttrValue {
    /// Numeric view of the value; text counts when it parses as a decimal number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) if n.is_finite() => Some(*n),
            AttrValue::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    #[inline] pub fn is_absent(&self) -> bool { matches!(self, AttrValue::Absent) }
}

static ABSENT: AttrValue = AttrValue::Absent;

/// Ordered property bag of a feature, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(AttrKey, AttrValue)>,
}

impl Properties {
    pub fn new() -> Self { Self::default() }

    /// Insert or replace a property, keeping the first position of the key.
    pub fn insert(&mut self, key: AttrKey, value: AttrValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value of a known attribute; `Absent` when the key is missing.
    pub fn get(&self, attr: Attribute) -> &AttrValue {
        self.entries.iter()
            .find(|(key, _)| *key == AttrKey::Known(attr))
            .map(|(_, value)| value)
            .unwrap_or(&ABSENT)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &(AttrKey, AttrValue)> {
        self.entries.iter()
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl FromIterator<(AttrKey, AttrValue)> for Properties {
    fn from_iter<I: IntoIterator<Item = (AttrKey, AttrValue)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (key, value) in iter { props.insert(key, value) }
        props
    }
}
