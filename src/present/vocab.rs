//! Label vocabularies: a short one for popups and a descriptive one for the attribute table.

use serde::Serialize;

use crate::{
    common::{format_fixed, format_grouped, NumberLocale},
    layer::{AttrValue, Attribute},
};

/// Attributes shown in feature popups, in display order.
pub const POPUP_ATTRIBUTES: [Attribute; 9] = [
    Attribute::SectorCode,
    Attribute::Situation,
    Attribute::Neighborhood,
    Attribute::AreaKm2,
    Attribute::Residents,
    Attribute::Households,
    Attribute::PrivateHouseholds,
    Attribute::ResidentsPerHousehold,
    Attribute::OccupiedHouseholds,
];

pub fn popup_label(attr: Attribute) -> Option<&'static str> {
    Some(match attr {
        Attribute::SectorCode => "Setor",
        Attribute::Situation => "Situação",
        Attribute::Neighborhood => "Bairro",
        Attribute::AreaKm2 => "Área (km²)",
        Attribute::Residents => "Pessoas",
        Attribute::Households => "Domicílios",
        Attribute::PrivateHouseholds => "Domicílios particulares",
        Attribute::ResidentsPerHousehold => "Moradores por domicílio",
        Attribute::OccupiedHouseholds => "Domicílios ocupados",
        Attribute::District | Attribute::CollectiveHouseholds | Attribute::ImputedShare => return None,
    })
}

pub fn table_label(attr: Attribute) -> &'static str {
    match attr {
        Attribute::SectorCode => "Código do setor censitário",
        Attribute::Situation => "Situação do setor (urbana/rural)",
        Attribute::Neighborhood => "Nome do bairro",
        Attribute::District => "Nome do distrito",
        Attribute::AreaKm2 => "Área do setor (km²)",
        Attribute::Residents => "Total de pessoas",
        Attribute::Households => "Total de domicílios",
        Attribute::PrivateHouseholds => "Total de domicílios particulares",
        Attribute::CollectiveHouseholds => "Total de domicílios coletivos",
        Attribute::ResidentsPerHousehold => "Média de moradores em domicílios particulares permanentes ocupados",
        Attribute::ImputedShare => "Percentual de domicílios particulares permanentes ocupados com imputação",
        Attribute::OccupiedHouseholds => "Domicílios particulares permanentes ocupados",
    }
}

/// One labelled choice offered by the UI controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VocabularyEntry {
    pub attribute: Attribute,
    pub label: &'static str,
}

/// Choices for the attribute checkboxes and the thematic dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vocabulary {
    /// Popup attributes, in display order, with their short labels.
    pub popup: Vec<VocabularyEntry>,
    /// Numeric attributes, with their table labels.
    pub thematic: Vec<VocabularyEntry>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let popup = POPUP_ATTRIBUTES.into_iter()
            .filter_map(|attribute| Some(VocabularyEntry { attribute, label: popup_label(attribute)? }))
            .collect();
        let thematic = Attribute::thematic()
            .map(|attribute| VocabularyEntry { attribute, label: table_label(attribute) })
            .collect();
        Self { popup, thematic }
    }
}

/// Display text of a value, `None` when absent.
///
/// Numbers on fixed-precision fields use that precision; every other number
/// is locale-grouped. Text is shown as is.
pub fn format_value(attr: Option<Attribute>, value: &AttrValue, locale: &NumberLocale) -> Option<String> {
    match value {
        AttrValue::Absent => None,
        AttrValue::Number(n) => Some(match attr.and_then(|attr| attr.precision()) {
            Some(decimals) => format_fixed(*n, decimals),
            None => format_grouped(*n, locale),
        }),
        AttrValue::Text(text) => Some(text.to_string()),
    }
}
