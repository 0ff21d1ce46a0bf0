use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one of the viewer's toggle-able data layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LayerId {
    #[serde(rename = "bairros")]
    Bairros,        // Neighborhood polygons
    #[serde(rename = "setores")]
    Setores,        // Census sectors (the only classifiable layer)
    #[serde(rename = "perimetro_urbano")]
    Perimetro,      // Urban/rural boundaries
    #[serde(rename = "deficit_hab")]
    DeficitHab,     // Housing deficit zones, may arrive in UTM 23S
    #[serde(rename = "residencias")]
    Residencias,    // Residence points
}

impl LayerId {
    pub const ALL: [LayerId; 5] = [
        LayerId::Bairros,
        LayerId::Setores,
        LayerId::Perimetro,
        LayerId::DeficitHab,
        LayerId::Residencias,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LayerId::Bairros => "bairros",
            LayerId::Setores => "setores",
            LayerId::Perimetro => "perimetro_urbano",
            LayerId::DeficitHab => "deficit_hab",
            LayerId::Residencias => "residencias",
        }
    }

    pub fn from_str(name: &str) -> Option<LayerId> {
        Self::ALL.into_iter().find(|id| id.to_str() == name)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::LayerId;

    #[test]
    fn names_round_trip() {
        for id in LayerId::ALL {
            assert_eq!(LayerId::from_str(id.to_str()), Some(id));
        }
        assert_eq!(LayerId::from_str("tracts"), None);
    }

    #[test]
    fn serde_uses_file_names() {
        let json = serde_json::to_string(&LayerId::DeficitHab).unwrap();
        assert_eq!(json, "\"deficit_hab\"");
        let id: LayerId = serde_json::from_str("\"perimetro_urbano\"").unwrap();
        assert_eq!(id, LayerId::Perimetro);
    }
}
