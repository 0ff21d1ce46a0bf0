use serde::{Deserialize, Serialize};

use crate::style::Rgb;

use super::LayerId;

/// Static description of a data layer: where it lives and how it is drawn by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub id: LayerId,
    pub path: String,
    pub color: Rgb,
    pub name: String,
}

impl LayerDescriptor {
    pub fn new(id: LayerId, path: impl Into<String>, color: Rgb, name: impl Into<String>) -> Self {
        Self { id, path: path.into(), color, name: name.into() }
    }

    /// Outline color in base styling; neighborhoods are always outlined in black.
    #[inline]
    pub fn stroke_color(&self) -> Rgb {
        match self.id {
            LayerId::Bairros => Rgb::BLACK,
            _ => self.color,
        }
    }

    /// Built-in descriptor table, one entry per [`LayerId`].
    pub fn defaults() -> Vec<LayerDescriptor> {
        LayerId::ALL.into_iter().map(|id| {
            let (color, name) = match id {
                LayerId::Bairros => (Rgb::new(106, 61, 154), "Bairros"),
                LayerId::Setores => (Rgb::new(31, 120, 180), "Setores censitários"),
                LayerId::Perimetro => (Rgb::new(51, 160, 44), "Perímetro urbano/rural"),
                LayerId::DeficitHab => (Rgb::new(227, 26, 28), "Déficit habitacional"),
                LayerId::Residencias => (Rgb::new(255, 127, 0), "Residências"),
            };
            LayerDescriptor::new(id, format!("data/{}.geojson", id.to_str()), color, name)
        }).collect()
    }
}
