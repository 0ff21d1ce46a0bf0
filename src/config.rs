//! Viewer configuration: layers, basemaps, home view, ramp and number locale.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    common::NumberLocale,
    layer::{LayerDescriptor, LayerId},
    style::{Rgb, DEFAULT_RAMP},
};

/// A selectable base tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasemapDescriptor {
    pub id: String,
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl BasemapDescriptor {
    /// Street map, satellite imagery and a light canvas.
    pub fn defaults() -> Vec<BasemapDescriptor> {
        vec![
            BasemapDescriptor {
                id: "osm".into(),
                name: "OpenStreetMap".into(),
                url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
                attribution: "&copy; OpenStreetMap contributors".into(),
                max_zoom: 19,
            },
            BasemapDescriptor {
                id: "satellite".into(),
                name: "Satélite".into(),
                url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}".into(),
                attribution: "Tiles &copy; Esri".into(),
                max_zoom: 18,
            },
            BasemapDescriptor {
                id: "light".into(),
                name: "Claro".into(),
                url_template: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".into(),
                attribution: "&copy; OpenStreetMap contributors &copy; CARTO".into(),
                max_zoom: 20,
            },
        ]
    }
}

/// Map center and zoom restored by the home button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeView {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

impl Default for HomeView {
    fn default() -> Self {
        Self { lat: -22.64, lon: -43.65, zoom: 13 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Prefix joined to every layer path; empty means relative to the page.
    pub data_url: String,
    pub layers: Vec<LayerDescriptor>,
    pub basemaps: Vec<BasemapDescriptor>,
    pub initial_basemap: String,
    pub home: HomeView,
    /// One color per thematic class, ascending.
    pub ramp: Vec<Rgb>,
    pub locale: NumberLocale,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_url: String::new(),
            layers: LayerDescriptor::defaults(),
            basemaps: BasemapDescriptor::defaults(),
            initial_basemap: "osm".into(),
            home: HomeView::default(),
            ramp: DEFAULT_RAMP.to_vec(),
            locale: NumberLocale::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse a (possibly partial) JSON document over the defaults, then validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(json).context("Failed to parse viewer config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ramp.is_empty() {
            bail!("thematic ramp must have at least one color");
        }
        for id in LayerId::ALL {
            if !self.layers.iter().any(|layer| layer.id == id) {
                bail!("layer '{id}' is missing from the layer table");
            }
        }
        if self.basemap(&self.initial_basemap).is_none() {
            bail!("initial basemap '{}' is not configured", self.initial_basemap);
        }
        Ok(())
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn basemap(&self, id: &str) -> Option<&BasemapDescriptor> {
        self.basemaps.iter().find(|basemap| basemap.id == id)
    }
}
