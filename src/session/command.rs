use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::BasemapDescriptor,
    layer::{Attribute, LayerId},
    present::{AttributeTable, Legend, Popup},
    style::Style,
};

/// One user action, as dispatched by the hosting UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    ShowLayer { layer: LayerId },
    HideLayer { layer: LayerId },
    SelectBasemap { basemap: String },
    ToggleAttribute { attribute: Attribute, selected: bool },
    /// Value picked in the thematic dropdown (`None` clears it).
    ChooseThematic { attribute: Option<Attribute> },
    ApplyClassification,
    ResetClassification,
    PointerEnter { layer: LayerId, feature: usize },
    PointerLeave { layer: LayerId, feature: usize },
    Click { layer: LayerId, feature: usize },
    ZoomIn,
    ZoomOut,
    Home,
    OpenInfo,
    CloseInfo,
    CloseTable,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomStep { In, Out }

/// A change the hosting UI must apply to the map surface or the DOM.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderUpdate {
    SetBasemap { basemap: BasemapDescriptor },
    /// Add a layer; `styles[i]` paints feature `i` of `geojson`.
    AddLayer { layer: LayerId, geojson: Value, styles: Vec<Style> },
    RemoveLayer { layer: LayerId },
    Restyle { layer: LayerId, styles: Vec<Style> },
    SetFeatureStyle { layer: LayerId, feature: usize, style: Style },
    ShowPopup { layer: LayerId, feature: usize, popup: Popup, html: String },
    ShowLegend { legend: Legend, html: String },
    ClearLegend,
    ShowTable { table: AttributeTable, html: String },
    HideTable,
    SetApplyEnabled { enabled: bool },
    ResetThematicControls,
    SetLayerChecked { layer: LayerId, checked: bool },
    ShowInfo,
    HideInfo,
    Zoom { step: ZoomStep },
    SetView { lat: f64, lon: f64, zoom: u8 },
    SetLoading { visible: bool },
    /// Blocking notification for the user.
    Notify { message: String },
}
