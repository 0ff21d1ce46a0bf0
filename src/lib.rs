#![doc = "Censomap public API"]
mod common;
mod config;
mod geom;
mod layer;
mod present;
mod session;
mod style;

#[doc(inline)]
pub use common::{format_fixed, format_grouped, FetchError, LoadError, NumberLocale, ReprojectError};

#[doc(inline)]
pub use config::{BasemapDescriptor, HomeView, ViewerConfig};

#[doc(inline)]
pub use geom::{needs_reprojection, Reprojector, SOURCE_PROJ4, TARGET_PROJ4};

#[doc(inline)]
pub use layer::{
    AttrKey, AttrValue, Attribute, DirSource, Feature, FeatureCollection, LayerDescriptor, LayerId,
    LayerLoader, LayerSource, Properties, Registry,
};

#[cfg(feature = "download")]
#[doc(inline)]
pub use layer::HttpSource;

#[doc(inline)]
pub use present::{
    format_value, popup_label, table_label, AttributeTable, Legend, LegendEntry, Popup, Selection,
    Vocabulary, VocabularyEntry, MISSING_VALUE, POPUP_ATTRIBUTES,
};

#[doc(inline)]
pub use session::{Command, RenderUpdate, Session, Viewer, ZoomStep};

#[doc(inline)]
pub use style::{classify, color_for_value, style_for, Classification, Rgb, Style, DEFAULT_RAMP};
