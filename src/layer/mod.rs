mod attribute;
mod descriptor;
mod feature;
mod id;
mod io;
mod loader;
mod source;

pub use attribute::{AttrKey, AttrValue, Attribute, Properties};
pub use descriptor::LayerDescriptor;
pub use feature::{Feature, FeatureCollection};
pub use id::LayerId;
pub use loader::{LayerLoader, Registry};
#[cfg(feature = "download")]
pub use source::HttpSource;
pub use source::{DirSource, LayerSource};
