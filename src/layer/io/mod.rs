mod geojson;

pub(crate) use geojson::{read_features, write_feature_collection};
