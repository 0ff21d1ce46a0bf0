use geo::{Coord, CoordsIter, Geometry};

use serde_json::Value;

use super::{attribute::Properties, io::write_feature_collection, LayerId};

/// A single feature: geometry in lon/lat plus its property bag.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry<f64>,
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Geometry<f64>, properties: Properties) -> Self {
        Self { geometry, properties }
    }

    /// Point features are drawn as circle markers.
    #[inline]
    pub fn is_point(&self) -> bool {
        matches!(self.geometry, Geometry::Point(_))
    }

    /// First coordinate of the geometry, if it has any.
    #[inline]
    pub fn first_coord(&self) -> Option<Coord<f64>> {
        self.geometry.coords_iter().next()
    }
}

/// Immutable, ordered collection of the features of one layer.
#[derive(Debug, Clone)]
pub struct FeatureCollection {
    layer: LayerId,
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(layer: LayerId, features: Vec<Feature>) -> Self {
        Self { layer, features }
    }

    #[inline] pub fn layer(&self) -> LayerId { self.layer }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    #[inline] pub fn features(&self) -> &[Feature] { &self.features }

    #[inline] pub fn get(&self, index: usize) -> Option<&Feature> { self.features.get(index) }

    /// Export as a GeoJSON FeatureCollection; feature ids are collection indices.
    #[inline]
    pub fn to_geojson(&self) -> Value {
        write_feature_collection(self)
    }

    /// Coordinate used to decide whether the collection is in a projected CRS.
    #[inline]
    pub fn sample_coord(&self) -> Option<Coord<f64>> {
        self.features.first().and_then(Feature::first_coord)
    }
}
