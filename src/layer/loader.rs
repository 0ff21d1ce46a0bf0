use std::{cell::{Ref, RefCell}, sync::Arc};

use ahash::{AHashMap, AHashSet};
use tracing::{debug, info, warn};

use crate::{common::LoadError, geom::{needs_reprojection, Reprojector}};

use super::{io::read_features, source::LayerSource, Feature, FeatureCollection, LayerDescriptor, LayerId};

/// Session-wide cache of successfully loaded layers.
#[derive(Debug, Default)]
pub struct Registry {
    layers: AHashMap<LayerId, Arc<FeatureCollection>>,
}

impl Registry {
    #[inline]
    pub fn get(&self, id: LayerId) -> Option<Arc<FeatureCollection>> {
        self.layers.get(&id).cloned()
    }

    #[inline] pub fn contains(&self, id: LayerId) -> bool { self.layers.contains_key(&id) }

    #[inline] pub fn len(&self) -> usize { self.layers.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.layers.is_empty() }

    pub(crate) fn insert(&mut self, collection: Arc<FeatureCollection>) {
        self.layers.insert(collection.layer(), collection);
    }
}

/// Fetches, decodes, reprojects (when needed) and caches layers, once per session.
pub struct LayerLoader<S> {
    source: S,
    paths: AHashMap<LayerId, String>,
    registry: RefCell<Registry>,
    pending: RefCell<AHashSet<LayerId>>,
}

impl<S: LayerSource> LayerLoader<S> {
    pub fn new(source: S, layers: &[LayerDescriptor]) -> Self {
        Self {
            source,
            paths: layers.iter().map(|layer| (layer.id, layer.path.clone())).collect(),
            registry: RefCell::new(Registry::default()),
            pending: RefCell::new(AHashSet::new()),
        }
    }

    /// Read access to the loaded layers.
    #[inline]
    pub fn registry(&self) -> Ref<'_, Registry> {
        self.registry.borrow()
    }

    #[inline] pub fn source(&self) -> &S { &self.source }

    /// Load a layer, returning the cached collection when it was loaded before.
    ///
    /// Different layers may load concurrently; a second load of a layer whose
    /// load is still pending fails with [`LoadError::InProgress`]. On failure
    /// nothing is registered, so the next call fetches again.
    pub async fn load(&self, id: LayerId) -> Result<Arc<FeatureCollection>, LoadError> {
        if let Some(collection) = self.registry.borrow().get(id) {
            debug!(layer = %id, "layer served from cache");
            return Ok(collection)
        }

        let _pending = PendingGuard::acquire(&self.pending, id)?;

        let collection = Arc::new(self.fetch_collection(id).await?);
        self.registry.borrow_mut().insert(collection.clone());
        info!(layer = %id, features = collection.len(), "layer loaded");

        Ok(collection)
    }

    async fn fetch_collection(&self, id: LayerId) -> Result<FeatureCollection, LoadError> {
        let path = self.paths.get(&id).cloned()
            .unwrap_or_else(|| format!("data/{}.geojson", id.to_str()));

        let bytes = self.source.fetch(&path).await
            .map_err(|source| LoadError::Retrieval { layer: id, source })?;

        let features = read_features(&bytes)
            .map_err(|e| LoadError::Parse { layer: id, reason: format!("{e:#}") })?;

        let collection = FeatureCollection::new(id, features);
        match collection.sample_coord() {
            Some(sample) if needs_reprojection(sample) => {
                warn!(layer = %id, x = sample.x, y = sample.y, "projected coordinates detected, reprojecting from UTM 23S");
                reproject_collection(collection)
            }
            _ => Ok(collection),
        }
    }
}

/// Reproject every feature of a collection assumed to be in UTM 23S.
fn reproject_collection(collection: FeatureCollection) -> Result<FeatureCollection, LoadError> {
    let layer = collection.layer();
    let reprojection = |source| LoadError::Reprojection { layer, source };

    let reprojector = Reprojector::new().map_err(reprojection)?;
    let features = collection.features().iter()
        .map(|feature| -> Result<Feature, LoadError> {
            let geometry = reprojector.reproject_geometry(&feature.geometry).map_err(reprojection)?;
            Ok(Feature::new(geometry, feature.properties.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection::new(layer, features))
}

/// Marks a layer as loading until dropped.
struct PendingGuard<'a> {
    pending: &'a RefCell<AHashSet<LayerId>>,
    id: LayerId,
}

impl<'a> PendingGuard<'a> {
    fn acquire(pending: &'a RefCell<AHashSet<LayerId>>, id: LayerId) -> Result<Self, LoadError> {
        if !pending.borrow_mut().insert(id) {
            return Err(LoadError::InProgress { layer: id })
        }
        Ok(Self { pending, id })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.borrow_mut().remove(&self.id);
    }
}
