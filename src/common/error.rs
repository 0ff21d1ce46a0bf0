//! Error kinds surfaced while loading a layer.

use thiserror::Error;

use crate::layer::LayerId;

/// Transport-level failure reported by a [`LayerSource`](crate::LayerSource).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{path} returned status {status}")]
    Status { path: String, status: u16 },

    #[error("failed to fetch {path}: {message}")]
    Transport { path: String, message: String },
}

/// Failure while converting projected coordinates to lon/lat.
#[derive(Debug, Error)]
pub enum ReprojectError {
    #[error("invalid projection definition '{definition}': {reason}")]
    Definition { definition: &'static str, reason: String },

    #[error("malformed coordinate ({x}, {y})")]
    Malformed { x: f64, y: f64 },

    #[error("transform failed at ({x}, {y}): {reason}")]
    Transform { x: f64, y: f64, reason: String },
}

/// Failure of a single layer load. A failed layer is never registered.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to retrieve layer '{layer}': {source}")]
    Retrieval { layer: LayerId, #[source] source: FetchError },

    #[error("layer '{layer}' is not a valid feature collection: {reason}")]
    Parse { layer: LayerId, reason: String },

    #[error("failed to reproject layer '{layer}': {source}")]
    Reprojection { layer: LayerId, #[source] source: ReprojectError },

    #[error("layer '{layer}' is already loading")]
    InProgress { layer: LayerId },
}

impl LoadError {
    /// The layer whose load failed.
    pub fn layer(&self) -> LayerId {
        match self {
            LoadError::Retrieval { layer, .. }
            | LoadError::Parse { layer, .. }
            | LoadError::Reprojection { layer, .. }
            | LoadError::InProgress { layer } => *layer,
        }
    }
}
