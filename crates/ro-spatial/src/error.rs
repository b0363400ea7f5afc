//! Spatial-subsystem error type.

use thiserror::Error;

use ro_core::NodeId;

/// Errors produced by `ro-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    /// The network strategy cannot be built.  Raised at construction, never
    /// per query.
    #[error("road network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
