use thiserror::Error;

use ro_core::CoreError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("GeoJSON must be a FeatureCollection, got type {0:?}")]
    NotFeatureCollection(String),

    #[error("feature {index} ({roadway_id}): {reason}")]
    InvalidFeature {
        index:      usize,
        roadway_id: String,
        reason:     String,
    },

    #[error("invalid boolean value: {0}")]
    InvalidBoolean(String),

    #[error("duplicate roadway_id {0:?}")]
    DuplicateRoadway(String),

    #[error("GeoJSON contains no usable LineString features")]
    Empty,

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

pub type IngestResult<T> = Result<T, IngestError>;
