//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Validation failures for the planner's input entities.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid road segment {roadway_id:?}: {reason}")]
    InvalidSegment { roadway_id: String, reason: String },

    #[error("invalid constraint {field}: {reason}")]
    InvalidConstraint { field: &'static str, reason: String },
}

/// Shorthand result type for `ro-core`.
pub type CoreResult<T> = Result<T, CoreError>;
