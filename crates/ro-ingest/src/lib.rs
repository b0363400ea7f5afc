//! `ro-ingest`: input loading for the routeopt night planner.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`geojson`]     | `load_segments_geojson`, `load_segments_reader`, `coerce_bool` |
//! | [`constraints`] | `load_constraints`, YAML and JSON file/string loaders     |
//! | [`error`]       | `IngestError`, `IngestResult<T>`                          |
//!
//! Loaders validate as they go: a successful load yields segments and
//! constraints the planner accepts without further checks.

pub mod constraints;
pub mod error;
pub mod geojson;

#[cfg(test)]
mod tests;

pub use constraints::{
    load_constraints, load_constraints_json, load_constraints_str, load_constraints_yaml,
    load_constraints_yaml_str, ConstraintsFormat,
};
pub use error::{IngestError, IngestResult};
pub use geojson::{coerce_bool, load_segments_geojson, load_segments_reader};
