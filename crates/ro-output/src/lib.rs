//! `ro-output`: itinerary writers for the routeopt night planner.
//!
//! Two backends are provided:
//!
//! | Backend        | Files created                                   |
//! |----------------|-------------------------------------------------|
//! | [`JsonWriter`] | one report document (`routes.json` by default)  |
//! | [`CsvWriter`]  | `nights.csv`, `steps.csv`                       |
//!
//! Both implement [`ItineraryWriter`] and render a [`ro_plan::PlanSummary`];
//! neither re-prices anything, so every figure matches what the solver saw.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ro_output::{ItineraryWriter, JsonWriter};
//!
//! let summary = plan.summary(&constraints);
//! let mut writer = JsonWriter::create(Path::new("routes.json"))?;
//! writer.write_plan(&summary, &constraints)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::{JsonReport, JsonWriter, StepEntry};
pub use row::{NightRow, StepKind, StepRow};
pub use writer::ItineraryWriter;
