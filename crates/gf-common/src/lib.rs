//! Glucose forecast common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the engine crates:
//! - Timestamped glucose readings and unit conversion
//! - Run identifiers and report schema versioning
//! - Common error types
//! - Output format selection

pub mod error;
pub mod id;
pub mod output;
pub mod reading;
pub mod schema;

pub use error::{Error, Result};
pub use id::RunId;
pub use output::OutputFormat;
pub use reading::{minutes_between, GlucoseUnit, Reading, MGDL_PER_MMOL};
pub use schema::SCHEMA_VERSION;
