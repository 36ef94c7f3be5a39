//! Glucose forecast core: state estimation, projection and risk classification.
//!
//! The engine is pure, synchronous computation. Hosts feed it readings and a
//! parameter profile; it returns a state snapshot, a projection series, and a
//! risk label. Estimator instances are cheap and owned per run; nothing here is
//! shared mutable state.

pub mod cli;
pub mod estimate;
pub mod exit_codes;
pub mod forecast;
pub mod logging;
pub mod output;
pub mod project;
pub mod risk;

pub use estimate::{process_readings, SequenceOutcome, SequenceProcessor, State, StateEstimator};
pub use exit_codes::ExitCode;
pub use forecast::{ForecastReport, Forecaster, ReadingStats};
pub use project::{apply_adaptive_horizon, ProjectionPoint, Projector};
pub use risk::{classify, classify_default, RiskAssessment, RiskLevel, TrendArrow};
