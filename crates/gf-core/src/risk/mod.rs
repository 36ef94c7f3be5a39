//! Risk classification and trend arrows.

pub mod classifier;
pub mod trend;

pub use classifier::{classify, classify_default, RiskAssessment, RiskLevel};
pub use trend::TrendArrow;
