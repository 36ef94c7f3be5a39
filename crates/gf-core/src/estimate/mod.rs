//! Recursive glucose/velocity estimation.

pub mod filter;
pub mod sequence;
pub mod state;

pub use filter::StateEstimator;
pub use sequence::{
    process_readings, GapAction, SequenceOutcome, SequenceProcessor, GAP_RESET_MINUTES,
};
pub use state::{
    State, INITIAL_VAR_GLUCOSE, INITIAL_VAR_VELOCITY, VAR_GLUCOSE_FLOOR, VAR_VELOCITY_FLOOR,
};
