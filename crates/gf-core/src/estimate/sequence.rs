//! Drives a [`StateEstimator`] over a batch of readings.
//!
//! Readings are sorted first; spacing is then handled per pair:
//!
//! | gap `dt` (minutes) | action                           |
//! |--------------------|----------------------------------|
//! | `dt <= 0`          | skip, state untouched            |
//! | `0 < dt < 60`      | predict(dt), update(value)       |
//! | `dt >= 60`         | cold-start again at this reading |

use chrono::{DateTime, Utc};
use gf_common::{minutes_between, Reading};
use gf_config::ParameterProfile;
use serde::Serialize;
use tracing::debug;

use super::filter::StateEstimator;
use super::state::State;

/// Gaps at least this long invalidate the velocity and force a reset.
pub const GAP_RESET_MINUTES: f64 = 60.0;

/// What to do with a reading `dt` minutes after the previous accepted one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GapAction {
    Filter(f64),
    Reset,
    Skip,
}

impl GapAction {
    pub fn for_gap(dt: f64) -> Self {
        if dt <= 0.0 {
            GapAction::Skip
        } else if dt >= GAP_RESET_MINUTES {
            GapAction::Reset
        } else {
            GapAction::Filter(dt)
        }
    }
}

/// Final state of a run plus bookkeeping about how the readings were used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SequenceOutcome {
    pub state: State,
    /// Timestamp of the last accepted reading, `None` for empty input.
    pub last_timestamp: Option<DateTime<Utc>>,
    /// Readings that reached the estimator, cold starts included.
    pub accepted: usize,
    /// Duplicate or out-of-order timestamps.
    pub skipped: usize,
    /// Gap resets after the initial cold start.
    pub resets: usize,
}

/// Filters an unordered batch into a single [`State`].
#[derive(Debug, Clone, Copy)]
pub struct SequenceProcessor {
    params: ParameterProfile,
}

impl SequenceProcessor {
    pub fn new(params: ParameterProfile) -> Self {
        Self { params }
    }

    pub fn run(&self, readings: &[Reading]) -> SequenceOutcome {
        let mut sorted = readings.to_vec();
        sorted.sort_by_key(|r| r.timestamp);

        let Some((first, rest)) = sorted.split_first() else {
            return SequenceOutcome {
                state: State::neutral(&self.params),
                last_timestamp: None,
                accepted: 0,
                skipped: 0,
                resets: 0,
            };
        };

        let mut estimator = StateEstimator::starting_at(first.value, self.params);
        let mut last = first.timestamp;
        let (mut accepted, mut skipped, mut resets) = (1, 0, 0);

        for reading in rest {
            let dt = minutes_between(last, reading.timestamp);
            match GapAction::for_gap(dt) {
                GapAction::Filter(dt) => {
                    estimator.predict(dt);
                    estimator.update(reading.value);
                }
                GapAction::Reset => {
                    debug!(
                        target: "estimate.sequence",
                        gap_minutes = dt,
                        at = %reading.timestamp,
                        "Gap reset"
                    );
                    estimator.reset(reading.value);
                    resets += 1;
                }
                GapAction::Skip => {
                    debug!(
                        target: "estimate.sequence",
                        at = %reading.timestamp,
                        "Skipping duplicate timestamp"
                    );
                    skipped += 1;
                    continue;
                }
            }
            last = reading.timestamp;
            accepted += 1;
        }

        debug!(
            target: "estimate.sequence",
            accepted,
            skipped,
            resets,
            since_reset = estimator.update_count(),
            "Sequence filtered"
        );
        SequenceOutcome {
            state: estimator.snapshot(),
            last_timestamp: Some(last),
            accepted,
            skipped,
            resets,
        }
    }
}

/// Filter `readings` with `params` and return the final state.
pub fn process_readings(readings: &[Reading], params: &ParameterProfile) -> State {
    SequenceProcessor::new(*params).run(readings).state
}
