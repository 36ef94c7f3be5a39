//! Exit codes for the gf-core CLI.
//!
//! Successful runs encode the risk level so shell callers can alert without
//! parsing output. Codes 10 and above are failures.

use gf_common::Error;

use crate::risk::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Forecast produced, risk Safe (also used by non-forecast commands)
    Safe = 0,

    /// Risk Watch
    Watch = 1,

    /// Risk Warning
    Warning = 2,

    /// Risk Urgent
    Urgent = 3,

    /// Configuration error
    ConfigError = 10,

    /// Bad readings file or arguments
    InputError = 11,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_risk(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Safe => ExitCode::Safe,
            RiskLevel::Watch => ExitCode::Watch,
            RiskLevel::Warning => ExitCode::Warning,
            RiskLevel::Urgent => ExitCode::Urgent,
        }
    }

    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::InvalidProfile(_) | Error::UnknownDevice(_) => {
                ExitCode::ConfigError
            }
            Error::InvalidReading { .. } | Error::InvalidTimestamp(_) | Error::Json(_) => {
                ExitCode::InputError
            }
            Error::Io(_) => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
