//! Semantic validation for configuration values.

use thiserror::Error;

/// Result alias for validation and loading.
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("invalid {section}.{field}: {reason}")]
    Invalid {
        section: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("unknown device preset '{0}' (expected one of: generic, dexcom-g6, dexcom-g7, libre2, libre3)")]
    UnknownDevice(String),
}

impl ValidationError {
    pub(crate) fn invalid(
        section: &'static str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        ValidationError::Invalid {
            section,
            field,
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for gf_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Invalid {
                section: "profile", ..
            } => gf_common::Error::InvalidProfile(err.to_string()),
            ValidationError::UnknownDevice(name) => gf_common::Error::UnknownDevice(name),
            other => gf_common::Error::Config(other.to_string()),
        }
    }
}

/// `value` must be finite and strictly positive.
pub(crate) fn positive(
    section: &'static str,
    field: &'static str,
    value: f64,
) -> ValidationResult {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::invalid(
            section,
            field,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

/// `value` must be finite and non-negative.
pub(crate) fn non_negative(
    section: &'static str,
    field: &'static str,
    value: f64,
) -> ValidationResult {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::invalid(
            section,
            field,
            format!("must be finite and >= 0, got {value}"),
        ))
    }
}
