//! Timeline error types

use thiserror::Error;

/// Rejected builder input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// A delay, duration or wait was below zero
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    /// A delay, duration or wait was NaN or infinite
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, TimelineError>;

/// Validate a time value in seconds
pub(crate) fn check_seconds(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(TimelineError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(TimelineError::Negative { field, value });
    }
    Ok(value)
}
