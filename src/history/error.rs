//! History error types
//!
//! Errors raised while interpreting user-facing inputs of the history
//! pipeline. None of them is fatal: an invalid bound empties the filtered
//! set, an invalid zone is reported by the configuration layer.

use thiserror::Error;

/// Why a date-bound input could not be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundError {
    /// Text is not a `YYYY-MM-DD` calendar date
    #[error("Invalid date bound '{0}': expected YYYY-MM-DD")]
    Malformed(String),
}

/// Why a month label could not be parsed back into its key
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonthKeyError {
    /// Not of the form `M/YYYY`
    #[error("Invalid month label '{0}': expected M/YYYY")]
    Malformed(String),

    /// Month outside 1..=12
    #[error("Month out of range in label '{0}'")]
    MonthOutOfRange(String),
}

/// Why a display zone setting could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    /// Not "local", "utc", or a `+HH:MM` / `-HH:MM` offset
    #[error("Invalid timezone '{0}': expected local, utc or an offset like +02:00")]
    Unrecognized(String),

    /// Offset outside of +/-23:59
    #[error("Timezone offset out of range: {0}")]
    OutOfRange(String),
}
