//! Error types for time conversions.

use thiserror::Error;

/// Errors from Julian Date / calendar conversions.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// The Julian Date cannot be represented as a UTC timestamp.
    #[error("julian date {0} is outside the representable UTC range")]
    OutOfRange(f64),
    /// A calendar triple does not name a real date.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}
