//! Error types for the sun and star calculators.

use thiserror::Error;
use vega_time::TimeError;

/// Errors from sky calculations.
///
/// Only contract violations (bad inputs, bad configuration) and
/// unrepresentable instants are errors. A star that never rises or a sun
/// that never sets is an ordinary `None` result.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SkyError {
    /// Latitude/longitude outside the accepted range.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// Right ascension/declination outside the accepted range.
    #[error("invalid star coordinate: {0}")]
    InvalidStar(&'static str),
    /// Configuration rejected by [`crate::VisibilityConfig::validate`].
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Error from time conversion.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}
