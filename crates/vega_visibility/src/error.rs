//! Error types for visibility queries.

use thiserror::Error;
use vega_sky::SkyError;
use vega_time::TimeError;

/// Errors from window composition and scheduling queries.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VisibilityError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("sky error: {0}")]
    Sky(#[from] SkyError),
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}
