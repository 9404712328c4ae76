//! Time and frame utilities for the visibility engine.
//!
//! This crate provides:
//! - Gregorian calendar ↔ Julian Date conversions
//! - `DateTime<Utc>` ↔ Julian Date conversions (millisecond precision)
//! - Greenwich and local mean sidereal time
//! - Angle normalization helpers
//! - Local mean midnight and "night date" helpers
//!
//! All Julian Dates in this workspace are on the UTC time scale. The
//! visibility calculations do not need TT/UT1 distinctions at their
//! one-minute precision target.

pub mod angle;
pub mod error;
pub mod julian;
pub mod local;
pub mod sidereal;

pub use angle::{normalize_360, normalize_pm180};
pub use error::TimeError;
pub use julian::{
    J2000_JD, MINUTES_PER_DAY, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, date_to_jd,
    instant_to_jd, jd_to_calendar, jd_to_date, jd_to_instant,
};
pub use local::{local_mean_midnight_jd, night_date, night_midnight_jd};
pub use sidereal::{SIDEREAL_TO_SOLAR, gmst_deg, local_sidereal_time_deg};
