//! Local mean time helpers.
//!
//! A "night date" is the calendar date whose evening a given instant's night
//! belongs to, judged in local mean time: anything before local mean noon
//! belongs to the previous date's night. This keeps the hours after
//! midnight attached to the evening that started them.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::TimeError;
use crate::julian::{date_to_jd, instant_to_jd, jd_to_date};

/// Julian Date (UT) of 0h local mean time on `date` at `longitude_deg` (east positive).
pub fn local_mean_midnight_jd(date: NaiveDate, longitude_deg: f64) -> f64 {
    date_to_jd(date) - longitude_deg / 360.0
}

/// Julian Date of 0h UTC on the night date containing `jd_ut`.
///
/// The result always ends in `.5`, so it can be used as the 0h anchor for
/// any per-date calculation.
pub fn night_midnight_jd(jd_ut: f64, longitude_deg: f64) -> f64 {
    // Shift to local mean time, then back half a day so noon becomes the
    // day boundary; 0h UT of date D is JD D.5.
    (jd_ut + longitude_deg / 360.0 - 1.0).floor() + 0.5
}

/// The night date containing `at` for an observer at `longitude_deg`.
pub fn night_date(at: DateTime<Utc>, longitude_deg: f64) -> Result<NaiveDate, TimeError> {
    jd_to_date(night_midnight_jd(instant_to_jd(at), longitude_deg))
}
