//! Julian Date conversions.
//!
//! Calendar dates are proleptic Gregorian. The algorithm is the standard
//! Meeus (Astronomical Algorithms, ch. 7) conversion, exact for every date
//! after 1582-Oct-15 and used here for years >= 1901.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::TimeError;

/// Julian Date of the J2000.0 epoch (2000-Jan-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-Jan-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const MINUTES_PER_DAY: f64 = 1_440.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Gregorian calendar date to Julian Date.
///
/// `day` may carry a fraction: `calendar_to_jd(2000, 1, 1.5) == 2451545.0`.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let y = f64::from(y);
    let m = f64::from(m);
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Julian Date to Gregorian calendar `(year, month, day_with_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd = jd + 0.5;
    let z = jd.floor();
    let f = jd - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian Date at 0h UTC of a calendar date.
pub fn date_to_jd(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), f64::from(date.day()))
}

/// Calendar date (UTC) containing the given Julian Date.
pub fn jd_to_date(jd: f64) -> Result<NaiveDate, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::OutOfRange(jd));
    }
    let (year, month, day_frac) = jd_to_calendar(jd);
    let day = day_frac.floor() as u32;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(TimeError::InvalidDate { year, month, day })
}

/// UTC instant to Julian Date.
pub fn instant_to_jd(at: DateTime<Utc>) -> f64 {
    let seconds = at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Julian Date to UTC instant, rounded to the nearest millisecond.
pub fn jd_to_instant(jd: f64) -> Result<DateTime<Utc>, TimeError> {
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return Err(TimeError::OutOfRange(jd));
    }
    DateTime::from_timestamp_millis(millis as i64).ok_or(TimeError::OutOfRange(jd))
}
