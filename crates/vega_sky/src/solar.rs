//! Solar position and sun-event times (NOAA solar calculator).
//!
//! Low-precision analytic series: geometric mean longitude and anomaly,
//! equation of center, apparent longitude with the nutation term, and
//! obliquity with its nutation correction. Good to well under a minute of
//! time for dates within a few decades of J2000, which is all the darkness
//! test needs.
//!
//! Event times are returned as minutes from 0h UTC of the requested date.
//! Values may fall outside [0, 1440) when the event lands on the adjacent
//! UTC date (for example dawn east of Greenwich).

use chrono::{DateTime, NaiveDate, Utc};
use vega_time::{
    J2000_JD, MINUTES_PER_DAY, date_to_jd, instant_to_jd, jd_to_instant, normalize_360,
    normalize_pm180,
};

use crate::error::SkyError;
use crate::horizon::{clamp_unit, hour_angle_deg};
use crate::types::{GeoLocation, TwilightAngle};

/// Refinement passes for solar noon and event times.
const REFINE_PASSES: usize = 2;

/// Sun declination and equation of time for one instant.
///
/// Computed once and passed around by value; nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunGeometry {
    /// Apparent declination in degrees.
    pub declination_deg: f64,
    /// Equation of time in minutes (apparent minus mean solar time).
    pub equation_of_time_min: f64,
}

impl SunGeometry {
    /// Geometry at a UTC Julian Date.
    pub fn at_jd(jd: f64) -> Self {
        let t = (jd - J2000_JD) / 36525.0;

        let l0 = normalize_360(280.46646 + t * (36000.76983 + 0.0003032 * t));
        let m = 357.52911 + t * (35999.05029 - 0.0001537 * t);
        let e = 0.016708634 - t * (0.000042037 + 0.0000001267 * t);

        let m_rad = m.to_radians();
        let center = m_rad.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
            + (2.0 * m_rad).sin() * (0.019993 - 0.000101 * t)
            + (3.0 * m_rad).sin() * 0.000289;

        let omega = (125.04 - 1934.136 * t).to_radians();
        let apparent_lon = (l0 + center - 0.00569 - 0.00478 * omega.sin()).to_radians();

        let seconds = 21.448 - t * (46.8150 + t * (0.00059 - t * 0.001813));
        let mean_obliquity = 23.0 + (26.0 + seconds / 60.0) / 60.0;
        let obliquity = (mean_obliquity + 0.00256 * omega.cos()).to_radians();

        let declination_deg = clamp_unit(obliquity.sin() * apparent_lon.sin())
            .asin()
            .to_degrees();

        let y = (obliquity / 2.0).tan().powi(2);
        let l0_rad = l0.to_radians();
        let eot_rad = y * (2.0 * l0_rad).sin() - 2.0 * e * m_rad.sin()
            + 4.0 * e * y * m_rad.sin() * (2.0 * l0_rad).cos()
            - 0.5 * y * y * (4.0 * l0_rad).sin()
            - 1.25 * e * e * (2.0 * m_rad).sin();

        Self {
            declination_deg,
            equation_of_time_min: 4.0 * eot_rad.to_degrees(),
        }
    }

    /// Geometry at a UTC instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self::at_jd(instant_to_jd(instant))
    }
}

/// Solar noon in minutes from 0h UTC, for the date whose 0h UTC is `jd0`.
pub fn solar_noon_minutes_jd(jd0: f64, longitude_deg: f64) -> f64 {
    let mut minutes = 720.0 - 4.0 * longitude_deg;
    for _ in 0..REFINE_PASSES {
        let geo = SunGeometry::at_jd(jd0 + minutes / MINUTES_PER_DAY);
        minutes = 720.0 - 4.0 * longitude_deg - geo.equation_of_time_min;
    }
    minutes
}

/// Solar noon on `date` in minutes from 0h UTC.
pub fn solar_noon_minutes(date: NaiveDate, longitude_deg: f64) -> f64 {
    solar_noon_minutes_jd(date_to_jd(date), longitude_deg)
}

/// Minutes from 0h UTC at which the sun center crosses `altitude_deg`.
///
/// The first pass evaluates the sun at solar noon; the second re-evaluates
/// at the first estimate. `None` when the crossing does not happen.
fn event_minutes(
    location: &GeoLocation,
    jd0: f64,
    altitude_deg: f64,
    is_rising: bool,
) -> Option<f64> {
    let lon = location.longitude_deg();
    let mut minutes = solar_noon_minutes_jd(jd0, lon);
    for _ in 0..REFINE_PASSES {
        let geo = SunGeometry::at_jd(jd0 + minutes / MINUTES_PER_DAY);
        let h = hour_angle_deg(location.latitude_deg(), geo.declination_deg, altitude_deg)?;
        let noon = 720.0 - 4.0 * lon - geo.equation_of_time_min;
        minutes = if is_rising { noon - 4.0 * h } else { noon + 4.0 * h };
    }
    Some(minutes)
}

/// Minutes from 0h UTC of `date` at which the sun crosses `angle`.
///
/// Returns `None` if the sun stays entirely above or below the angle
/// (polar day or night for that threshold).
pub fn sun_event_minutes(
    location: &GeoLocation,
    date: NaiveDate,
    angle: TwilightAngle,
    is_rising: bool,
) -> Option<f64> {
    event_minutes(location, date_to_jd(date), angle.altitude_deg(), is_rising)
}

/// Sun crossing of `angle` as a UTC Julian Date, for the date whose 0h UTC
/// is `jd0`.
pub fn sun_event_jd(
    location: &GeoLocation,
    jd0: f64,
    angle: TwilightAngle,
    is_rising: bool,
) -> Option<f64> {
    event_minutes(location, jd0, angle.altitude_deg(), is_rising)
        .map(|m| jd0 + m / MINUTES_PER_DAY)
}

/// Sun crossing of `angle` on `date` as a UTC instant.
pub fn sun_event_time(
    location: &GeoLocation,
    date: NaiveDate,
    angle: TwilightAngle,
    is_rising: bool,
) -> Result<Option<DateTime<Utc>>, SkyError> {
    sun_event_jd(location, date_to_jd(date), angle, is_rising)
        .map(jd_to_instant)
        .transpose()
        .map_err(SkyError::from)
}

/// Geometric altitude of the sun center in degrees at a UTC Julian Date.
///
/// The hour angle is taken from true solar time, which folds the equation
/// of time and longitude into the UTC clock time.
pub fn sun_altitude_deg(location: &GeoLocation, jd: f64) -> f64 {
    let geo = SunGeometry::at_jd(jd);
    let utc_minutes = (jd + 0.5).rem_euclid(1.0) * MINUTES_PER_DAY;
    let true_solar = utc_minutes + geo.equation_of_time_min + 4.0 * location.longitude_deg();
    let ha = normalize_pm180(true_solar / 4.0 - 180.0).to_radians();

    let phi = location.latitude_rad();
    let dec = geo.declination_deg.to_radians();
    clamp_unit(phi.sin() * dec.sin() + phi.cos() * dec.cos() * ha.cos())
        .asin()
        .to_degrees()
}
