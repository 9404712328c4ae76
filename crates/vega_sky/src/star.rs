//! Star position and horizon crossings.
//!
//! Altitude/azimuth from local sidereal time:
//!
//!   HA      = LST − RA                      (normalized to (−180, 180])
//!   sin(h)  = sin(φ)·sin(δ) + cos(φ)·cos(δ)·cos(HA)
//!   cos(A)  = (sin(δ) − sin(φ)·sin(h)) / (cos(φ)·cos(h))
//!
//! with A reflected to 360 − A when the star is west of the meridian.
//!
//! Crossing times use the operative horizon from [`VisibilityConfig`]
//! rather than 0°.

use chrono::{DateTime, NaiveDate, Utc};
use vega_time::{
    SIDEREAL_TO_SOLAR, date_to_jd, gmst_deg, instant_to_jd, jd_to_instant,
    local_sidereal_time_deg, normalize_360, normalize_pm180,
};

use crate::config::VisibilityConfig;
use crate::error::SkyError;
use crate::horizon::{clamp_unit, cos_hour_angle, max_altitude_deg, min_altitude_deg};
use crate::star_types::{StarClass, StarPass};
use crate::types::{GeoLocation, HorizontalPosition, StarCoordinate};

/// cos(φ)·cos(h) below this is treated as the zenith or a pole, where
/// azimuth is undefined.
const AZIMUTH_DEGENERATE: f64 = 1e-12;

/// Altitude and azimuth of `star` at a UTC Julian Date.
pub fn horizontal_position_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd: f64,
) -> HorizontalPosition {
    let lst = local_sidereal_time_deg(jd, location.longitude_deg());
    let ha = normalize_pm180(lst - star.ra_deg()).to_radians();
    let phi = location.latitude_rad();
    let dec = star.dec_deg().to_radians();

    let alt = clamp_unit(phi.sin() * dec.sin() + phi.cos() * dec.cos() * ha.cos()).asin();

    let denom = phi.cos() * alt.cos();
    let azimuth_deg = if denom.abs() < AZIMUTH_DEGENERATE {
        0.0
    } else {
        let az = clamp_unit((dec.sin() - phi.sin() * alt.sin()) / denom)
            .acos()
            .to_degrees();
        if ha.sin() > 0.0 {
            normalize_360(360.0 - az)
        } else {
            az
        }
    };

    HorizontalPosition {
        altitude_deg: alt.to_degrees(),
        azimuth_deg,
    }
}

/// Altitude and azimuth of `star` at a UTC instant.
pub fn horizontal_position(
    star: &StarCoordinate,
    location: &GeoLocation,
    at: DateTime<Utc>,
) -> HorizontalPosition {
    horizontal_position_jd(star, location, instant_to_jd(at))
}

/// Whether `star` is above the operative horizon at `at`.
pub fn is_above_horizon(
    star: &StarCoordinate,
    location: &GeoLocation,
    at: DateTime<Utc>,
    config: &VisibilityConfig,
) -> bool {
    horizontal_position(star, location, at).altitude_deg > config.min_altitude_deg
}

/// Classify the star's daily path against the operative horizon.
///
/// Compares the lower and upper culmination altitudes with the threshold,
/// which is exact in both hemispheres including stars near the observer's
/// own pole.
pub fn classify(
    star: &StarCoordinate,
    location: &GeoLocation,
    config: &VisibilityConfig,
) -> StarClass {
    let lat = location.latitude_deg();
    let dec = star.dec_deg();
    if min_altitude_deg(lat, dec) > config.min_altitude_deg {
        StarClass::Circumpolar
    } else if max_altitude_deg(lat, dec) < config.min_altitude_deg {
        StarClass::NeverRises
    } else {
        StarClass::RisesAndSets
    }
}

pub fn is_circumpolar(
    star: &StarCoordinate,
    location: &GeoLocation,
    config: &VisibilityConfig,
) -> bool {
    classify(star, location, config) == StarClass::Circumpolar
}

pub fn never_rises(
    star: &StarCoordinate,
    location: &GeoLocation,
    config: &VisibilityConfig,
) -> bool {
    classify(star, location, config) == StarClass::NeverRises
}

/// Hour angle in degrees at which the star crosses the operative horizon.
///
/// `None` when the star never crosses it (circumpolar or never rises).
pub fn threshold_hour_angle_deg(
    star: &StarCoordinate,
    location: &GeoLocation,
    config: &VisibilityConfig,
) -> Option<f64> {
    if classify(star, location, config) != StarClass::RisesAndSets {
        return None;
    }
    let cos_h = cos_hour_angle(location.latitude_deg(), star.dec_deg(), config.min_altitude_deg);
    if !cos_h.is_finite() {
        return None;
    }
    Some(clamp_unit(cos_h).acos().to_degrees())
}

/// First upper transit at or after `anchor_jd`.
///
/// The hour angle at the anchor is turned into the sidereal time still to
/// run before the meridian crossing, then scaled to solar time.
pub fn transit_near_jd(star: &StarCoordinate, location: &GeoLocation, anchor_jd: f64) -> f64 {
    let to_go = normalize_360(star.ra_deg() - location.longitude_deg() - gmst_deg(anchor_jd));
    anchor_jd + to_go / 360.0 * SIDEREAL_TO_SOLAR
}

/// Meridian transit on `date`: the first transit after 0h UTC.
pub fn transit_time(
    star: &StarCoordinate,
    location: &GeoLocation,
    date: NaiveDate,
) -> Result<DateTime<Utc>, SkyError> {
    Ok(jd_to_instant(transit_near_jd(star, location, date_to_jd(date)))?)
}

/// The pass whose transit is the first at or after `anchor_jd`.
///
/// `None` when the star does not rise and set across the operative horizon.
pub fn star_pass_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    anchor_jd: f64,
    config: &VisibilityConfig,
) -> Option<StarPass> {
    let h = threshold_hour_angle_deg(star, location, config)?;
    let transit_jd = transit_near_jd(star, location, anchor_jd);
    let half = h / 360.0 * SIDEREAL_TO_SOLAR;
    Some(StarPass {
        rise_jd: transit_jd - half,
        transit_jd,
        set_jd: transit_jd + half,
    })
}

/// Rise of the pass transiting on `date`. May fall on the previous date.
pub fn rise_time(
    star: &StarCoordinate,
    location: &GeoLocation,
    date: NaiveDate,
    config: &VisibilityConfig,
) -> Result<Option<DateTime<Utc>>, SkyError> {
    star_pass_jd(star, location, date_to_jd(date), config)
        .map(|p| p.rise())
        .transpose()
}

/// Set of the pass transiting on `date`. May fall on the next date.
pub fn set_time(
    star: &StarCoordinate,
    location: &GeoLocation,
    date: NaiveDate,
    config: &VisibilityConfig,
) -> Result<Option<DateTime<Utc>>, SkyError> {
    star_pass_jd(star, location, date_to_jd(date), config)
        .map(|p| p.set())
        .transpose()
}
