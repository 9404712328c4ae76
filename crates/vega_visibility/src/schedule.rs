//! Scheduling queries: visible now, next start, end of visibility.
//!
//! Each call recomputes from its inputs. Callers that query the same date
//! many times may memoize the results themselves.

use chrono::{DateTime, Utc};
use log::debug;
use vega_sky::{
    GeoLocation, StarClass, StarCoordinate, TwilightAngle, VisibilityConfig, classify,
    horizontal_position_jd, is_dark_at_jd, night_darkness_jd, star_pass_jd,
};
use vega_time::{SIDEREAL_TO_SOLAR, instant_to_jd, jd_to_instant, night_midnight_jd};

use crate::error::VisibilityError;
use crate::search::search_end_jd;
use crate::window::{check_config, next_window_jd};
use crate::window_types::{EndReason, VisibilityEnd};

pub(crate) fn is_visible_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd: f64,
    config: &VisibilityConfig,
) -> bool {
    horizontal_position_jd(star, location, jd).altitude_deg > config.min_altitude_deg
        && is_dark_at_jd(location, jd, config.darkness)
}

/// Whether the star is above the operative horizon in a dark sky at `at`.
pub fn is_visible(
    star: &StarCoordinate,
    location: &GeoLocation,
    at: DateTime<Utc>,
    config: &VisibilityConfig,
) -> Result<bool, VisibilityError> {
    check_config(config)?;
    Ok(is_visible_jd(star, location, instant_to_jd(at), config))
}

/// Start of the first viewing window strictly after `now`, within
/// `config.horizon_days` nights.
pub fn next_visibility_start(
    star: &StarCoordinate,
    location: &GeoLocation,
    now: DateTime<Utc>,
    config: &VisibilityConfig,
) -> Result<Option<DateTime<Utc>>, VisibilityError> {
    check_config(config)?;
    next_window_jd(star, location, instant_to_jd(now), config)
        .map(|(start, _)| jd_to_instant(start))
        .transpose()
        .map_err(VisibilityError::from)
}

/// Next set of the star after `jd`. `None` unless it rises and sets.
pub(crate) fn next_set_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd: f64,
    config: &VisibilityConfig,
) -> Option<f64> {
    let pass = star_pass_jd(star, location, jd - SIDEREAL_TO_SOLAR, config)?;
    if pass.set_jd > jd {
        Some(pass.set_jd)
    } else {
        Some(pass.next().set_jd)
    }
}

/// Next morning crossing of the darkness threshold after `jd`.
///
/// Polar-night intervals end at solar noon with the sky still dark, so they
/// do not count.
fn next_dawn_jd(
    location: &GeoLocation,
    jd: f64,
    angle: TwilightAngle,
    horizon_days: u32,
) -> Option<f64> {
    let base = night_midnight_jd(jd, location.longitude_deg());
    (-1..i64::from(horizon_days))
        .filter_map(|k| night_darkness_jd(location, base + k as f64, angle))
        .filter(|night| !night.polar_night)
        .map(|night| night.end_jd)
        .find(|dawn| *dawn > jd)
}

pub(crate) fn visibility_end_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd: f64,
    config: &VisibilityConfig,
) -> Option<(f64, EndReason)> {
    if !is_visible_jd(star, location, jd, config) {
        return None;
    }

    let setting = match classify(star, location, config) {
        StarClass::RisesAndSets => next_set_jd(star, location, jd, config),
        _ => None,
    };
    let dawn = next_dawn_jd(location, jd, config.darkness, config.horizon_days);

    match (setting, dawn) {
        (Some(set), Some(dawn)) if set < dawn => Some((set, EndReason::Setting)),
        (_, Some(dawn)) => Some((dawn, EndReason::Dawn)),
        (Some(set), None) => Some((set, EndReason::Setting)),
        (None, None) => {
            debug!("no closed-form end at jd {jd}; falling back to bounded search");
            search_end_jd(star, location, jd, config)
        }
    }
}

/// When and why the current visibility period ends.
///
/// `Ok(None)` if the star is not visible at `at`, or if it stays visible
/// beyond every bound the engine searches (a circumpolar star in polar
/// night).
pub fn visibility_end(
    star: &StarCoordinate,
    location: &GeoLocation,
    at: DateTime<Utc>,
    config: &VisibilityConfig,
) -> Result<Option<VisibilityEnd>, VisibilityError> {
    check_config(config)?;
    visibility_end_jd(star, location, instant_to_jd(at), config)
        .map(|(jd, reason)| {
            Ok(VisibilityEnd {
                at: jd_to_instant(jd)?,
                reason,
            })
        })
        .transpose()
}
