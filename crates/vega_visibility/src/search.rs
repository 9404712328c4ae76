//! Bounded forward search for visibility transitions.
//!
//! Steps forward in fixed increments testing "star above the operative
//! horizon and sun below the darkness threshold", then bisects the first
//! step where the answer flips. Work is capped at
//! `search_cap_hours / search_step_minutes` steps plus `refine_iterations`
//! bisections, whatever the inputs.
//!
//! This is an approximation of the closed-form composer: the darkness test
//! is the instantaneous sun altitude, and any window shorter than one step
//! can be stepped over. The scheduling queries use it only when the closed
//! form finds no bound.

use chrono::{DateTime, Utc};
use log::warn;
use vega_sky::{
    GeoLocation, StarCoordinate, VisibilityConfig, horizontal_position_jd, sun_altitude_deg,
};
use vega_time::{instant_to_jd, jd_to_instant};

use crate::error::VisibilityError;
use crate::window::check_config;
use crate::window_types::{EndReason, VisibilityEnd};

/// Coarse visibility test used by the search.
fn observable_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd: f64,
    config: &VisibilityConfig,
) -> bool {
    horizontal_position_jd(star, location, jd).altitude_deg > config.min_altitude_deg
        && sun_altitude_deg(location, jd) < config.darkness.altitude_deg()
}

/// First instant after `jd_start` where `observable` becomes `target`.
///
/// Returns the refined instant at which the new state holds, or `None` if
/// no flip happens within the cap.
fn find_transition_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd_start: f64,
    target: bool,
    config: &VisibilityConfig,
) -> Option<f64> {
    let step = config.search_step_days();
    let mut t_prev = jd_start;
    let mut prev = observable_jd(star, location, t_prev, config);

    for _ in 0..config.search_steps() {
        let t_curr = t_prev + step;
        let curr = observable_jd(star, location, t_curr, config);

        if prev != target && curr == target {
            let (mut t_a, mut t_b) = (t_prev, t_curr);
            for _ in 0..config.refine_iterations {
                let t_mid = 0.5 * (t_a + t_b);
                if observable_jd(star, location, t_mid, config) == target {
                    t_b = t_mid;
                } else {
                    t_a = t_mid;
                }
            }
            return Some(t_b);
        }

        t_prev = t_curr;
        prev = curr;
    }

    warn!(
        "bounded search exhausted {} steps from jd {jd_start} without a transition",
        config.search_steps()
    );
    None
}

pub(crate) fn search_start_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd: f64,
    config: &VisibilityConfig,
) -> Option<f64> {
    find_transition_jd(star, location, jd, true, config)
}

pub(crate) fn search_end_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd: f64,
    config: &VisibilityConfig,
) -> Option<(f64, EndReason)> {
    if !observable_jd(star, location, jd, config) {
        return None;
    }
    let end = find_transition_jd(star, location, jd, false, config)?;
    let alt = horizontal_position_jd(star, location, end).altitude_deg;
    let reason = if alt > config.min_altitude_deg {
        EndReason::Dawn
    } else {
        EndReason::Setting
    };
    Some((end, reason))
}

/// Next visibility start after `now` by stepped search.
pub fn search_next_visibility_start(
    star: &StarCoordinate,
    location: &GeoLocation,
    now: DateTime<Utc>,
    config: &VisibilityConfig,
) -> Result<Option<DateTime<Utc>>, VisibilityError> {
    check_config(config)?;
    search_start_jd(star, location, instant_to_jd(now), config)
        .map(jd_to_instant)
        .transpose()
        .map_err(VisibilityError::from)
}

/// End of the current visibility period by stepped search.
///
/// `Ok(None)` if the star is not observable at `now` or stays observable
/// for the whole search span.
pub fn search_visibility_end(
    star: &StarCoordinate,
    location: &GeoLocation,
    now: DateTime<Utc>,
    config: &VisibilityConfig,
) -> Result<Option<VisibilityEnd>, VisibilityError> {
    check_config(config)?;
    search_end_jd(star, location, instant_to_jd(now), config)
        .map(|(jd, reason)| {
            Ok(VisibilityEnd {
                at: jd_to_instant(jd)?,
                reason,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn paris() -> GeoLocation {
        GeoLocation::new(48.85, 2.35).unwrap()
    }

    fn sirius() -> StarCoordinate {
        StarCoordinate::new(101.29, -16.72).unwrap()
    }

    #[test]
    fn finds_sirius_rising_within_a_minute() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let cfg = VisibilityConfig::default();
        let start = search_next_visibility_start(&sirius(), &paris(), now, &cfg)
            .unwrap()
            .unwrap();
        let want = Utc.with_ymd_and_hms(2024, 1, 15, 19, 29, 48).unwrap();
        assert!((start - want).num_seconds().abs() <= 60, "start = {start}");
    }

    #[test]
    fn finds_sirius_setting() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 22, 0, 0).unwrap();
        let end = search_visibility_end(&sirius(), &paris(), now, &VisibilityConfig::default())
            .unwrap()
            .unwrap();
        let want = Utc.with_ymd_and_hms(2024, 1, 16, 2, 22, 33).unwrap();
        assert!((end.at - want).num_seconds().abs() <= 60, "end = {}", end.at);
        assert_eq!(end.reason, EndReason::Setting);
    }

    #[test]
    fn circumpolar_star_ends_at_dawn() {
        let polaris = StarCoordinate::new(37.95, 89.26).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 22, 0, 0).unwrap();
        let end = search_visibility_end(&polaris, &paris(), now, &VisibilityConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(end.reason, EndReason::Dawn);
        let want = Utc.with_ymd_and_hms(2024, 1, 16, 5, 45, 35).unwrap();
        assert!((end.at - want).num_seconds().abs() <= 60, "end = {}", end.at);
    }

    #[test]
    fn not_observable_has_no_end() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let cfg = VisibilityConfig::default();
        let end = search_visibility_end(&sirius(), &paris(), now, &cfg).unwrap();
        assert!(end.is_none());
    }

    #[test]
    fn never_rising_star_terminates_with_none() {
        let canopus = StarCoordinate::new(95.99, -52.7).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let cfg = VisibilityConfig::default();
        let start = search_next_visibility_start(&canopus, &paris(), now, &cfg).unwrap();
        assert!(start.is_none());
    }
}
