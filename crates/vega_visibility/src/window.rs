//! Nightly viewing windows.
//!
//! A night runs from dusk on its evening date to dawn on the next date, or
//! noon to noon during polar night. The star's above-threshold passes are
//! found relative to local mean midnight of the evening date; the pass
//! transiting after that midnight and its two neighbours are intersected
//! with the night. Checking the neighbours catches a star that set before
//! dark and rises again before dawn, and a star already up at dusk.

use chrono::{DateTime, NaiveDate, Utc};
use log::trace;
use vega_sky::{
    GeoLocation, StarClass, StarCoordinate, VisibilityConfig, classify, night_darkness_jd,
    star_pass_jd,
};
use vega_time::{date_to_jd, instant_to_jd, night_midnight_jd};

use crate::error::VisibilityError;
use crate::window_types::ViewingWindow;

/// Two window edges closer than this (about one second) are the same
/// instant.
const CONTIGUOUS_DAYS: f64 = 1.0e-5;

pub(crate) fn check_config(config: &VisibilityConfig) -> Result<(), VisibilityError> {
    config.validate().map_err(VisibilityError::InvalidConfig)
}

/// All visible intervals `(start_jd, end_jd)` of the night whose evening
/// date has 0h UTC at `jd0`, in time order.
pub(crate) fn night_windows_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd0: f64,
    config: &VisibilityConfig,
) -> Vec<(f64, f64)> {
    let Some(dark) = night_darkness_jd(location, jd0, config.darkness) else {
        trace!("jd0 {jd0}: no darkness");
        return Vec::new();
    };

    match classify(star, location, config) {
        StarClass::NeverRises => {
            trace!("jd0 {jd0}: star never rises");
            Vec::new()
        }
        StarClass::Circumpolar => vec![(dark.start_jd, dark.end_jd)],
        StarClass::RisesAndSets => {
            let anchor = jd0 - location.longitude_deg() / 360.0;
            let Some(pass) = star_pass_jd(star, location, anchor, config) else {
                return Vec::new();
            };
            let windows: Vec<(f64, f64)> = [pass.previous(), pass, pass.next()]
                .iter()
                .map(|p| (p.rise_jd.max(dark.start_jd), p.set_jd.min(dark.end_jd)))
                .filter(|(start, end)| end >= start)
                .collect();
            trace!(
                "jd0 {jd0}: dark [{}, {}], pass rise {} set {}, {} window(s)",
                dark.start_jd,
                dark.end_jd,
                pass.rise_jd,
                pass.set_jd,
                windows.len()
            );
            windows
        }
    }
}

/// First window of the night whose evening date has 0h UTC at `jd0`.
pub(crate) fn tonight_window_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd0: f64,
    config: &VisibilityConfig,
) -> Option<(f64, f64)> {
    night_windows_jd(star, location, jd0, config).into_iter().next()
}

/// First window starting strictly after `jd`, scanning `horizon_days`
/// nights from the night containing `jd`.
///
/// A window that starts exactly where the previous one ended (polar-night
/// noon boundaries) continues it and does not count as a new start.
pub(crate) fn next_window_jd(
    star: &StarCoordinate,
    location: &GeoLocation,
    jd: f64,
    config: &VisibilityConfig,
) -> Option<(f64, f64)> {
    let base = night_midnight_jd(jd, location.longitude_deg());
    let mut prev_end: Option<f64> = None;
    for k in 0..config.horizon_days {
        for (start, end) in night_windows_jd(star, location, base + f64::from(k), config) {
            let continues = prev_end.is_some_and(|e| (start - e).abs() < CONTIGUOUS_DAYS);
            if start > jd && !continues {
                return Some((start, end));
            }
            prev_end = Some(end);
        }
    }
    None
}

/// Tonight's viewing window for `star` on the night starting on `date`.
///
/// Returns `Ok(None)` when the star never rises, there is no darkness
/// (polar summer), or the star is below the horizon all night.
pub fn tonight_window(
    star: &StarCoordinate,
    location: &GeoLocation,
    date: NaiveDate,
    config: &VisibilityConfig,
) -> Result<Option<ViewingWindow>, VisibilityError> {
    check_config(config)?;
    tonight_window_jd(star, location, date_to_jd(date), config)
        .map(|(start, end)| ViewingWindow::from_jd(start, end))
        .transpose()
}

/// Every viewing window of the night starting on `date`.
///
/// Usually one; two when the star sets after dusk and rises again before
/// dawn.
pub fn night_windows(
    star: &StarCoordinate,
    location: &GeoLocation,
    date: NaiveDate,
    config: &VisibilityConfig,
) -> Result<Vec<ViewingWindow>, VisibilityError> {
    check_config(config)?;
    night_windows_jd(star, location, date_to_jd(date), config)
        .into_iter()
        .map(|(start, end)| ViewingWindow::from_jd(start, end))
        .collect()
}

/// The next viewing window starting strictly after `now`.
pub fn next_window(
    star: &StarCoordinate,
    location: &GeoLocation,
    now: DateTime<Utc>,
    config: &VisibilityConfig,
) -> Result<Option<ViewingWindow>, VisibilityError> {
    check_config(config)?;
    next_window_jd(star, location, instant_to_jd(now), config)
        .map(|(start, end)| ViewingWindow::from_jd(start, end))
        .transpose()
}
