//! Presentation aggregate for schedulers and UIs.

use chrono::{DateTime, FixedOffset, Utc};
use vega_sky::{
    CompassPoint, GeoLocation, StarClass, StarCoordinate, VisibilityConfig, classify,
    horizontal_position_jd,
};
use vega_time::{instant_to_jd, jd_to_instant};

use crate::error::VisibilityError;
use crate::format::format_time;
use crate::schedule::{is_visible_jd, next_set_jd, visibility_end_jd};
use crate::window::{check_config, next_window_jd};
use crate::window_types::{EndReason, ViewingWindow, VisibilityInfo, VisibilityStatus};

/// Status, window, position and a one-line summary for `star` at `now`.
///
/// Times in the summary are rendered in `offset`, relative to the local
/// date of `now`.
pub fn visibility_info(
    star: &StarCoordinate,
    location: &GeoLocation,
    now: DateTime<Utc>,
    offset: &FixedOffset,
    config: &VisibilityConfig,
) -> Result<VisibilityInfo, VisibilityError> {
    check_config(config)?;
    let jd = instant_to_jd(now);
    let position = horizontal_position_jd(star, location, jd);
    let direction = CompassPoint::from_azimuth(position.azimuth_deg);
    let today = now.with_timezone(offset).date_naive();
    let fmt = |at: DateTime<Utc>| format_time(at, today, offset);

    let finish =
        |status: VisibilityStatus, window: Option<ViewingWindow>, summary: String| VisibilityInfo {
            is_visible_now: status == VisibilityStatus::VisibleNow,
            status,
            window,
            position,
            direction,
            summary,
        };

    if classify(star, location, config) == StarClass::NeverRises {
        let summary = format!(
            "Never rises above {:.0}° from this latitude",
            config.min_altitude_deg
        );
        return Ok(finish(VisibilityStatus::NeverVisible, None, summary));
    }

    if is_visible_jd(star, location, jd, config) {
        let end = visibility_end_jd(star, location, jd, config);
        let window = ViewingWindow {
            start: now,
            end: end.map(|(end_jd, _)| jd_to_instant(end_jd)).transpose()?,
        };
        let summary = match (end, window.end) {
            (Some((_, EndReason::Setting)), Some(at)) => {
                format!("Visible now in the {direction}, sets at {}", fmt(at))
            }
            (Some((_, EndReason::Dawn)), Some(at)) => {
                format!("Visible now in the {direction}, until dawn at {}", fmt(at))
            }
            _ => format!("Visible now in the {direction}"),
        };
        return Ok(finish(VisibilityStatus::VisibleNow, Some(window), summary));
    }

    let above = position.altitude_deg > config.min_altitude_deg;
    let next_jd = next_window_jd(star, location, jd, config);
    // Waiting for dark requires the star to stay up until the window opens.
    let up_until_window = above
        && next_jd.is_some_and(|(start, _)| {
            next_set_jd(star, location, jd, config).is_none_or(|set| set >= start)
        });
    let next = next_jd
        .map(|(start, end)| ViewingWindow::from_jd(start, end))
        .transpose()?;

    let (status, summary) = match (&next, above) {
        (Some(w), true) if up_until_window => (
            VisibilityStatus::WaitForDark,
            format!("Above the horizon; dark enough from {}", fmt(w.start)),
        ),
        (Some(w), _) => (
            VisibilityStatus::VisibleLater,
            format!("Visible from {}", fmt(w.start)),
        ),
        (None, true) => (
            VisibilityStatus::WaitForDark,
            format!(
                "Above the horizon, but no dark sky in the next {} nights",
                config.horizon_days
            ),
        ),
        (None, false) => (
            VisibilityStatus::BelowHorizon,
            format!("Not visible in the next {} nights", config.horizon_days),
        ),
    };
    Ok(finish(status, next, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn paris() -> GeoLocation {
        GeoLocation::new(48.85, 2.35).unwrap()
    }

    fn cet() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    #[test]
    fn sirius_visible_now() {
        let sirius = StarCoordinate::new(101.29, -16.72).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 22, 0, 0).unwrap();
        let info = visibility_info(&sirius, &paris(), now, &cet(), &VisibilityConfig::default())
            .unwrap();
        assert!(info.is_visible_now);
        assert_eq!(info.status, VisibilityStatus::VisibleNow);
        assert_eq!(info.direction, CompassPoint::South);
        // Sets 02:22 UTC = 03:22 CET the next day.
        assert_eq!(info.summary, "Visible now in the South, sets at 03:22 (+1)");
        let w = info.window.unwrap();
        assert_eq!(w.start, now);
    }

    #[test]
    fn sirius_later_from_noon() {
        let sirius = StarCoordinate::new(101.29, -16.72).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let info = visibility_info(&sirius, &paris(), now, &cet(), &VisibilityConfig::default())
            .unwrap();
        assert!(!info.is_visible_now);
        assert_eq!(info.status, VisibilityStatus::VisibleLater);
        assert_eq!(info.summary, "Visible from 20:29");
    }

    #[test]
    fn polaris_waits_for_dark() {
        let polaris = StarCoordinate::new(37.95, 89.26).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let info = visibility_info(&polaris, &paris(), now, &cet(), &VisibilityConfig::default())
            .unwrap();
        assert_eq!(info.status, VisibilityStatus::WaitForDark);
        assert_eq!(info.direction, CompassPoint::North);
        assert_eq!(info.summary, "Above the horizon; dark enough from 19:14");
    }

    #[test]
    fn setting_before_dusk_is_visible_later() {
        // Sets about 17:30 UTC, before astronomical dusk at 18:14 UTC, so
        // the next window is its morning re-rise rather than nightfall.
        let star = StarCoordinate::new(281.8, 20.0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap();
        let info = visibility_info(&star, &paris(), now, &cet(), &VisibilityConfig::default())
            .unwrap();
        assert!(info.position.altitude_deg > 10.0);
        assert_eq!(info.status, VisibilityStatus::VisibleLater);
        assert!(info.summary.starts_with("Visible from 05:"), "{}", info.summary);
        assert!(info.summary.ends_with("(+1)"), "{}", info.summary);
        let dusk = Utc.with_ymd_and_hms(2024, 1, 15, 18, 14, 0).unwrap();
        assert!(info.window.unwrap().start > dusk);
    }

    #[test]
    fn canopus_never_visible() {
        let canopus = StarCoordinate::new(95.99, -52.7).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 22, 0, 0).unwrap();
        let info = visibility_info(&canopus, &paris(), now, &cet(), &VisibilityConfig::default())
            .unwrap();
        assert_eq!(info.status, VisibilityStatus::NeverVisible);
        assert!(info.window.is_none());
        assert_eq!(info.summary, "Never rises above 10° from this latitude");
    }

    #[test]
    fn midsummer_polaris_has_no_dark_sky() {
        let polaris = StarCoordinate::new(37.95, 89.26).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 21, 22, 0, 0).unwrap();
        let info = visibility_info(&polaris, &paris(), now, &cet(), &VisibilityConfig::default())
            .unwrap();
        assert_eq!(info.status, VisibilityStatus::WaitForDark);
        assert!(info.window.is_none());
    }
}
