//! Darkness intervals and the "dark enough" test.
//!
//! A night is identified by the date of its evening: it runs from that
//! date's dusk (sun sinking through the darkness threshold) to the next
//! date's dawn (sun rising through it). Where the sun never rises above
//! the threshold at all (polar night) the whole solar day from noon to
//! noon is dark.

use chrono::{DateTime, NaiveDate, Utc};
use vega_time::{MINUTES_PER_DAY, date_to_jd, instant_to_jd, jd_to_instant, night_midnight_jd};

use crate::config::VisibilityConfig;
use crate::error::SkyError;
use crate::horizon::{max_altitude_deg, min_altitude_deg};
use crate::solar::{SunGeometry, solar_noon_minutes_jd, sun_altitude_deg, sun_event_jd};
use crate::types::{GeoLocation, TwilightAngle};

/// Evening and morning threshold crossings bounding one night.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwilightBounds {
    /// Evening crossing (UTC Julian Date).
    pub dusk_jd: f64,
    /// Following morning crossing (UTC Julian Date).
    pub dawn_jd: f64,
}

impl TwilightBounds {
    /// Whether `jd` lies in `[dusk, dawn)`.
    pub fn contains(&self, jd: f64) -> bool {
        self.dusk_jd <= jd && jd < self.dawn_jd
    }

    /// Length of the night in days.
    pub fn duration_days(&self) -> f64 {
        self.dawn_jd - self.dusk_jd
    }

    pub fn dusk(&self) -> Result<DateTime<Utc>, SkyError> {
        Ok(jd_to_instant(self.dusk_jd)?)
    }

    pub fn dawn(&self) -> Result<DateTime<Utc>, SkyError> {
        Ok(jd_to_instant(self.dawn_jd)?)
    }
}

/// How the sun's daily path relates to a threshold altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarCondition {
    /// The sun crosses the threshold twice a day.
    Crosses,
    /// The sun never drops below the threshold (polar day for it).
    AlwaysAbove,
    /// The sun never climbs above the threshold (polar night for it).
    AlwaysBelow,
}

/// Classify the sun's path against `angle` using its declination at `jd`.
pub fn polar_condition(location: &GeoLocation, jd: f64, angle: TwilightAngle) -> PolarCondition {
    let dec = SunGeometry::at_jd(jd).declination_deg;
    let lat = location.latitude_deg();
    let threshold = angle.altitude_deg();
    if max_altitude_deg(lat, dec) < threshold {
        PolarCondition::AlwaysBelow
    } else if min_altitude_deg(lat, dec) > threshold {
        PolarCondition::AlwaysAbove
    } else {
        PolarCondition::Crosses
    }
}

/// Dusk and dawn for the night whose evening date has 0h UTC at `jd0`.
///
/// Dawn is computed against the following date. `None` if either crossing
/// is missing.
pub fn twilight_bounds_jd(
    location: &GeoLocation,
    jd0: f64,
    angle: TwilightAngle,
) -> Option<TwilightBounds> {
    let dusk_jd = sun_event_jd(location, jd0, angle, false)?;
    let dawn_jd = sun_event_jd(location, jd0 + 1.0, angle, true)?;
    (dawn_jd > dusk_jd).then_some(TwilightBounds { dusk_jd, dawn_jd })
}

/// Darkness bounds for the night starting on `date`, at the configured
/// darkness threshold.
pub fn twilight_bounds(
    location: &GeoLocation,
    date: NaiveDate,
    config: &VisibilityConfig,
) -> Option<TwilightBounds> {
    twilight_bounds_jd(location, date_to_jd(date), config.darkness)
}

/// A stretch of continuous darkness attached to one night date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DarkInterval {
    pub start_jd: f64,
    pub end_jd: f64,
    /// True when the sun stays below the threshold all day and the interval
    /// runs from solar noon to the next solar noon.
    pub polar_night: bool,
}

impl DarkInterval {
    /// Whether `jd` lies in `[start, end)`.
    pub fn contains(&self, jd: f64) -> bool {
        self.start_jd <= jd && jd < self.end_jd
    }
}

/// Bisection steps when locating a threshold crossing by sun altitude.
const CROSSING_BISECTIONS: u32 = 32;

/// Time in `[lo, hi]` where the sun altitude crosses `threshold`, given
/// that it is at or above it at `lo` when `sinking`, below it otherwise.
fn bisect_crossing(
    location: &GeoLocation,
    lo: f64,
    hi: f64,
    threshold: f64,
    sinking: bool,
) -> f64 {
    let (mut lo, mut hi) = (lo, hi);
    for _ in 0..CROSSING_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        let dark = sun_altitude_deg(location, mid) < threshold;
        if dark == sinking {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Dark interval for the night whose evening date has 0h UTC at `jd0`.
///
/// Uses the twilight bounds when they exist. If the sun stays below the
/// threshold for the whole day, the interval is solar noon to the next
/// solar noon. On the transition nights where a crossing is missing, the
/// bounds are found from the sun altitude around solar midnight. `None`
/// when the sun stays above the threshold all night.
pub fn night_darkness_jd(
    location: &GeoLocation,
    jd0: f64,
    angle: TwilightAngle,
) -> Option<DarkInterval> {
    if let Some(b) = twilight_bounds_jd(location, jd0, angle) {
        return Some(DarkInterval {
            start_jd: b.dusk_jd,
            end_jd: b.dawn_jd,
            polar_night: false,
        });
    }
    let lon = location.longitude_deg();
    let noon = jd0 + solar_noon_minutes_jd(jd0, lon) / MINUTES_PER_DAY;
    let next_noon = jd0 + 1.0 + solar_noon_minutes_jd(jd0 + 1.0, lon) / MINUTES_PER_DAY;
    if polar_condition(location, noon, angle) == PolarCondition::AlwaysBelow {
        log::trace!("polar night at jd0 {jd0}: dark from noon {noon} to {next_noon}");
        return Some(DarkInterval {
            start_jd: noon,
            end_jd: next_noon,
            polar_night: true,
        });
    }

    let threshold = angle.altitude_deg();
    let midnight = 0.5 * (noon + next_noon);
    if sun_altitude_deg(location, midnight) >= threshold {
        return None;
    }
    let start_jd = if sun_altitude_deg(location, noon) < threshold {
        noon
    } else {
        bisect_crossing(location, noon, midnight, threshold, true)
    };
    let end_jd = if sun_altitude_deg(location, next_noon) < threshold {
        next_noon
    } else {
        bisect_crossing(location, midnight, next_noon, threshold, false)
    };
    log::trace!("transition night at jd0 {jd0}: dark from {start_jd} to {end_jd}");
    Some(DarkInterval {
        start_jd,
        end_jd,
        polar_night: false,
    })
}

/// Whether the sky is dark at `jd` for the given threshold.
///
/// True iff `jd` falls in the dark interval of the previous, current or
/// next night date, so it agrees with the intervals the window composer
/// uses.
pub fn is_dark_at_jd(location: &GeoLocation, jd: f64, angle: TwilightAngle) -> bool {
    let base = night_midnight_jd(jd, location.longitude_deg());
    [-1.0, 0.0, 1.0]
        .into_iter()
        .filter_map(|offset| night_darkness_jd(location, base + offset, angle))
        .any(|night| night.contains(jd))
}

/// Whether it is dark enough at `at` to see stars.
pub fn is_dark_enough(
    location: &GeoLocation,
    at: DateTime<Utc>,
    config: &VisibilityConfig,
) -> bool {
    is_dark_at_jd(location, instant_to_jd(at), config.darkness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn paris() -> GeoLocation {
        GeoLocation::new(48.85, 2.35).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn paris_january_bounds() {
        let b = twilight_bounds(&paris(), ymd(2024, 1, 15), &VisibilityConfig::default()).unwrap();
        let dusk = b.dusk().unwrap();
        let dawn = b.dawn().unwrap();
        let want_dusk = Utc.with_ymd_and_hms(2024, 1, 15, 18, 14, 1).unwrap();
        let want_dawn = Utc.with_ymd_and_hms(2024, 1, 16, 5, 45, 35).unwrap();
        assert!((dusk - want_dusk).num_seconds().abs() <= 60, "dusk = {dusk}");
        assert!((dawn - want_dawn).num_seconds().abs() <= 60, "dawn = {dawn}");
        assert!(b.duration_days() > 0.45 && b.duration_days() < 0.5);
    }

    #[test]
    fn paris_midsummer_has_no_astronomical_night() {
        let cfg = VisibilityConfig::default();
        assert!(twilight_bounds(&paris(), ymd(2024, 6, 21), &cfg).is_none());
        let jd0 = date_to_jd(ymd(2024, 6, 21));
        assert!(night_darkness_jd(&paris(), jd0, TwilightAngle::Astronomical).is_none());
    }

    #[test]
    fn paris_midsummer_never_dark() {
        let cfg = VisibilityConfig::default();
        for hour in 0..24 {
            let at = Utc.with_ymd_and_hms(2024, 6, 21, hour, 0, 0).unwrap();
            assert!(!is_dark_enough(&paris(), at, &cfg), "dark at {at}");
        }
    }

    #[test]
    fn paris_january_midnight_is_dark() {
        let cfg = VisibilityConfig::default();
        let at = Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap();
        assert!(is_dark_enough(&paris(), at, &cfg));
        let noon = Utc.with_ymd_and_hms(2024, 1, 16, 12, 0, 0).unwrap();
        assert!(!is_dark_enough(&paris(), noon, &cfg));
    }

    #[test]
    fn dark_just_after_dusk_not_before() {
        let loc = paris();
        let jd0 = date_to_jd(ymd(2024, 1, 15));
        let b = twilight_bounds_jd(&loc, jd0, TwilightAngle::Astronomical).unwrap();
        let minute = 1.0 / MINUTES_PER_DAY;
        assert!(!is_dark_at_jd(&loc, b.dusk_jd - minute, TwilightAngle::Astronomical));
        assert!(is_dark_at_jd(&loc, b.dusk_jd + minute, TwilightAngle::Astronomical));
        assert!(is_dark_at_jd(&loc, b.dawn_jd - minute, TwilightAngle::Astronomical));
        assert!(!is_dark_at_jd(&loc, b.dawn_jd + minute, TwilightAngle::Astronomical));
    }

    #[test]
    fn polar_night_is_dark_all_day() {
        let loc = GeoLocation::new(88.0, 0.0).unwrap();
        let cfg = VisibilityConfig::default();
        for hour in [0, 6, 12, 18] {
            let at = Utc.with_ymd_and_hms(2024, 12, 21, hour, 0, 0).unwrap();
            assert!(is_dark_enough(&loc, at, &cfg), "not dark at {at}");
        }
        let jd0 = date_to_jd(ymd(2024, 12, 21));
        let night = night_darkness_jd(&loc, jd0, TwilightAngle::Astronomical).unwrap();
        assert!(night.polar_night);
        assert!((night.end_jd - night.start_jd - 1.0).abs() < 0.01);
    }

    #[test]
    fn transition_night_found_from_sun_altitude() {
        // Lat 55°, 2024-05-06: the two-pass dawn is missing but the sun
        // still dips to about -18.1° at solar midnight.
        let loc = GeoLocation::new(55.0, 0.0).unwrap();
        let jd0 = date_to_jd(ymd(2024, 5, 6));
        assert!(twilight_bounds_jd(&loc, jd0, TwilightAngle::Astronomical).is_none());
        let night = night_darkness_jd(&loc, jd0, TwilightAngle::Astronomical).unwrap();
        assert!(!night.polar_night);
        let start = jd_to_instant(night.start_jd).unwrap();
        let end = jd_to_instant(night.end_jd).unwrap();
        let want_start = Utc.with_ymd_and_hms(2024, 5, 6, 23, 37, 48).unwrap();
        let want_end = Utc.with_ymd_and_hms(2024, 5, 7, 0, 14, 42).unwrap();
        assert!((start - want_start).num_seconds().abs() <= 60, "start = {start}");
        assert!((end - want_end).num_seconds().abs() <= 60, "end = {end}");

        let midnight = Utc.with_ymd_and_hms(2024, 5, 7, 0, 0, 0).unwrap();
        assert!(night.contains(instant_to_jd(midnight)));
        assert!(is_dark_at_jd(&loc, instant_to_jd(midnight), TwilightAngle::Astronomical));
        let before = Utc.with_ymd_and_hms(2024, 5, 6, 23, 30, 0).unwrap();
        assert!(!is_dark_at_jd(&loc, instant_to_jd(before), TwilightAngle::Astronomical));
    }

    #[test]
    fn polar_conditions() {
        let jd = date_to_jd(ymd(2024, 6, 21));
        let north = GeoLocation::new(80.0, 0.0).unwrap();
        let south = GeoLocation::new(-80.0, 0.0).unwrap();
        let sunrise = TwilightAngle::Sunrise;
        assert_eq!(polar_condition(&north, jd, sunrise), PolarCondition::AlwaysAbove);
        assert_eq!(polar_condition(&south, jd, sunrise), PolarCondition::AlwaysBelow);
        assert_eq!(polar_condition(&paris(), jd, sunrise), PolarCondition::Crosses);
    }

    #[test]
    fn equator_night_is_about_nine_and_a_half_hours() {
        let loc = GeoLocation::new(0.0, 0.0).unwrap();
        let b = twilight_bounds_jd(&loc, date_to_jd(ymd(2024, 3, 20)), TwilightAngle::Astronomical)
            .unwrap();
        let hours = b.duration_days() * 24.0;
        assert!(hours > 9.2 && hours < 9.8, "hours = {hours}");
    }
}
