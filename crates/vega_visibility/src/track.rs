//! Diurnal track of a star across one UTC day.
//!
//! Samples sit on fixed clock times (00:00, 00:10, ... 23:50 UTC) rather
//! than offsets from the current instant, so hour labels stay put as time
//! advances.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use vega_sky::{GeoLocation, StarCoordinate, VisibilityConfig, horizontal_position_jd};
use vega_time::{MINUTES_PER_DAY, date_to_jd, jd_to_instant};

use crate::error::VisibilityError;
use crate::window::check_config;

/// Samples per day.
pub const TRACK_POINTS: usize = 144;

/// Minutes between samples.
pub const TRACK_STEP_MINUTES: u32 = 10;

/// One sample of the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    pub at: DateTime<Utc>,
    /// Minutes after 0h UTC of the track date.
    pub minute_of_day: u32,
    pub azimuth_deg: f64,
    pub altitude_deg: f64,
    /// Above the geometric horizon.
    pub above_horizon: bool,
    /// Above the operative horizon.
    pub observable: bool,
}

impl TrackPoint {
    pub fn is_hour_mark(&self) -> bool {
        self.minute_of_day % 60 == 0
    }

    pub fn hour(&self) -> u32 {
        self.minute_of_day / 60
    }
}

/// A star's path across the sky over one UTC day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiurnalTrack {
    pub date: NaiveDate,
    pub points: Vec<TrackPoint>,
}

impl DiurnalTrack {
    /// Samples on whole hours.
    pub fn hour_marks(&self) -> impl Iterator<Item = &TrackPoint> {
        self.points.iter().filter(|p| p.is_hour_mark())
    }

    /// Even-hour samples with their labels ("0h", "2h", ... "22h").
    pub fn labelled_marks(&self) -> Vec<(String, &TrackPoint)> {
        self.hour_marks()
            .filter(|p| p.hour() % 2 == 0)
            .map(|p| (format!("{}h", p.hour()), p))
            .collect()
    }

    /// Highest sample of the day.
    pub fn highest(&self) -> Option<&TrackPoint> {
        self.points
            .iter()
            .max_by(|a, b| a.altitude_deg.total_cmp(&b.altitude_deg))
    }

    /// Number of samples above the operative horizon.
    pub fn observable_count(&self) -> usize {
        self.points.iter().filter(|p| p.observable).count()
    }
}

/// Sample the star's altitude and azimuth every ten minutes across `date`.
pub fn diurnal_track(
    star: &StarCoordinate,
    location: &GeoLocation,
    date: NaiveDate,
    config: &VisibilityConfig,
) -> Result<DiurnalTrack, VisibilityError> {
    check_config(config)?;
    let jd0 = date_to_jd(date);
    let start = jd_to_instant(jd0)?;

    let points = (0..TRACK_POINTS as u32)
        .map(|i| {
            let minute_of_day = i * TRACK_STEP_MINUTES;
            let jd = jd0 + f64::from(minute_of_day) / MINUTES_PER_DAY;
            let pos = horizontal_position_jd(star, location, jd);
            TrackPoint {
                at: start + Duration::minutes(i64::from(minute_of_day)),
                minute_of_day,
                azimuth_deg: pos.azimuth_deg,
                altitude_deg: pos.altitude_deg,
                above_horizon: pos.altitude_deg > 0.0,
                observable: pos.altitude_deg > config.min_altitude_deg,
            }
        })
        .collect();

    Ok(DiurnalTrack { date, points })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> DiurnalTrack {
        let loc = GeoLocation::new(48.85, 2.35).unwrap();
        let sirius = StarCoordinate::new(101.29, -16.72).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        diurnal_track(&sirius, &loc, date, &VisibilityConfig::default()).unwrap()
    }

    #[test]
    fn sample_layout() {
        let t = track();
        assert_eq!(t.points.len(), TRACK_POINTS);
        assert_eq!(t.points[0].minute_of_day, 0);
        assert_eq!(t.points[143].minute_of_day, 1430);
        assert_eq!(t.hour_marks().count(), 24);
    }

    #[test]
    fn even_hour_labels() {
        let t = track();
        let labels: Vec<String> = t.labelled_marks().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "0h");
        assert_eq!(labels[11], "22h");
    }

    #[test]
    fn highest_sample_near_transit() {
        let t = track();
        let top = t.highest().unwrap();
        // Transit at 22:56 UTC; the nearest samples are 22:50 and 23:00.
        assert!(top.minute_of_day == 1370 || top.minute_of_day == 1380);
        assert!((top.altitude_deg - 24.43).abs() < 0.2);
    }

    #[test]
    fn observable_subset_of_above_horizon() {
        let t = track();
        assert!(t.points.iter().all(|p| !p.observable || p.above_horizon));
        assert!(t.observable_count() > 0);
    }
}
