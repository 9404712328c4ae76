//! Result types for viewing windows and scheduling queries.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use vega_sky::{CompassPoint, HorizontalPosition};
use vega_time::jd_to_instant;

use crate::error::VisibilityError;

/// Interval during which a star is both above the operative horizon and in
/// a dark sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewingWindow {
    pub start: DateTime<Utc>,
    /// `None` only when no closing bound exists before the search horizon.
    pub end: Option<DateTime<Utc>>,
}

impl ViewingWindow {
    pub(crate) fn from_jd(start_jd: f64, end_jd: f64) -> Result<Self, VisibilityError> {
        Ok(Self {
            start: jd_to_instant(start_jd)?,
            end: Some(jd_to_instant(end_jd)?),
        })
    }

    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }

    /// Whether `at` lies in `[start, end)`. An open end contains everything
    /// after `start`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && self.end.is_none_or(|end| at < end)
    }
}

/// What ends a visibility period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// Morning twilight brightens the sky past the darkness threshold.
    Dawn,
    /// The star sinks below the operative horizon.
    Setting,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dawn => "dawn",
            Self::Setting => "setting",
        })
    }
}

/// When and why the current visibility period ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityEnd {
    pub at: DateTime<Utc>,
    pub reason: EndReason,
}

/// Presentation status of a star for one observer and instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VisibilityStatus {
    /// Above the operative horizon in a dark sky right now.
    VisibleNow,
    /// Below the horizon now, visible later within the scan horizon.
    VisibleLater,
    /// Above the horizon now but the sky is too bright.
    WaitForDark,
    /// Below the horizon now with no window inside the scan horizon.
    BelowHorizon,
    /// Never reaches the operative horizon from this latitude.
    NeverVisible,
}

impl fmt::Display for VisibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VisibleNow => "visible now",
            Self::VisibleLater => "visible later",
            Self::WaitForDark => "wait for dark",
            Self::BelowHorizon => "below horizon",
            Self::NeverVisible => "never visible",
        })
    }
}

/// Aggregate consumed by schedulers and UIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilityInfo {
    pub is_visible_now: bool,
    pub status: VisibilityStatus,
    /// The current window when visible, otherwise the next one.
    pub window: Option<ViewingWindow>,
    /// Star position at the query instant.
    pub position: HorizontalPosition,
    pub direction: CompassPoint,
    /// One-line human readable description.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_contains_half_open() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 19, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 16, 2, 0, 0).unwrap();
        let w = ViewingWindow {
            start,
            end: Some(end),
        };
        assert!(w.contains(start));
        assert!(!w.contains(end));
        assert_eq!(w.duration(), Some(Duration::hours(7)));
    }

    #[test]
    fn open_window_contains_later_instants() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 19, 0, 0).unwrap();
        let w = ViewingWindow { start, end: None };
        assert!(w.contains(start + Duration::days(30)));
        assert!(w.duration().is_none());
    }

    #[test]
    fn reason_display() {
        assert_eq!(EndReason::Dawn.to_string(), "dawn");
        assert_eq!(EndReason::Setting.to_string(), "setting");
    }
}
