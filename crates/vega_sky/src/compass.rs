//! Compass naming and pointing hints.
//!
//! Eight 45° sectors centered on the cardinal and intercardinal points.
//! An azimuth exactly on a sector edge belongs to the sector clockwise of
//! it: 22.5° is NE, 337.5° is N.

use std::fmt;

use serde::{Deserialize, Serialize};
use vega_time::{normalize_360, normalize_pm180};

use crate::types::HorizontalPosition;

/// One of the eight compass points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassPoint {
    /// All points clockwise from north.
    pub const ALL: [CompassPoint; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Sector containing `azimuth_deg`, using `floor(((az + 22.5) mod 360) / 45)`.
    pub fn from_azimuth(azimuth_deg: f64) -> Self {
        let sector = (normalize_360(azimuth_deg + 22.5) / 45.0).floor() as usize;
        // normalize_360 keeps the value below 360, so sector is 0..=7.
        Self::ALL[sector.min(7)]
    }

    /// Short label: "N", "NE", ...
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::NorthEast => "Northeast",
            Self::East => "East",
            Self::SouthEast => "Southeast",
            Self::South => "South",
            Self::SouthWest => "Southwest",
            Self::West => "West",
            Self::NorthWest => "Northwest",
        }
    }

    /// Azimuth of the sector center in degrees.
    pub fn center_deg(self) -> f64 {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0) as f64 * 45.0
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compass point name for an azimuth in degrees east of north.
pub fn direction_name(azimuth_deg: f64) -> &'static str {
    CompassPoint::from_azimuth(azimuth_deg).name()
}

/// Offset from the current view direction to a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointingHint {
    /// Shortest turn in azimuth, (−180, 180]; positive is clockwise (east).
    pub delta_azimuth_deg: f64,
    /// Altitude change; positive is up.
    pub delta_altitude_deg: f64,
    /// On-screen arrow direction in degrees, measured clockwise from "up".
    pub arrow_angle_deg: f64,
}

impl PointingHint {
    /// Whether both offsets are within `tolerance_deg`.
    pub fn is_on_target(&self, tolerance_deg: f64) -> bool {
        self.delta_azimuth_deg.abs() <= tolerance_deg
            && self.delta_altitude_deg.abs() <= tolerance_deg
    }
}

/// Direction to turn from a view pointing at (`view_azimuth_deg`,
/// `view_altitude_deg`) to reach `target`.
pub fn pointing_hint(
    target: &HorizontalPosition,
    view_azimuth_deg: f64,
    view_altitude_deg: f64,
) -> PointingHint {
    let delta_azimuth_deg = normalize_pm180(target.azimuth_deg - view_azimuth_deg);
    let delta_altitude_deg = target.altitude_deg - view_altitude_deg;
    PointingHint {
        delta_azimuth_deg,
        delta_altitude_deg,
        arrow_angle_deg: delta_azimuth_deg.atan2(delta_altitude_deg).to_degrees(),
    }
}
