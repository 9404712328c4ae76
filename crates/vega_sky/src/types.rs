//! Value types shared by the sun and star calculators.
//!
//! Locations and star coordinates are validated once, at construction;
//! every calculation downstream may assume they are in range.

use serde::{Deserialize, Serialize};

use crate::error::SkyError;

/// Observer position on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    latitude_deg: f64,
    longitude_deg: f64,
}

impl GeoLocation {
    /// Create a location from latitude in [-90, 90] and east-positive
    /// longitude in (-180, 180].
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, SkyError> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(SkyError::InvalidLocation("latitude must be within [-90, 90]"));
        }
        if !longitude_deg.is_finite() || longitude_deg <= -180.0 || longitude_deg > 180.0 {
            return Err(SkyError::InvalidLocation("longitude must be within (-180, 180]"));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    /// Geodetic latitude in degrees, north positive.
    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    /// Longitude in degrees, east positive.
    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }
}

/// Fixed equatorial coordinates of a star.
///
/// Treated as constant over the calculation window: no precession,
/// nutation or proper motion is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarCoordinate {
    ra_deg: f64,
    dec_deg: f64,
}

impl StarCoordinate {
    /// Create a coordinate from right ascension in [0, 360) and
    /// declination in [-90, 90], both in degrees.
    pub fn new(ra_deg: f64, dec_deg: f64) -> Result<Self, SkyError> {
        if !ra_deg.is_finite() || !(0.0..360.0).contains(&ra_deg) {
            return Err(SkyError::InvalidStar("right ascension must be within [0, 360)"));
        }
        if !dec_deg.is_finite() || !(-90.0..=90.0).contains(&dec_deg) {
            return Err(SkyError::InvalidStar("declination must be within [-90, 90]"));
        }
        Ok(Self { ra_deg, dec_deg })
    }

    /// Create a coordinate from right ascension in hours.
    pub fn from_hours(ra_hours: f64, dec_deg: f64) -> Result<Self, SkyError> {
        Self::new(ra_hours * 15.0, dec_deg)
    }

    pub fn ra_deg(&self) -> f64 {
        self.ra_deg
    }

    pub fn dec_deg(&self) -> f64 {
        self.dec_deg
    }
}

/// Sun-altitude thresholds for sunrise/sunset and the three twilights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwilightAngle {
    /// Upper limb on the horizon: 34' refraction + 16' semidiameter.
    Sunrise,
    /// Sun center at -6 deg.
    Civil,
    /// Sun center at -12 deg.
    Nautical,
    /// Sun center at -18 deg; darker than this is night for star visibility.
    #[default]
    Astronomical,
}

impl TwilightAngle {
    /// Sun-center altitude in degrees at which this threshold is crossed.
    pub fn altitude_deg(self) -> f64 {
        match self {
            Self::Sunrise => -50.0 / 60.0,
            Self::Civil => -6.0,
            Self::Nautical => -12.0,
            Self::Astronomical => -18.0,
        }
    }

    /// Zenith distance in degrees (90.833 for sunrise, 108 for astronomical).
    pub fn zenith_deg(self) -> f64 {
        90.0 - self.altitude_deg()
    }
}

/// Altitude/azimuth of an object for one observer and instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPosition {
    /// Geometric altitude above the horizon in degrees, [-90, 90].
    pub altitude_deg: f64,
    /// Azimuth in degrees east of north, [0, 360).
    pub azimuth_deg: f64,
}
