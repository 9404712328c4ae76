//! Classification and rise/transit/set types for a fixed star.

use std::fmt;

use chrono::{DateTime, Utc};
use vega_time::{SIDEREAL_TO_SOLAR, jd_to_instant};

use crate::error::SkyError;

/// How a star's daily path relates to the operative horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarClass {
    /// Always above the threshold altitude.
    Circumpolar,
    /// Never reaches the threshold altitude.
    NeverRises,
    /// Crosses the threshold twice per sidereal day.
    RisesAndSets,
}

impl StarClass {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Circumpolar => "circumpolar",
            Self::NeverRises => "never rises",
            Self::RisesAndSets => "rises and sets",
        }
    }
}

impl fmt::Display for StarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One above-threshold pass of a star: rise, meridian transit, set.
///
/// All three are UTC Julian Dates with `rise_jd < transit_jd < set_jd`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPass {
    pub rise_jd: f64,
    pub transit_jd: f64,
    pub set_jd: f64,
}

impl StarPass {
    /// The same pass shifted by `days` sidereal days.
    pub fn shifted(&self, days: f64) -> Self {
        let dt = days * SIDEREAL_TO_SOLAR;
        Self {
            rise_jd: self.rise_jd + dt,
            transit_jd: self.transit_jd + dt,
            set_jd: self.set_jd + dt,
        }
    }

    /// The following pass, one sidereal day later.
    pub fn next(&self) -> Self {
        self.shifted(1.0)
    }

    /// The preceding pass, one sidereal day earlier.
    pub fn previous(&self) -> Self {
        self.shifted(-1.0)
    }

    /// Whether `jd` lies in `[rise, set)`.
    pub fn contains(&self, jd: f64) -> bool {
        self.rise_jd <= jd && jd < self.set_jd
    }

    /// Time above the threshold, in days.
    pub fn duration_days(&self) -> f64 {
        self.set_jd - self.rise_jd
    }

    pub fn rise(&self) -> Result<DateTime<Utc>, SkyError> {
        Ok(jd_to_instant(self.rise_jd)?)
    }

    pub fn transit(&self) -> Result<DateTime<Utc>, SkyError> {
        Ok(jd_to_instant(self.transit_jd)?)
    }

    pub fn set(&self) -> Result<DateTime<Utc>, SkyError> {
        Ok(jd_to_instant(self.set_jd)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StarPass {
        StarPass {
            rise_jd: 2_460_325.3,
            transit_jd: 2_460_325.45,
            set_jd: 2_460_325.6,
        }
    }

    #[test]
    fn next_and_previous_are_inverse() {
        let p = sample();
        let back = p.next().previous();
        assert!((back.rise_jd - p.rise_jd).abs() < 1e-9);
        assert!((back.set_jd - p.set_jd).abs() < 1e-9);
    }

    #[test]
    fn next_is_one_sidereal_day_later() {
        let p = sample();
        assert!((p.next().transit_jd - p.transit_jd - 0.997_269_6).abs() < 1e-8);
        assert!((p.next().duration_days() - p.duration_days()).abs() < 1e-9);
    }

    #[test]
    fn contains_is_half_open() {
        let p = sample();
        assert!(p.contains(p.rise_jd));
        assert!(p.contains(p.transit_jd));
        assert!(!p.contains(p.set_jd));
    }

    #[test]
    fn class_display() {
        assert_eq!(StarClass::NeverRises.to_string(), "never rises");
        assert_eq!(StarClass::Circumpolar.to_string(), "circumpolar");
    }
}
