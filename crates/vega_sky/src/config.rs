//! Visibility configuration.
//!
//! One value set, passed explicitly into every query. Nothing in the engine
//! reads thresholds from globals.

use serde::{Deserialize, Serialize};

use crate::types::TwilightAngle;

/// Default operative horizon in degrees above the geometric horizon.
pub const DEFAULT_MIN_ALTITUDE_DEG: f64 = 10.0;

/// Upper bound on coarse steps a bounded search may take.
const MAX_SEARCH_STEPS: f64 = 10_000.0;

/// Configurable parameters for visibility queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Operative horizon in degrees. A star is "up" only above this
    /// altitude. Default: 10.0.
    pub min_altitude_deg: f64,
    /// Sun threshold below which the sky counts as dark. Default: astronomical.
    pub darkness: TwilightAngle,
    /// Nights scanned by forward queries. Default: 3.
    pub horizon_days: u32,
    /// Coarse step of the bounded search in minutes. Default: 15.
    pub search_step_minutes: f64,
    /// Hard cap on bounded-search span in hours. Default: 48.
    pub search_cap_hours: f64,
    /// Bisection refinements after a coarse crossing. Default: 5 (~30 s).
    pub refine_iterations: u32,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            min_altitude_deg: DEFAULT_MIN_ALTITUDE_DEG,
            darkness: TwilightAngle::Astronomical,
            horizon_days: 3,
            search_step_minutes: 15.0,
            search_cap_hours: 48.0,
            refine_iterations: 5,
        }
    }
}

impl VisibilityConfig {
    /// Config with a different operative horizon, other fields default.
    pub fn with_min_altitude(min_altitude_deg: f64) -> Self {
        Self {
            min_altitude_deg,
            ..Self::default()
        }
    }

    /// Number of coarse steps a bounded search takes before giving up.
    pub fn search_steps(&self) -> usize {
        (self.search_cap_hours * 60.0 / self.search_step_minutes).ceil() as usize
    }

    /// Search step in days.
    pub fn search_step_days(&self) -> f64 {
        self.search_step_minutes / 1440.0
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.min_altitude_deg.is_finite()
            || self.min_altitude_deg <= -90.0
            || self.min_altitude_deg >= 90.0
        {
            return Err("min_altitude_deg must be within (-90, 90)");
        }
        if self.horizon_days == 0 {
            return Err("horizon_days must be > 0");
        }
        if !self.search_step_minutes.is_finite() || self.search_step_minutes <= 0.0 {
            return Err("search_step_minutes must be positive");
        }
        if !self.search_cap_hours.is_finite() || self.search_cap_hours <= 0.0 {
            return Err("search_cap_hours must be positive");
        }
        if self.search_cap_hours * 60.0 / self.search_step_minutes > MAX_SEARCH_STEPS {
            return Err("search_cap_hours / search_step_minutes allows too many steps");
        }
        if self.refine_iterations == 0 {
            return Err("refine_iterations must be > 0");
        }
        Ok(())
    }
}
