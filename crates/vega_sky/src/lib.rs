//! Sun darkness and star horizon calculators.
//!
//! This crate provides:
//! - Validated value types for observer location and star coordinates
//! - The hoisted visibility configuration (threshold altitude, twilight, search bounds)
//! - NOAA solar geometry, sunrise/sunset/twilight crossing times, darkness test
//! - Star altitude/azimuth, circumpolar classification, transit/rise/set times
//! - Compass naming and an on-screen pointing hint
//!
//! Everything here is a pure function of its inputs. Absent events (polar
//! day/night, circumpolar stars) are `None`, never errors.

pub mod compass;
pub mod config;
pub mod darkness;
pub mod error;
pub mod horizon;
pub mod solar;
pub mod star;
pub mod star_types;
pub mod types;

pub use compass::{CompassPoint, PointingHint, direction_name, pointing_hint};
pub use config::{DEFAULT_MIN_ALTITUDE_DEG, VisibilityConfig};
pub use darkness::{
    DarkInterval, PolarCondition, TwilightBounds, is_dark_at_jd, is_dark_enough,
    night_darkness_jd, polar_condition, twilight_bounds, twilight_bounds_jd,
};
pub use error::SkyError;
pub use horizon::{clamp_unit, cos_hour_angle, hour_angle_deg};
pub use solar::{
    SunGeometry, solar_noon_minutes, solar_noon_minutes_jd, sun_altitude_deg, sun_event_jd,
    sun_event_minutes, sun_event_time,
};
pub use star::{
    classify, horizontal_position, horizontal_position_jd, is_above_horizon, is_circumpolar,
    never_rises, rise_time, set_time, star_pass_jd, threshold_hour_angle_deg, transit_near_jd,
    transit_time,
};
pub use star_types::{StarClass, StarPass};
pub use types::{GeoLocation, HorizontalPosition, StarCoordinate, TwilightAngle};
