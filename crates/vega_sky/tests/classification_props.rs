//! Property tests for star classification and horizon crossings.

use proptest::prelude::*;
use vega_sky::{
    GeoLocation, StarClass, StarCoordinate, VisibilityConfig, classify, horizontal_position_jd,
    star_pass_jd, threshold_hour_angle_deg,
};

const JD_2024: f64 = 2_460_310.5;

proptest! {
    #[test]
    fn classes_are_exclusive_and_consistent(
        lat in -90.0f64..=90.0,
        dec in -90.0f64..=90.0,
        ra in 0.0f64..360.0,
        threshold in -5.0f64..30.0,
    ) {
        let loc = GeoLocation::new(lat, 0.0).unwrap();
        let star = StarCoordinate::new(ra, dec).unwrap();
        let cfg = VisibilityConfig::with_min_altitude(threshold);
        let class = classify(&star, &loc, &cfg);
        let h = threshold_hour_angle_deg(&star, &loc, &cfg);
        match class {
            StarClass::RisesAndSets => {
                prop_assert!(h.is_some() || lat.abs() == 90.0 || dec.abs() == 90.0)
            }
            _ => prop_assert!(h.is_none()),
        }
    }

    #[test]
    fn circumpolar_stays_above_threshold(
        lat in 20.0f64..80.0,
        dec in 0.0f64..89.0,
        ra in 0.0f64..360.0,
        hours in 0.0f64..24.0,
    ) {
        let loc = GeoLocation::new(lat, 0.0).unwrap();
        let star = StarCoordinate::new(ra, dec).unwrap();
        let cfg = VisibilityConfig::default();
        prop_assume!(classify(&star, &loc, &cfg) == StarClass::Circumpolar);
        let pos = horizontal_position_jd(&star, &loc, JD_2024 + hours / 24.0);
        prop_assert!(pos.altitude_deg > cfg.min_altitude_deg);
    }

    #[test]
    fn never_rising_stays_below_threshold(
        lat in -80.0f64..80.0,
        dec in -89.0f64..89.0,
        ra in 0.0f64..360.0,
        hours in 0.0f64..24.0,
    ) {
        let loc = GeoLocation::new(lat, 0.0).unwrap();
        let star = StarCoordinate::new(ra, dec).unwrap();
        let cfg = VisibilityConfig::default();
        prop_assume!(classify(&star, &loc, &cfg) == StarClass::NeverRises);
        let pos = horizontal_position_jd(&star, &loc, JD_2024 + hours / 24.0);
        prop_assert!(pos.altitude_deg < cfg.min_altitude_deg);
    }

    #[test]
    fn pass_is_ordered_and_above_threshold_at_transit(
        lat in -70.0f64..70.0,
        lon in -179.0f64..180.0,
        dec in -60.0f64..60.0,
        ra in 0.0f64..360.0,
    ) {
        let loc = GeoLocation::new(lat, lon).unwrap();
        let star = StarCoordinate::new(ra, dec).unwrap();
        let cfg = VisibilityConfig::default();
        if let Some(pass) = star_pass_jd(&star, &loc, JD_2024, &cfg) {
            prop_assert!(pass.rise_jd <= pass.transit_jd);
            prop_assert!(pass.transit_jd <= pass.set_jd);
            prop_assert!(pass.set_jd - pass.rise_jd < 1.0);
            let alt = horizontal_position_jd(&star, &loc, pass.transit_jd).altitude_deg;
            prop_assert!(alt >= cfg.min_altitude_deg - 1e-6);
        }
    }
}
