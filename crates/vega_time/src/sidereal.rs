//! Greenwich and local mean sidereal time.
//!
//! GMST uses the IAU 1982 expression in its Julian-Date form
//! (Meeus, Astronomical Algorithms, eq. 12.4), referenced to J2000.0:
//!
//!   θ₀ = 280.46061837 + 360.98564736629·(JD − 2451545.0)
//!        + 0.000387933·T² − T³ / 38710000
//!
//! The cubic term stays below 0.01° for T up to ±1 century, so the result
//! is numerically stable for any date this engine is asked about.

use crate::angle::normalize_360;
use crate::julian::J2000_JD;

/// Length of a sidereal day in solar days.
///
/// Converts an hour-angle fraction of a turn into elapsed solar time.
pub const SIDEREAL_TO_SOLAR: f64 = 0.997_269_6;

/// Greenwich Mean Sidereal Time in degrees, [0, 360).
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let d = jd_ut - J2000_JD;
    let t = d / 36_525.0;
    let theta = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_360(theta)
}

/// Local Mean Sidereal Time in degrees, [0, 360).
///
/// `longitude_deg` is east-positive.
pub fn local_sidereal_time_deg(jd_ut: f64, longitude_deg: f64) -> f64 {
    normalize_360(gmst_deg(jd_ut) + longitude_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::calendar_to_jd;

    #[test]
    fn meeus_example_12a() {
        // 1987-Apr-10 0h UT: GMST = 13h10m46.3668s = 197.693195°
        let g = gmst_deg(calendar_to_jd(1987, 4, 10.0));
        assert!((g - 197.693_195).abs() < 1e-5, "GMST = {g}");
    }

    #[test]
    fn meeus_example_12b() {
        // 1987-Apr-10 19h21m00s UT: GMST = 8h34m57.0896s = 128.737873°
        let jd = calendar_to_jd(1987, 4, 10.0) + (19.0 + 21.0 / 60.0) / 24.0;
        let g = gmst_deg(jd);
        assert!((g - 128.737_873).abs() < 1e-4, "GMST = {g}");
    }

    #[test]
    fn gmst_advances_a_bit_less_than_one_degree_per_day() {
        let g1 = gmst_deg(2_460_000.5);
        let g2 = gmst_deg(2_460_001.5);
        let advance = normalize_360(g2 - g1);
        assert!((advance - 0.985_647).abs() < 1e-4, "advance = {advance}");
    }

    #[test]
    fn lst_east_offset() {
        let jd = 2_460_000.5;
        let lst = local_sidereal_time_deg(jd, 90.0);
        assert!((lst - normalize_360(gmst_deg(jd) + 90.0)).abs() < 1e-12);
    }

    #[test]
    fn lst_range() {
        for &(jd, lon) in &[
            (2_451_545.0, 0.0),
            (2_451_544.5, -179.9),
            (2_460_000.5, 180.0),
            (2_415_385.5, 45.0),
            (2_488_069.5, -45.0),
        ] {
            let lst = local_sidereal_time_deg(jd, lon);
            assert!((0.0..360.0).contains(&lst), "LST out of range: {lst}");
        }
    }
}
