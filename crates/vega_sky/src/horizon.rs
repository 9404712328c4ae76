//! Hour angle of a body at a given altitude.
//!
//! Shared by the sun and star calculators:
//!
//!   cos(H) = (sin(h) − sin(φ)·sin(δ)) / (cos(φ)·cos(δ))
//!
//! |cos(H)| > 1 means the body never reaches altitude `h` (cos H > 1) or
//! never drops to it (cos H < −1).

/// Below this `cos(φ)·cos(δ)` the hour angle is undefined.
const DEGENERATE_DENOMINATOR: f64 = 1e-12;

/// Clamp a value to [-1, 1] before an inverse trig call. NaN passes through.
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// cos(H) for a body at declination `dec_deg` reaching `altitude_deg`
/// seen from `latitude_deg`.
///
/// NaN at the geographic poles and for a body at a celestial pole, where
/// every hour angle has the same altitude.
pub fn cos_hour_angle(latitude_deg: f64, dec_deg: f64, altitude_deg: f64) -> f64 {
    let phi = latitude_deg.to_radians();
    let dec = dec_deg.to_radians();
    let h = altitude_deg.to_radians();
    let denom = phi.cos() * dec.cos();
    if denom.abs() < DEGENERATE_DENOMINATOR {
        return f64::NAN;
    }
    (h.sin() - phi.sin() * dec.sin()) / denom
}

/// Hour angle in degrees, [0, 180], at which the body crosses `altitude_deg`.
///
/// Returns `None` if the crossing never happens.
pub fn hour_angle_deg(latitude_deg: f64, dec_deg: f64, altitude_deg: f64) -> Option<f64> {
    let cos_h = cos_hour_angle(latitude_deg, dec_deg, altitude_deg);
    if !cos_h.is_finite() || cos_h.abs() > 1.0 {
        return None;
    }
    Some(cos_h.acos().to_degrees())
}

/// Highest altitude reached over a sidereal day (upper culmination).
pub fn max_altitude_deg(latitude_deg: f64, dec_deg: f64) -> f64 {
    90.0 - (latitude_deg - dec_deg).abs()
}

/// Lowest altitude reached over a sidereal day (lower culmination).
pub fn min_altitude_deg(latitude_deg: f64, dec_deg: f64) -> f64 {
    (latitude_deg + dec_deg).abs() - 90.0
}
