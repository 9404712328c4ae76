//! Angle normalization helpers shared by the sun and star calculators.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-17 + 360.0 rounds up to 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to (-180, +180] degrees.
pub fn normalize_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}
