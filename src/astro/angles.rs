/// Reduce any angle in degrees into `[0, 360)`.
///
/// Uses a single Euclidean remainder, so very large or very negative inputs
/// cost the same as small ones.
pub fn normalize_degrees(deg: f64) -> f64 {
    let reduced = deg.rem_euclid(360.0);
    // A tiny negative input rounds up to exactly 360.0.
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}
