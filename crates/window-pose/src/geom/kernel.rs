//! Intersection, distance and angle primitives on segments.

use nalgebra::Vector2;

use super::types::{LineEq, Segment};

#[inline]
pub fn distance(p: Vector2<f64>, q: Vector2<f64>) -> f64 {
    (q - p).norm()
}

/// Crossing point of the infinite lines through `a` and `b`.
///
/// Returns `None` when the slopes are equal, including two vertical lines and
/// two coincident lines (no single crossing exists). Nearly parallel inputs
/// are solved as-is and lose precision accordingly.
#[inline]
pub fn intersect(a: &Segment, b: &Segment) -> Option<Vector2<f64>> {
    a.line_eq().intersection(&b.line_eq())
}

/// Inclination of the segment against the x axis, `atan(slope)` in degrees.
///
/// Range is (-90°, 90°]; vertical segments report `+90°` regardless of
/// endpoint order. With image coordinates (y down) a segment that rises to
/// the right on screen has a negative angle.
pub fn angle_degrees(s: &Segment) -> f64 {
    match s.line_eq() {
        LineEq::Vertical { .. } => 90.0,
        LineEq::Sloped { m, .. } => m.atan().to_degrees(),
    }
}
