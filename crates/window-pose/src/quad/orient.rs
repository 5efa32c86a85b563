//! Tilt scores from the foreshortening of opposite sides.
//!
//! A rectangle seen head-on has equal opposite sides; viewing it off-axis
//! shortens the far side. The ratio of opposite sides is used directly as a
//! tilt proxy, without recovering an actual angle.

use super::types::{Quad, Sides};
use crate::cfg::RatioScore;
use crate::error::EstimateError;

/// Signed tilt scores of a quadrilateral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadPose {
    /// Positive: camera above the target; negative: below.
    pub vertical_score: f64,
    /// Positive: camera left of the target; negative: right.
    pub horizontal_score: f64,
}

#[inline]
pub fn sides_length(q: &Quad) -> (f64, f64, f64, f64) {
    q.sides().as_tuple()
}

/// `r - 1` for `r = a/b >= 1`, otherwise `-r`.
///
/// Note the asymmetry: `signed_ratio(10, 5) == 1.0` but
/// `signed_ratio(5, 10) == -0.5`. `b == 0` is the caller's problem; the
/// orientation functions check sides first.
#[inline]
pub fn signed_ratio(a: f64, b: f64) -> f64 {
    let r = a / b;
    if r >= 1.0 {
        r - 1.0
    } else {
        -r
    }
}

/// `r - 1` for `r >= 1`, otherwise `1 - 1/r`; `symmetric_ratio(b, a) == -symmetric_ratio(a, b)`.
#[inline]
pub fn symmetric_ratio(a: f64, b: f64) -> f64 {
    let r = a / b;
    if r >= 1.0 {
        r - 1.0
    } else {
        1.0 - 1.0 / r
    }
}

#[inline]
pub fn ratio_score(a: f64, b: f64, score: RatioScore) -> f64 {
    match score {
        RatioScore::Compat => signed_ratio(a, b),
        RatioScore::Symmetric => symmetric_ratio(a, b),
    }
}

fn checked_sides(q: &Quad) -> Result<Sides, EstimateError> {
    let s = q.sides();
    s.check_nondegenerate()?;
    Ok(s)
}

/// `signed_ratio(side2, side4)`.
pub fn vertical_orientation(q: &Quad) -> Result<f64, EstimateError> {
    let s = checked_sides(q)?;
    Ok(signed_ratio(s.s2, s.s4))
}

/// `signed_ratio(side1, side3)`.
pub fn horizontal_orientation(q: &Quad) -> Result<f64, EstimateError> {
    let s = checked_sides(q)?;
    Ok(signed_ratio(s.s1, s.s3))
}

/// Both scores under the chosen ratio mapping.
pub fn quad_pose(q: &Quad, score: RatioScore) -> Result<QuadPose, EstimateError> {
    let s = checked_sides(q)?;
    Ok(QuadPose {
        vertical_score: ratio_score(s.s2, s.s4, score),
        horizontal_score: ratio_score(s.s1, s.s3, score),
    })
}
