//! Dominant-line selection and the line-based orientation estimate.
//!
//! Purpose
//! - Pick the longest segment among Hough candidates and extend it so it is
//!   guaranteed to reach the image's horizontal centerline.
//! - Report the segment's inclination and where it crosses the centerline
//!   relative to the image center.
//!
//! Code cross-refs: `geom::{intersect, angle_degrees}`, `frame::ImageDims::centerline`.

use crate::cfg::check_extension_factor;
use crate::error::EstimateError;
use crate::frame::ImageDims;
use crate::geom::{angle_degrees, intersect, Segment};

/// Longest candidate and its pseudo-infinite extension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DominantLine {
    /// Position in the candidate slice.
    pub index: usize,
    pub segment: Segment,
    pub extended: Segment,
}

/// Line-based orientation: inclination and signed centerline offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePose {
    pub angle_degrees: f64,
    /// `width/2 - x` of the centerline crossing; positive left of center.
    pub horizontal_offset_px: f64,
}

/// Longest segment (first one wins ties), extended by `extension_factor`.
///
/// Zero-length segments never win; if nothing has positive length the input
/// counts as empty. `extension_factor` must be finite and non-negative.
pub fn select_dominant_line(
    candidates: &[Segment],
    extension_factor: f64,
) -> Result<DominantLine, EstimateError> {
    check_extension_factor(extension_factor)?;
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in candidates.iter().enumerate() {
        let len = s.length();
        if len > best.map_or(0.0, |(_, l)| l) {
            best = Some((i, len));
        }
    }
    let (index, length) = best.ok_or(EstimateError::EmptyInput { what: "segments" })?;
    let segment = candidates[index];
    tracing::debug!(
        index,
        length,
        candidates = candidates.len(),
        "dominant line selected"
    );
    Ok(DominantLine {
        index,
        segment,
        extended: segment.extended(extension_factor),
    })
}

/// Signed distance from the image center to where `line` crosses the
/// horizontal centerline: `width/2 - x`.
///
/// `line` is read as infinite, so the extended and raw segments give the same
/// answer. Horizontal lines never cross and yield `NoIntersection`.
pub fn horizontal_offset(line: &Segment, frame: ImageDims) -> Result<f64, EstimateError> {
    frame.check()?;
    let hit = intersect(line, &frame.centerline()).ok_or(EstimateError::NoIntersection)?;
    Ok(f64::from(frame.width) / 2.0 - hit.x)
}

/// Inclination of the dominant line in degrees; see `geom::angle_degrees`.
#[inline]
pub fn angle(line: &Segment) -> f64 {
    angle_degrees(line)
}

/// Angle of the raw segment plus centerline offset of its extension.
pub fn line_pose(dominant: &DominantLine, frame: ImageDims) -> Result<LinePose, EstimateError> {
    let horizontal_offset_px = horizontal_offset(&dominant.extended, frame)?;
    Ok(LinePose {
        angle_degrees: angle(&dominant.segment),
        horizontal_offset_px,
    })
}
