//! Failure outcomes of the estimators.
//!
//! Every variant is a normal, expected result for some input (noisy frames,
//! a perfectly horizontal edge, an empty contour set); callers choose whether
//! to skip the frame or fall back to the other estimator.

use std::fmt;

/// Errors surfaced by the line and quadrilateral estimators.
#[derive(Clone, Debug, PartialEq)]
pub enum EstimateError {
    /// No usable candidates: empty input, or only zero-length segments.
    EmptyInput { what: &'static str },
    /// The dominant line is parallel to the horizontal centerline.
    NoIntersection,
    /// A quadrilateral side has zero (or non-finite) length; `side` is 1-based.
    DegenerateQuadrilateral { side: usize },
    /// No quadrilateral fell below the border-area threshold and the
    /// fallback policy is `QuadFallback::NotFound`.
    NoDominantCandidate { candidates: usize },
    /// Image dimensions cannot bound a frame.
    InvalidFrame { height: u32, width: u32 },
    /// An estimator setting is out of range; `field` names the setting.
    InvalidConfig { field: &'static str, value: f64 },
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput { what } => write!(f, "no usable candidate {what}"),
            Self::NoIntersection => write!(
                f,
                "dominant line is parallel to the horizontal centerline (offset undefined)"
            ),
            Self::DegenerateQuadrilateral { side } => {
                write!(f, "quadrilateral side {side} has zero length")
            }
            Self::NoDominantCandidate { candidates } => write!(
                f,
                "none of {candidates} quadrilateral(s) is below the image-border area threshold"
            ),
            Self::InvalidFrame { height, width } => {
                write!(f, "invalid frame dimensions {height}x{width} (height x width)")
            }
            Self::InvalidConfig { field, value } => {
                write!(f, "invalid estimator setting {field} = {value}")
            }
        }
    }
}

impl std::error::Error for EstimateError {}
