//! Camera pose heuristics against a planar rectangular target.
//!
//! Two estimators work on primitives handed over by an external vision
//! front-end (Hough segments, approximated contours):
//! - line path: the longest segment gives an inclination angle and the
//!   horizontal offset of its centerline crossing from the image center;
//! - quadrilateral path: the largest four-sided contour (excluding the image
//!   border) gives signed vertical/horizontal tilt scores from the ratios of
//!   its opposite sides.
//!
//! No calibration and no homography: the scores are 2D proxies, not angles.
//! All functions are pure; callers own retries and estimator fallback.

pub mod cfg;
pub mod error;
pub mod estimate;
pub mod frame;
pub mod geom;
pub mod line;
pub mod quad;
pub mod synth;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{AreaModel, EstimatorCfg, QuadFallback, RatioScore};
pub use error::EstimateError;
pub use estimate::{
    estimate_from_lines, estimate_from_polygons, LineEstimate, OrientationResult, QuadEstimate,
};
pub use frame::ImageDims;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for callers.
pub mod prelude {
    pub use crate::cfg::{AreaModel, EstimatorCfg, QuadFallback, RatioScore};
    pub use crate::error::EstimateError;
    pub use crate::estimate::{
        estimate_from_lines, estimate_from_polygons, LineEstimate, OrientationResult,
        QuadEstimate,
    };
    pub use crate::frame::ImageDims;
    pub use crate::geom::{angle_degrees, intersect, LineEq, Segment};
    pub use crate::line::{DominantLine, LinePose};
    pub use crate::quad::{DominantQuad, Quad, QuadPose, QuadSource};
    pub use nalgebra::Vector2 as Vec2;
}
