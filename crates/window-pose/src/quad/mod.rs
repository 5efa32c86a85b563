//! Quadrilateral path: filter, select, score.
//!
//! Purpose
//! - Reduce approximated contours to four-vertex candidates, pick the target
//!   opening by area while skipping the image-border artifact, and turn its
//!   opposite-side ratios into vertical/horizontal tilt scores.
//!
//! Code cross-refs: `cfg::{AreaModel, QuadFallback, RatioScore}`, `estimate::estimate_from_polygons`.

mod orient;
mod select;
mod types;

pub use orient::{
    horizontal_orientation, quad_pose, ratio_score, sides_length, signed_ratio, symmetric_ratio,
    vertical_orientation, QuadPose,
};
pub use select::{
    approx_area, filter_quadrilaterals, largest_below, quad_area, select_dominant, DominantQuad,
    QuadSource,
};
pub use types::{Quad, Sides};
