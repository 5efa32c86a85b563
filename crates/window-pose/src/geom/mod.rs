//! 2D line geometry for pose heuristics.
//!
//! Purpose
//! - Segment/line types and the three primitives the estimators rely on:
//!   line–line intersection, Euclidean distance, inclination angle.
//! - Vertical lines are a tagged `LineEq::Vertical` branch; no float infinity
//!   ever enters the arithmetic.
//!
//! Code cross-refs: `line::select_dominant_line`, `line::horizontal_offset`,
//! `quad::Quad::sides`.

mod kernel;
mod types;

pub use kernel::{angle_degrees, distance, intersect};
pub use types::{LineEq, Segment};
