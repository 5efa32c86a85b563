//! Quadrilateral and side-length types.
//!
//! Vertex order is whatever contour tracing produced. Sides are paired by
//! that order:
//! - side1 = v1–v4, side2 = v4–v3, side3 = v3–v2, side4 = v2–v1;
//! - side1 faces side3, side2 faces side4.

use nalgebra::Vector2;

use crate::error::EstimateError;
use crate::frame::ImageDims;
use crate::geom::distance;

/// Four vertices in contour order. Convexity is not assumed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub v: [Vector2<f64>; 4],
}

/// Side lengths under the fixed pairing convention.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sides {
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
    pub s4: f64,
}

impl Quad {
    #[inline]
    pub fn new(v: [Vector2<f64>; 4]) -> Self {
        Self { v }
    }

    /// `Some` only for polygons with exactly four vertices.
    pub fn from_polygon(poly: &[Vector2<f64>]) -> Option<Self> {
        let v: [Vector2<f64>; 4] = poly.try_into().ok()?;
        Some(Self { v })
    }

    /// Rectangle on the frame border, traced top-left, bottom-left,
    /// bottom-right, top-right.
    pub fn full_frame(frame: ImageDims) -> Self {
        let w = f64::from(frame.width);
        let h = f64::from(frame.height);
        Self {
            v: [
                Vector2::new(0.0, 0.0),
                Vector2::new(0.0, h),
                Vector2::new(w, h),
                Vector2::new(w, 0.0),
            ],
        }
    }

    pub fn sides(&self) -> Sides {
        let [v1, v2, v3, v4] = self.v;
        Sides {
            s1: distance(v1, v4),
            s2: distance(v4, v3),
            s3: distance(v3, v2),
            s4: distance(v2, v1),
        }
    }

    /// Absolute shoelace area of the closed vertex loop.
    pub fn shoelace_area(&self) -> f64 {
        let mut twice = 0.0;
        for k in 0..4 {
            let p = self.v[k];
            let q = self.v[(k + 1) % 4];
            twice += p.x * q.y - q.x * p.y;
        }
        twice.abs() / 2.0
    }
}

impl Sides {
    #[inline]
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.s1, self.s2, self.s3, self.s4)
    }

    /// First side (1-based) that is zero-length or non-finite.
    pub fn check_nondegenerate(&self) -> Result<(), EstimateError> {
        let all = [self.s1, self.s2, self.s3, self.s4];
        match all.iter().position(|s| !(s.is_finite() && *s > 0.0)) {
            Some(k) => Err(EstimateError::DegenerateQuadrilateral { side: k + 1 }),
            None => Ok(()),
        }
    }
}
