//! Basic 2D types for the line/segment kernel.
//!
//! - `Segment`: finite segment `p1 → p2`, also read as the infinite line through it.
//! - `LineEq`: slope/intercept form with vertical lines as a tagged variant.
//!
//! Coordinates are image pixels (x right, y down). Nothing here assumes a
//! particular image size.

use nalgebra::Vector2;

/// Finite segment between two points.
///
/// Intended to satisfy `p1 != p2`; a zero-length segment still has a
/// well-defined (vertical) `LineEq` but zero length and is never picked as
/// dominant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub p1: Vector2<f64>,
    pub p2: Vector2<f64>,
}

impl Segment {
    #[inline]
    pub fn new(p1: Vector2<f64>, p2: Vector2<f64>) -> Self {
        Self { p1, p2 }
    }

    /// Build from the `[x1, y1, x2, y2]` layout produced by probabilistic Hough.
    #[inline]
    pub fn from_coords(c: [f64; 4]) -> Self {
        Self {
            p1: Vector2::new(c[0], c[1]),
            p2: Vector2::new(c[2], c[3]),
        }
    }

    #[inline]
    pub fn to_coords(&self) -> [f64; 4] {
        [self.p1.x, self.p1.y, self.p2.x, self.p2.y]
    }

    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.p2 - self.p1
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Slope/intercept form of the supporting line.
    #[inline]
    pub fn line_eq(&self) -> LineEq {
        LineEq::through(self.p1, self.p2)
    }

    /// Push both endpoints outward by `factor` times the direction vector:
    /// `p1 - k·d`, `p2 + k·d`. The direction (and hence the line) is unchanged.
    #[inline]
    pub fn extended(&self, factor: f64) -> Segment {
        let d = self.direction() * factor;
        Segment {
            p1: self.p1 - d,
            p2: self.p2 + d,
        }
    }
}

/// Infinite line in slope/intercept form.
///
/// `Vertical { x }` stands in for the infinite slope so no comparison ever sees
/// an `inf` or `NaN`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineEq {
    Vertical { x: f64 },
    Sloped { m: f64, b: f64 },
}

impl LineEq {
    /// Line through `p` and `q`; `p.x == q.x` gives `Vertical`.
    pub fn through(p: Vector2<f64>, q: Vector2<f64>) -> Self {
        let dx = q.x - p.x;
        if dx == 0.0 {
            LineEq::Vertical { x: p.x }
        } else {
            let m = (q.y - p.y) / dx;
            LineEq::Sloped { m, b: p.y - m * p.x }
        }
    }

    /// Same slope, vertical counting as one shared slope. Coincident lines are parallel.
    #[inline]
    pub fn is_parallel(&self, other: &LineEq) -> bool {
        match (self, other) {
            (LineEq::Vertical { .. }, LineEq::Vertical { .. }) => true,
            (LineEq::Sloped { m: m1, .. }, LineEq::Sloped { m: m2, .. }) => m1 == m2,
            _ => false,
        }
    }

    /// Unique crossing point, `None` for parallel (or coincident) lines.
    pub fn intersection(&self, other: &LineEq) -> Option<Vector2<f64>> {
        if self.is_parallel(other) {
            return None;
        }
        match (*self, *other) {
            (LineEq::Vertical { x }, LineEq::Sloped { m, b })
            | (LineEq::Sloped { m, b }, LineEq::Vertical { x }) => Some(Vector2::new(x, m * x + b)),
            (LineEq::Sloped { m: m1, b: b1 }, LineEq::Sloped { m: m2, b: b2 }) => {
                let x = (b2 - b1) / (m1 - m2);
                Some(Vector2::new(x, m1 * x + b1))
            }
            // Both vertical is parallel and handled above.
            (LineEq::Vertical { .. }, LineEq::Vertical { .. }) => None,
        }
    }

    /// Residual check `|y - (m x + b)| <= eps·scale` (or `|x - x0|` for vertical).
    ///
    /// `scale = max(1, |value|)`, so `eps` acts as a relative tolerance on
    /// large coordinates and an absolute one near the origin.
    pub fn contains_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        match *self {
            LineEq::Vertical { x } => (p.x - x).abs() <= eps * x.abs().max(1.0),
            LineEq::Sloped { m, b } => {
                let y = m * p.x + b;
                (p.y - y).abs() <= eps * y.abs().max(p.y.abs()).max(1.0)
            }
        }
    }
}
