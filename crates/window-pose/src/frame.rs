//! Image frame dimensions.
//!
//! Only the size of the source image matters to the estimators: it bounds the
//! quadrilateral area and places the horizontal centerline.

use nalgebra::Vector2;

use crate::error::EstimateError;
use crate::geom::Segment;

/// Source image size in pixels, `(height, width)` like an image shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageDims {
    pub height: u32,
    pub width: u32,
}

impl ImageDims {
    #[inline]
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Reject frames with a zero dimension.
    pub fn check(&self) -> Result<(), EstimateError> {
        if self.height == 0 || self.width == 0 {
            return Err(EstimateError::InvalidFrame {
                height: self.height,
                width: self.width,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn area(&self) -> f64 {
        f64::from(self.height) * f64::from(self.width)
    }

    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Horizontal mid-line `(0, h/2) → (w, h/2)`.
    pub fn centerline(&self) -> Segment {
        let y = f64::from(self.height) / 2.0;
        Segment::new(Vector2::new(0.0, y), Vector2::new(f64::from(self.width), y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centerline_spans_width_at_half_height() {
        let f = ImageDims::new(100, 200);
        let c = f.centerline();
        assert_eq!(c.to_coords(), [0.0, 50.0, 200.0, 50.0]);
        assert_eq!(f.center(), Vector2::new(100.0, 50.0));
        assert_eq!(f.area(), 20_000.0);
    }

    #[test]
    fn zero_dimension_is_invalid() {
        assert!(ImageDims::new(480, 640).check().is_ok());
        assert_eq!(
            ImageDims::new(0, 640).check(),
            Err(EstimateError::InvalidFrame {
                height: 0,
                width: 640
            })
        );
    }
}
