//! End-to-end estimators over raw front-end primitives.
//!
//! Each call takes the candidates of one image and returns the dominant
//! primitive (for overlays) together with the orientation result. Calls are
//! independent; the same input always yields the same output.

use nalgebra::Vector2;

use crate::cfg::EstimatorCfg;
use crate::error::EstimateError;
use crate::frame::ImageDims;
use crate::geom::Segment;
use crate::line::{line_pose, select_dominant_line, DominantLine, LinePose};
use crate::quad::{filter_quadrilaterals, quad_pose, select_dominant, DominantQuad, QuadPose};

/// Orientation of the camera relative to the target, per estimator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrientationResult {
    Line(LinePose),
    Quad(QuadPose),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineEstimate {
    pub dominant: DominantLine,
    pub pose: LinePose,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadEstimate {
    pub dominant: DominantQuad,
    /// Four-vertex polygons among the input.
    pub quad_candidates: usize,
    pub pose: QuadPose,
}

impl LineEstimate {
    #[inline]
    pub fn result(&self) -> OrientationResult {
        OrientationResult::Line(self.pose)
    }
}

impl QuadEstimate {
    #[inline]
    pub fn result(&self) -> OrientationResult {
        OrientationResult::Quad(self.pose)
    }
}

/// Line path: longest segment → angle + centerline offset.
pub fn estimate_from_lines(
    segments: &[Segment],
    frame: ImageDims,
    cfg: &EstimatorCfg,
) -> Result<LineEstimate, EstimateError> {
    frame.check()?;
    cfg.check()?;
    let dominant = select_dominant_line(segments, cfg.extension_factor)?;
    let pose = line_pose(&dominant, frame)?;
    tracing::debug!(
        angle = pose.angle_degrees,
        offset = pose.horizontal_offset_px,
        "line estimate"
    );
    Ok(LineEstimate { dominant, pose })
}

/// Quadrilateral path: 4-vertex filter → dominant by area → side-ratio scores.
///
/// An empty polygon list is `EmptyInput`; a non-empty list without a usable
/// quadrilateral goes through the configured fallback.
pub fn estimate_from_polygons<P: AsRef<[Vector2<f64>]>>(
    polygons: &[P],
    frame: ImageDims,
    cfg: &EstimatorCfg,
) -> Result<QuadEstimate, EstimateError> {
    frame.check()?;
    cfg.check()?;
    if polygons.is_empty() {
        return Err(EstimateError::EmptyInput { what: "polygons" });
    }
    let quads = filter_quadrilaterals(polygons);
    let dominant = select_dominant(&quads, frame, cfg)?;
    let pose = quad_pose(&dominant.quad, cfg.ratio)?;
    tracing::debug!(
        vertical = pose.vertical_score,
        horizontal = pose.horizontal_score,
        "quadrilateral estimate"
    );
    Ok(QuadEstimate {
        dominant,
        quad_candidates: quads.len(),
        pose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::QuadFallback;
    use crate::quad::QuadSource;
    use nalgebra::vector;

    fn frame() -> ImageDims {
        ImageDims::new(480, 640)
    }

    fn window_polygons() -> Vec<Vec<Vector2<f64>>> {
        vec![
            // border artifact
            vec![
                vector![0.0, 0.0],
                vector![0.0, 480.0],
                vector![640.0, 480.0],
                vector![640.0, 0.0],
            ],
            // triangle noise
            vec![vector![5.0, 5.0], vector![25.0, 5.0], vector![5.0, 30.0]],
            // window, right edge taller than left
            vec![
                vector![200.0, 150.0],
                vector![200.0, 330.0],
                vector![440.0, 350.0],
                vector![440.0, 130.0],
            ],
        ]
    }

    #[test]
    fn quad_path_picks_window_and_scores_it() {
        let est = estimate_from_polygons(&window_polygons(), frame(), &EstimatorCfg::default())
            .unwrap();
        assert_eq!(est.quad_candidates, 2);
        assert_eq!(est.dominant.source, QuadSource::Candidate { index: 1 });
        // side2 (right, 220) longer than side4 (left, 180): positive vertical score
        assert!((est.pose.vertical_score - (220.0 / 180.0 - 1.0)).abs() < 1e-12);
        // side1 and side3 are mirror images: zero horizontal score
        assert!(est.pose.horizontal_score.abs() < 1e-12);
        assert!(matches!(est.result(), OrientationResult::Quad(_)));
    }

    #[test]
    fn quad_path_empty_vs_no_candidate() {
        let none: Vec<Vec<Vector2<f64>>> = Vec::new();
        assert_eq!(
            estimate_from_polygons(&none, frame(), &EstimatorCfg::default()),
            Err(EstimateError::EmptyInput { what: "polygons" })
        );
        let only_tri = vec![vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]]];
        assert_eq!(
            estimate_from_polygons(&only_tri, frame(), &EstimatorCfg::default()),
            Err(EstimateError::NoDominantCandidate { candidates: 0 })
        );
        let cfg = EstimatorCfg {
            fallback: QuadFallback::FullFrame,
            ..EstimatorCfg::default()
        };
        let est = estimate_from_polygons(&only_tri, frame(), &cfg).unwrap();
        assert_eq!(est.dominant.source, QuadSource::FullFrame);
    }

    #[test]
    fn line_path_end_to_end() {
        let segs = [
            Segment::from_coords([10.0, 10.0, 30.0, 12.0]),
            Segment::from_coords([300.0, 100.0, 300.0, 200.0]),
        ];
        let est = estimate_from_lines(&segs, frame(), &EstimatorCfg::default()).unwrap();
        assert_eq!(est.dominant.index, 1);
        assert_eq!(est.pose.angle_degrees, 90.0);
        assert_eq!(est.pose.horizontal_offset_px, 20.0);
        assert!(matches!(est.result(), OrientationResult::Line(_)));
    }

    #[test]
    fn bad_settings_fail_instead_of_shifting_the_offset() {
        // Line through (10,0) and (11,1) crosses y=50 at x=60: offset 40.
        let frame = ImageDims::new(100, 200);
        let segs = [Segment::from_coords([10.0, 0.0, 11.0, 1.0])];
        let ok = estimate_from_lines(&segs, frame, &EstimatorCfg::default()).unwrap();
        assert!((ok.pose.horizontal_offset_px - 40.0).abs() < 1e-9);

        for k in [-0.5, f64::NAN] {
            let cfg = EstimatorCfg {
                extension_factor: k,
                ..EstimatorCfg::default()
            };
            assert!(
                matches!(
                    estimate_from_lines(&segs, frame, &cfg),
                    Err(EstimateError::InvalidConfig { field: "extension_factor", .. })
                ),
                "k = {k}"
            );
        }

        // A threshold above 1 would let the border rectangle win.
        let border = vec![vec![
            vector![0.0, 0.0],
            vector![0.0, 100.0],
            vector![200.0, 100.0],
            vector![200.0, 0.0],
        ]];
        let cfg = EstimatorCfg {
            border_area_frac: 1.5,
            ..EstimatorCfg::default()
        };
        assert_eq!(
            estimate_from_polygons(&border, frame, &cfg),
            Err(EstimateError::InvalidConfig {
                field: "border_area_frac",
                value: 1.5
            })
        );
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let cfg = EstimatorCfg::default();
        let polys = window_polygons();
        let a = estimate_from_polygons(&polys, frame(), &cfg).unwrap();
        let b = estimate_from_polygons(&polys, frame(), &cfg).unwrap();
        assert_eq!(a.pose.vertical_score.to_bits(), b.pose.vertical_score.to_bits());
        assert_eq!(
            a.pose.horizontal_score.to_bits(),
            b.pose.horizontal_score.to_bits()
        );
        let segs = [Segment::from_coords([100.0, 0.0, 130.0, 90.0])];
        let x = estimate_from_lines(&segs, frame(), &cfg).unwrap();
        let y = estimate_from_lines(&segs, frame(), &cfg).unwrap();
        assert_eq!(
            x.pose.horizontal_offset_px.to_bits(),
            y.pose.horizontal_offset_px.to_bits()
        );
        assert_eq!(x.pose.angle_degrees.to_bits(), y.pose.angle_degrees.to_bits());
    }
}
