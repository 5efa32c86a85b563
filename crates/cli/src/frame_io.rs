//! JSON shapes exchanged with the vision front-end and the presentation side.
//!
//! Input frame:
//! `{"id": "...", "height": 480, "width": 640, "segments": [[x1,y1,x2,y2], ...],
//!   "polygons": [[[x,y], ...], ...]}`. `id`, `segments` and `polygons` are optional.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use window_pose::estimate::{LineEstimate, QuadEstimate};
use window_pose::geom::Segment;
use window_pose::quad::QuadSource;
use window_pose::synth::SyntheticFrame;
use window_pose::{ImageDims, Vec2};

/// Candidates for one image as produced by the front-end.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub height: u32,
    pub width: u32,
    #[serde(default)]
    pub segments: Vec<[f64; 4]>,
    #[serde(default)]
    pub polygons: Vec<Vec<[f64; 2]>>,
}

impl FrameInput {
    pub fn dims(&self) -> ImageDims {
        ImageDims::new(self.height, self.width)
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.segments.iter().copied().map(Segment::from_coords).collect()
    }

    pub fn polygons(&self) -> Vec<Vec<Vec2<f64>>> {
        self.polygons
            .iter()
            .map(|p| p.iter().map(|&[x, y]| Vec2::new(x, y)).collect())
            .collect()
    }

    pub fn from_synthetic(s: &SyntheticFrame, id: Option<String>) -> Self {
        Self {
            id,
            height: s.frame.height,
            width: s.frame.width,
            segments: s.segments.iter().map(Segment::to_coords).collect(),
            polygons: s
                .polygons
                .iter()
                .map(|p| p.iter().map(|v| [v.x, v.y]).collect())
                .collect(),
        }
    }
}

pub fn read_frame(path: &Path) -> Result<FrameInput> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing frame {}", path.display()))
}

/// One frame per non-empty line.
pub fn read_frames_jsonl(path: &Path) -> Result<Vec<FrameInput>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(n, l)| {
            serde_json::from_str(l)
                .with_context(|| format!("parsing {} line {}", path.display(), n + 1))
        })
        .collect()
}

/// Result of one estimator, with the primitive a presentation layer would draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum EstimateReport {
    Line {
        angle_degrees: f64,
        horizontal_offset_px: f64,
        segment_index: usize,
        segment: [f64; 4],
        extended: [f64; 4],
        centerline: [f64; 4],
        /// Image center; the offset is measured from here along the centerline.
        center: [f64; 2],
    },
    Quad {
        vertical_score: f64,
        horizontal_score: f64,
        /// Index among the four-vertex candidates; absent for the full-frame fallback.
        quad_index: Option<usize>,
        quad: [[f64; 2]; 4],
        area: f64,
    },
}

impl EstimateReport {
    pub fn from_line(est: &LineEstimate, dims: ImageDims) -> Self {
        Self::Line {
            angle_degrees: est.pose.angle_degrees,
            horizontal_offset_px: est.pose.horizontal_offset_px,
            segment_index: est.dominant.index,
            segment: est.dominant.segment.to_coords(),
            extended: est.dominant.extended.to_coords(),
            centerline: dims.centerline().to_coords(),
            center: [dims.center().x, dims.center().y],
        }
    }

    pub fn from_quad(est: &QuadEstimate) -> Self {
        let quad_index = match est.dominant.source {
            QuadSource::Candidate { index } => Some(index),
            QuadSource::FullFrame => None,
        };
        Self::Quad {
            vertical_score: est.pose.vertical_score,
            horizontal_score: est.pose.horizontal_score,
            quad_index,
            quad: est.dominant.quad.v.map(|v| [v.x, v.y]),
            area: est.dominant.area,
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Quad { .. } => "quad",
        }
    }
}

/// Per-frame output line.
#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub estimate: EstimateReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn frame_json_defaults_optional_fields() {
        let f: FrameInput = serde_json::from_str(r#"{"height": 10, "width": 20}"#).unwrap();
        assert_eq!(f.dims(), ImageDims::new(10, 20));
        assert!(f.segments.is_empty() && f.polygons.is_empty() && f.id.is_none());
    }

    #[test]
    fn frame_converts_to_library_types() {
        let f: FrameInput = serde_json::from_str(
            r#"{"height": 100, "width": 200,
                "segments": [[0, 50, 100, 50]],
                "polygons": [[[0,0],[0,1],[1,1],[1,0]], [[0,0],[1,0],[0,1]]]}"#,
        )
        .unwrap();
        assert_eq!(f.segments()[0], Segment::from_coords([0.0, 50.0, 100.0, 50.0]));
        let polys = f.polygons();
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0][2], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn jsonl_skips_blank_lines_and_names_bad_line() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.jsonl");
        fs::write(
            &good,
            "{\"id\":\"a\",\"height\":1,\"width\":1}\n\n{\"id\":\"b\",\"height\":2,\"width\":2}\n",
        )
        .unwrap();
        let frames = read_frames_jsonl(&good).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].id.as_deref(), Some("b"));

        let bad = dir.path().join("bad.jsonl");
        fs::write(&bad, "{\"height\":1,\"width\":1}\nnot json\n").unwrap();
        let err = format!("{:#}", read_frames_jsonl(&bad).unwrap_err());
        assert!(err.contains("line 2"), "{err}");
    }

    #[test]
    fn line_report_carries_overlay_geometry() {
        let dims = ImageDims::new(100, 200);
        let segs = [Segment::from_coords([150.0, 0.0, 150.0, 30.0])];
        let est = window_pose::estimate_from_lines(&segs, dims, &window_pose::EstimatorCfg::default())
            .unwrap();
        let v = serde_json::to_value(EstimateReport::from_line(&est, dims)).unwrap();
        assert_eq!(v["method"], "line");
        assert_eq!(v["horizontal_offset_px"], -50.0);
        assert_eq!(v["center"], serde_json::json!([100.0, 50.0]));
        assert_eq!(v["centerline"], serde_json::json!([0.0, 50.0, 200.0, 50.0]));
    }

    #[test]
    fn report_is_tagged_by_method() {
        let rep = EstimateReport::Quad {
            vertical_score: 1.0,
            horizontal_score: -0.5,
            quad_index: None,
            quad: [[0.0, 0.0]; 4],
            area: 0.0,
        };
        let v = serde_json::to_value(FrameReport {
            id: Some("f1".into()),
            estimate: rep,
        })
        .unwrap();
        assert_eq!(v["method"], "quad");
        assert_eq!(v["id"], "f1");
        assert_eq!(v["horizontal_score"], -0.5);
        assert!(v["quad_index"].is_null());
    }
}
