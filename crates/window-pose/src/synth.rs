//! Synthetic front-end output (window + clutter) for demos, tests and benches.
//!
//! Model
//! - A window is a rectangle centered near the image middle whose left/right
//!   edges and top/bottom edges are shortened independently, mimicking the
//!   foreshortening of an off-axis view. Vertices follow contour order
//!   TL, BL, BR, TR.
//! - Clutter: optionally the frame-border rectangle, small quadrilaterals,
//!   triangles and pentagons, and short noise segments. The window's longer
//!   vertical edge is emitted as a segment and is always the longest one.
//! - Determinism uses a replay token `(seed, index)` mixed into one RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::frame::ImageDims;
use crate::geom::Segment;
use crate::quad::Quad;

/// Synthetic frame parameters.
#[derive(Clone, Copy, Debug)]
pub struct SynthCfg {
    pub frame: ImageDims,
    /// Largest relative shortening of one edge against its opposite, in [0, 0.45].
    pub max_skew: f64,
    pub noise_segments: usize,
    pub noise_polygons: usize,
    /// Emit the full-frame rectangle that contour tracing tends to produce.
    pub include_border: bool,
}

impl Default for SynthCfg {
    fn default() -> Self {
        Self {
            frame: ImageDims::new(480, 640),
            max_skew: 0.3,
            noise_segments: 12,
            noise_polygons: 8,
            include_border: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer on seed and index.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// One frame worth of candidates plus the ground truth they were built from.
#[derive(Clone, Debug)]
pub struct SyntheticFrame {
    pub frame: ImageDims,
    pub segments: Vec<Segment>,
    pub polygons: Vec<Vec<Vector2<f64>>>,
    /// Index of the window in `polygons`.
    pub window_index: usize,
    pub window: Quad,
    /// Index of the window edge in `segments`.
    pub edge_index: usize,
    pub edge: Segment,
}

pub fn draw_frame(cfg: SynthCfg, tok: ReplayToken) -> SyntheticFrame {
    let mut rng = tok.to_std_rng();
    let w = f64::from(cfg.frame.width.max(16));
    let h = f64::from(cfg.frame.height.max(16));
    let skew = cfg.max_skew.clamp(0.0, 0.45);

    // Window: nominal box 40–60% of the frame, jittered around the center.
    let bw = w * rng.gen_range(0.4..0.6);
    let bh = h * rng.gen_range(0.4..0.6);
    let cx = w / 2.0 + rng.gen_range(-0.1..0.1) * w;
    let cy = h / 2.0 + rng.gen_range(-0.1..0.1) * h;
    let shrink_h = rng.gen_range(-skew..=skew);
    let shrink_v = rng.gen_range(-skew..=skew);
    // positive shrink_h shortens the right edge, negative the left one
    let (left_h, right_h) = (bh * (1.0 - shrink_h.min(0.0).abs()), bh * (1.0 - shrink_h.max(0.0)));
    let (top_w, bottom_w) = (bw * (1.0 - shrink_v.min(0.0).abs()), bw * (1.0 - shrink_v.max(0.0)));
    let tl = Vector2::new(cx - top_w / 2.0, cy - left_h / 2.0);
    let bl = Vector2::new(cx - bottom_w / 2.0, cy + left_h / 2.0);
    let br = Vector2::new(cx + bottom_w / 2.0, cy + right_h / 2.0);
    let tr = Vector2::new(cx + top_w / 2.0, cy - right_h / 2.0);
    let window = Quad::new([tl, bl, br, tr]);

    let mut polygons: Vec<Vec<Vector2<f64>>> = Vec::with_capacity(cfg.noise_polygons + 2);
    if cfg.include_border {
        polygons.push(Quad::full_frame(cfg.frame).v.to_vec());
    }
    // Clutter stays small (radius ≤ 5% of the short side) so it never outranks the window.
    let r_max = 0.05 * w.min(h);
    let mut clutter: Vec<Vec<Vector2<f64>>> = (0..cfg.noise_polygons)
        .map(|_| {
            let n = rng.gen_range(3..=6usize);
            let c = Vector2::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h));
            let r = rng.gen_range(0.2 * r_max..r_max);
            let phase = rng.gen::<f64>() * std::f64::consts::TAU;
            (0..n)
                .map(|k| {
                    let t = phase + k as f64 * std::f64::consts::TAU / n as f64;
                    c + Vector2::new(t.cos(), t.sin()) * r
                })
                .collect()
        })
        .collect();
    let window_slot = rng.gen_range(0..=clutter.len());
    clutter.insert(window_slot, window.v.to_vec());
    let window_index = polygons.len() + window_slot;
    polygons.extend(clutter);

    // The longer vertical window edge.
    let edge = if left_h >= right_h {
        Segment::new(tl, bl)
    } else {
        Segment::new(tr, br)
    };
    let seg_max = 0.5 * left_h.min(right_h).min(r_max * 4.0);
    let mut segments: Vec<Segment> = (0..cfg.noise_segments)
        .map(|_| {
            let p = Vector2::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h));
            let t = rng.gen::<f64>() * std::f64::consts::TAU;
            let len = rng.gen_range(0.1 * seg_max..seg_max);
            Segment::new(p, p + Vector2::new(t.cos(), t.sin()) * len)
        })
        .collect();
    let edge_index = rng.gen_range(0..=segments.len());
    segments.insert(edge_index, edge);

    SyntheticFrame {
        frame: cfg.frame,
        segments,
        polygons,
        window_index,
        window,
        edge_index,
        edge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::EstimatorCfg;
    use crate::estimate::{estimate_from_lines, estimate_from_polygons};
    use crate::quad::{filter_quadrilaterals, QuadSource};

    #[test]
    fn replay_is_deterministic() {
        let tok = ReplayToken { seed: 11, index: 3 };
        let a = draw_frame(SynthCfg::default(), tok);
        let b = draw_frame(SynthCfg::default(), tok);
        assert_eq!(a.polygons, b.polygons);
        assert_eq!(a.segments, b.segments);
        let c = draw_frame(SynthCfg::default(), ReplayToken { seed: 11, index: 4 });
        assert_ne!(a.polygons, c.polygons);
    }

    #[test]
    fn estimators_recover_the_window() {
        let cfg = EstimatorCfg::default();
        for index in 0..25 {
            let s = draw_frame(SynthCfg::default(), ReplayToken { seed: 2024, index });
            let quad = estimate_from_polygons(&s.polygons, s.frame, &cfg).unwrap();
            assert_eq!(quad.dominant.quad, s.window, "draw {index}");
            assert!(matches!(quad.dominant.source, QuadSource::Candidate { .. }));
            let line = estimate_from_lines(&s.segments, s.frame, &cfg).unwrap();
            assert_eq!(line.dominant.index, s.edge_index, "draw {index}");
            assert_eq!(line.dominant.segment, s.edge);
        }
    }

    #[test]
    fn window_index_points_at_window() {
        let s = draw_frame(SynthCfg::default(), ReplayToken { seed: 5, index: 0 });
        assert_eq!(s.polygons[s.window_index], s.window.v.to_vec());
        assert_eq!(s.segments[s.edge_index], s.edge);
        // border + window + every 4-gon of the clutter
        assert!(filter_quadrilaterals(&s.polygons).len() >= 2);
    }
}
