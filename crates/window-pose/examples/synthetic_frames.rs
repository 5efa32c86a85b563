//! Run both estimators on a few synthetic frames and print the results.
//!
//! Usage:
//!   cargo run -p window-pose --example synthetic_frames -- [seed]

use window_pose::synth::{draw_frame, ReplayToken, SynthCfg};
use window_pose::{estimate_from_lines, estimate_from_polygons, EstimatorCfg};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2025u64);
    let cfg = EstimatorCfg::default();
    for index in 0..5 {
        let s = draw_frame(SynthCfg::default(), ReplayToken { seed, index });
        match estimate_from_polygons(&s.polygons, s.frame, &cfg) {
            Ok(q) => println!(
                "frame {index}: vertical={:+.4} horizontal={:+.4} (area {:.0})",
                q.pose.vertical_score, q.pose.horizontal_score, q.dominant.area
            ),
            Err(e) => println!("frame {index}: quadrilateral path failed: {e}"),
        }
        match estimate_from_lines(&s.segments, s.frame, &cfg) {
            Ok(l) => println!(
                "frame {index}: angle={:+.2}° offset={:+.1}px",
                l.pose.angle_degrees, l.pose.horizontal_offset_px
            ),
            Err(e) => println!("frame {index}: line path failed: {e}"),
        }
    }
}
