mod frame_io;
mod provenance;
mod table;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;
use window_pose::cfg::{DEFAULT_BORDER_AREA_FRAC, DEFAULT_EXTENSION_FACTOR};
use window_pose::synth::{draw_frame, ReplayToken, SynthCfg};
use window_pose::{
    estimate_from_lines, estimate_from_polygons, AreaModel, EstimateError, EstimatorCfg,
    ImageDims, QuadFallback, RatioScore,
};

use frame_io::{EstimateReport, FrameInput, FrameReport};
use table::BatchRow;

#[derive(Parser)]
#[command(name = "window-pose")]
#[command(about = "Camera orientation against a window from line/contour candidates")]
struct Cmd {
    /// Log selection decisions (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    est: EstimatorArgs,

    #[command(subcommand)]
    action: Action,
}

#[derive(Args)]
struct EstimatorArgs {
    /// Extension of the dominant segment, in multiples of its length per side
    #[arg(long, global = true, default_value_t = DEFAULT_EXTENSION_FACTOR)]
    extension_factor: f64,
    /// Quadrilaterals at or above this share of the image area are ignored
    #[arg(long, global = true, default_value_t = DEFAULT_BORDER_AREA_FRAC)]
    border_area_frac: f64,
    /// When no quadrilateral qualifies: not-found | full-frame
    #[arg(long, global = true, default_value_t = QuadFallback::NotFound)]
    fallback: QuadFallback,
    /// Quadrilateral area measure: adjacent-sides | shoelace
    #[arg(long, global = true, default_value_t = AreaModel::AdjacentSides)]
    area: AreaModel,
    /// Side-ratio score: compat | symmetric
    #[arg(long, global = true, default_value_t = RatioScore::Compat)]
    ratio: RatioScore,
}

impl EstimatorArgs {
    fn cfg(&self) -> Result<EstimatorCfg> {
        let cfg = EstimatorCfg {
            extension_factor: self.extension_factor,
            border_area_frac: self.border_area_frac,
            fallback: self.fallback,
            area: self.area,
            ratio: self.ratio,
        };
        cfg.check().context("estimator flags")?;
        Ok(cfg)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Dominant line: angle and centerline offset
    Line,
    /// Dominant quadrilateral: vertical and horizontal scores
    Quad,
    /// Quadrilateral first, line when that fails
    Auto,
}

#[derive(Subcommand)]
enum Action {
    /// Line estimate for one frame JSON
    Line {
        #[arg(long)]
        input: PathBuf,
    },
    /// Quadrilateral estimate for one frame JSON
    Quad {
        #[arg(long)]
        input: PathBuf,
    },
    /// Quadrilateral estimate, falling back to the line estimate
    Auto {
        #[arg(long)]
        input: PathBuf,
    },
    /// Estimate every frame of a JSON Lines file and write a CSV table
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = Method::Auto)]
        method: Method,
    },
    /// Write synthetic frames (one JSON object, or JSON Lines when count > 1)
    Synth {
        #[arg(long, default_value_t = 2025)]
        seed: u64,
        #[arg(long, default_value_t = 1)]
        count: u64,
        #[arg(long, default_value_t = 480)]
        height: u32,
        #[arg(long, default_value_t = 640)]
        width: u32,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let cfg = cmd.est.cfg()?;
    match cmd.action {
        Action::Line { input } => single(&input, Method::Line, &cfg),
        Action::Quad { input } => single(&input, Method::Quad, &cfg),
        Action::Auto { input } => single(&input, Method::Auto, &cfg),
        Action::Batch { input, out, method } => batch(&input, &out, method, &cfg),
        Action::Synth {
            seed,
            count,
            height,
            width,
            out,
        } => synth(seed, count, ImageDims::new(height, width), &out),
        Action::Report => report(&cfg),
    }
}

fn estimate(
    frame: &FrameInput,
    method: Method,
    cfg: &EstimatorCfg,
) -> Result<EstimateReport, EstimateError> {
    let dims = frame.dims();
    match method {
        Method::Line => estimate_from_lines(&frame.segments(), dims, cfg)
            .map(|e| EstimateReport::from_line(&e, dims)),
        Method::Quad => {
            estimate_from_polygons(&frame.polygons(), dims, cfg).map(|e| EstimateReport::from_quad(&e))
        }
        Method::Auto => estimate(frame, Method::Quad, cfg).or_else(|err| {
            tracing::info!(error = %err, id = ?frame.id, "quadrilateral path failed, using line path");
            estimate(frame, Method::Line, cfg)
        }),
    }
}

fn single(input: &Path, method: Method, cfg: &EstimatorCfg) -> Result<()> {
    tracing::info!(input = %input.display(), ?method, "estimate");
    let frame = frame_io::read_frame(input)?;
    let estimate = estimate(&frame, method, cfg)
        .with_context(|| format!("estimating {}", input.display()))?;
    let out = FrameReport {
        id: frame.id,
        estimate,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn batch(input: &Path, out: &Path, method: Method, cfg: &EstimatorCfg) -> Result<()> {
    let frames = frame_io::read_frames_jsonl(input)?;
    tracing::info!(input = %input.display(), frames = frames.len(), ?method, "batch");
    let rows: Vec<BatchRow> = frames
        .iter()
        .enumerate()
        .map(|(n, f)| {
            let id = f.id.clone().unwrap_or_else(|| n.to_string());
            match estimate(f, method, cfg) {
                Ok(rep) => BatchRow::ok(id, &rep),
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "frame skipped");
                    BatchRow::failed(id, err.to_string())
                }
            }
        })
        .collect();
    let failed = rows.iter().filter(|r| r.error.is_some()).count();

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let (height, width) = table::write_csv(&rows, out)?;
    tracing::info!(rows = height, cols = width, failed, out = %out.display(), "batch_written");

    let doc = provenance::document(cfg, &[input], &[out]);
    provenance::write_sidecar(out, &doc)?;
    Ok(())
}

fn synth(seed: u64, count: u64, frame: ImageDims, out: &Path) -> Result<()> {
    tracing::info!(seed, count, out = %out.display(), "synth");
    let cfg = SynthCfg {
        frame,
        ..SynthCfg::default()
    };
    let frames: Vec<FrameInput> = (0..count)
        .map(|index| {
            let s = draw_frame(cfg, ReplayToken { seed, index });
            FrameInput::from_synthetic(&s, Some(format!("synth-{seed}-{index}")))
        })
        .collect();
    let body = if let [only] = frames.as_slice() {
        serde_json::to_vec_pretty(only)?
    } else {
        let mut buf = Vec::new();
        for f in &frames {
            serde_json::to_writer(&mut buf, f)?;
            buf.push(b'\n');
        }
        buf
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out, body).with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

fn report(cfg: &EstimatorCfg) -> Result<()> {
    let obj = provenance::document(cfg, &[], &[]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    fn horizontal_edge_frame() -> FrameInput {
        // Only a horizontal edge on the centerline plus the image border.
        FrameInput {
            id: Some("h".into()),
            height: 100,
            width: 200,
            segments: vec![[0.0, 50.0, 100.0, 50.0]],
            polygons: vec![vec![[0.0, 0.0], [0.0, 100.0], [200.0, 100.0], [200.0, 0.0]]],
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cmd::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cmd = Cmd::parse_from([
            "window-pose",
            "quad",
            "--input",
            "f.json",
            "--fallback",
            "full-frame",
            "--ratio",
            "symmetric",
        ]);
        let cfg = cmd.est.cfg().unwrap();
        assert_eq!(cfg.fallback, QuadFallback::FullFrame);
        assert_eq!(cfg.ratio, RatioScore::Symmetric);
        assert_eq!(cfg.area, AreaModel::AdjacentSides);
        assert_eq!(cfg.border_area_frac, DEFAULT_BORDER_AREA_FRAC);
    }

    #[test]
    fn out_of_range_flags_are_rejected() {
        let cmd = Cmd::parse_from([
            "window-pose",
            "line",
            "--input",
            "f.json",
            "--extension-factor=-0.5",
        ]);
        let err = format!("{:#}", cmd.est.cfg().unwrap_err());
        assert!(err.contains("extension_factor"), "{err}");

        let cmd = Cmd::parse_from(["window-pose", "report", "--border-area-frac", "1.5"]);
        let err = format!("{:#}", cmd.est.cfg().unwrap_err());
        assert!(err.contains("border_area_frac"), "{err}");
    }

    #[test]
    fn auto_falls_back_to_line_and_reports_both_failures() {
        let cfg = EstimatorCfg::default();
        let mut f = horizontal_edge_frame();
        // border quad is excluded, horizontal edge never crosses the centerline
        assert_eq!(
            estimate(&f, Method::Auto, &cfg),
            Err(EstimateError::NoIntersection)
        );
        f.segments.push([150.0, 0.0, 150.0, 120.0]);
        let rep = estimate(&f, Method::Auto, &cfg).unwrap();
        assert_eq!(rep.method(), "line");
        assert!(matches!(
            rep,
            EstimateReport::Line { horizontal_offset_px, .. } if horizontal_offset_px == -50.0
        ));
    }

    #[test]
    fn synth_then_batch_writes_table_and_sidecar() {
        let dir = tempdir().unwrap();
        let frames = dir.path().join("frames.jsonl");
        synth(9, 4, ImageDims::new(480, 640), &frames).unwrap();
        let parsed = frame_io::read_frames_jsonl(&frames).unwrap();
        assert_eq!(parsed.len(), 4);

        let out = dir.path().join("out").join("results.csv");
        batch(&frames, &out, Method::Quad, &EstimatorCfg::default()).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().skip(1).all(|l| l.contains(",quad,")), "{text}");
        assert!(dir.path().join("out").join("results.provenance.json").exists());
    }

    #[test]
    fn synth_single_frame_is_plain_json() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("frame.json");
        synth(1, 1, ImageDims::new(240, 320), &out).unwrap();
        let f = frame_io::read_frame(&out).unwrap();
        assert_eq!(f.dims(), ImageDims::new(240, 320));
        let rep = estimate(&f, Method::Quad, &EstimatorCfg::default()).unwrap();
        assert_eq!(rep.method(), "quad");
    }
}
