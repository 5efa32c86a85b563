//! Batch results as a CSV table.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::frame_io::EstimateReport;

/// One batch row; orientation columns stay empty for the other method or on failure.
#[derive(Clone, Debug, Default)]
pub struct BatchRow {
    pub id: String,
    pub method: Option<&'static str>,
    pub angle_degrees: Option<f64>,
    pub horizontal_offset_px: Option<f64>,
    pub vertical_score: Option<f64>,
    pub horizontal_score: Option<f64>,
    pub error: Option<String>,
}

impl BatchRow {
    pub fn ok(id: String, rep: &EstimateReport) -> Self {
        let mut row = Self {
            id,
            method: Some(rep.method()),
            ..Self::default()
        };
        match *rep {
            EstimateReport::Line {
                angle_degrees,
                horizontal_offset_px,
                ..
            } => {
                row.angle_degrees = Some(angle_degrees);
                row.horizontal_offset_px = Some(horizontal_offset_px);
            }
            EstimateReport::Quad {
                vertical_score,
                horizontal_score,
                ..
            } => {
                row.vertical_score = Some(vertical_score);
                row.horizontal_score = Some(horizontal_score);
            }
        }
        row
    }

    pub fn failed(id: String, error: String) -> Self {
        Self {
            id,
            error: Some(error),
            ..Self::default()
        }
    }
}

pub fn to_frame(rows: &[BatchRow]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    let methods: Vec<Option<&str>> = rows.iter().map(|r| r.method).collect();
    let errors: Vec<Option<&str>> = rows.iter().map(|r| r.error.as_deref()).collect();
    let col = |f: fn(&BatchRow) -> Option<f64>| -> Vec<Option<f64>> { rows.iter().map(f).collect() };
    df!(
        "id" => ids,
        "method" => methods,
        "angle_degrees" => col(|r| r.angle_degrees),
        "horizontal_offset_px" => col(|r| r.horizontal_offset_px),
        "vertical_score" => col(|r| r.vertical_score),
        "horizontal_score" => col(|r| r.horizontal_score),
        "error" => errors,
    )
}

/// Write rows to `out` as CSV with a header; returns the table shape.
pub fn write_csv(rows: &[BatchRow], out: &Path) -> Result<(usize, usize)> {
    let mut df = to_frame(rows)?;
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(df.shape())
}
