//! Four-vertex filtering and dominant-quadrilateral selection.
//!
//! Contour approximation yields many polygons: noise blobs, the target
//! opening, and often a rectangle hugging the image border. Selection keeps
//! the largest quadrilateral whose area stays strictly below
//! `border_area_frac × image area`.

use nalgebra::Vector2;

use super::types::Quad;
use crate::cfg::{AreaModel, EstimatorCfg, QuadFallback};
use crate::error::EstimateError;
use crate::frame::ImageDims;

/// Where the dominant quadrilateral came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuadSource {
    /// Index into the filtered quadrilateral list.
    Candidate { index: usize },
    /// `QuadFallback::FullFrame` was applied.
    FullFrame,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DominantQuad {
    pub quad: Quad,
    pub area: f64,
    pub source: QuadSource,
}

/// Keep polygons with exactly four vertices, in input order.
pub fn filter_quadrilaterals<P: AsRef<[Vector2<f64>]>>(polygons: &[P]) -> Vec<Quad> {
    let quads: Vec<Quad> = polygons
        .iter()
        .filter_map(|p| Quad::from_polygon(p.as_ref()))
        .collect();
    tracing::trace!(
        polygons = polygons.len(),
        quads = quads.len(),
        "filtered quadrilaterals"
    );
    quads
}

/// `|side1| · |side2|`: the rectangle area formula applied to any quad.
///
/// Over- or under-estimates skewed shapes; `AreaModel::Shoelace` is the exact
/// alternative.
#[inline]
pub fn approx_area(q: &Quad) -> f64 {
    let s = q.sides();
    s.s1 * s.s2
}

#[inline]
pub fn quad_area(q: &Quad, model: AreaModel) -> f64 {
    match model {
        AreaModel::AdjacentSides => approx_area(q),
        AreaModel::Shoelace => q.shoelace_area(),
    }
}

/// Index and area of the largest candidate with `0 < area < limit`.
///
/// Single pass against a running maximum that starts at zero, so ties keep
/// the first candidate and non-positive (or NaN) areas are never picked.
pub fn largest_below(areas: impl IntoIterator<Item = f64>, limit: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, a) in areas.into_iter().enumerate() {
        if a > best.map_or(0.0, |(_, b)| b) && a < limit {
            best = Some((i, a));
        }
    }
    best
}

/// Dominant quadrilateral, or the configured fallback when none qualifies.
pub fn select_dominant(
    quads: &[Quad],
    frame: ImageDims,
    cfg: &EstimatorCfg,
) -> Result<DominantQuad, EstimateError> {
    frame.check()?;
    cfg.check()?;
    let limit = cfg.border_area_frac * frame.area();
    let picked = largest_below(quads.iter().map(|q| quad_area(q, cfg.area)), limit);
    match picked {
        Some((index, area)) => {
            tracing::debug!(
                index,
                area,
                limit,
                candidates = quads.len(),
                "dominant quadrilateral selected"
            );
            Ok(DominantQuad {
                quad: quads[index],
                area,
                source: QuadSource::Candidate { index },
            })
        }
        None => match cfg.fallback {
            QuadFallback::NotFound => {
                tracing::debug!(candidates = quads.len(), limit, "no quadrilateral below limit");
                Err(EstimateError::NoDominantCandidate {
                    candidates: quads.len(),
                })
            }
            QuadFallback::FullFrame => {
                tracing::warn!(
                    candidates = quads.len(),
                    limit,
                    "no quadrilateral below limit, falling back to full frame"
                );
                let quad = Quad::full_frame(frame);
                Ok(DominantQuad {
                    quad,
                    area: quad_area(&quad, cfg.area),
                    source: QuadSource::FullFrame,
                })
            }
        },
    }
}
