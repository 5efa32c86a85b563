//! Estimator configuration.
//!
//! Defaults reproduce the field-tested heuristics: 10x line extension, the
//! 0.97 image-border cut, adjacent-side area and the asymmetric ratio score.
//! The alternative models are opt-in.

use std::fmt;
use std::str::FromStr;

use crate::error::EstimateError;

/// Multiplier applied to the dominant segment's direction on both ends.
pub const DEFAULT_EXTENSION_FACTOR: f64 = 10.0;
/// Quadrilaterals at or above this fraction of the image area trace the frame border.
pub const DEFAULT_BORDER_AREA_FRAC: f64 = 0.97;

/// What `quad::select_dominant` returns when no candidate qualifies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuadFallback {
    /// Report `EstimateError::NoDominantCandidate`.
    #[default]
    NotFound,
    /// Return a rectangle covering the whole frame (scores come out as 0).
    FullFrame,
}

/// Area measure used to rank quadrilaterals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AreaModel {
    /// `|side1| · |side2|`; exact only for rectangles.
    #[default]
    AdjacentSides,
    /// Absolute shoelace area of the vertex loop.
    Shoelace,
}

/// Score mapping a side ratio `r = a / b` to a signed tilt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RatioScore {
    /// `r - 1` if `r >= 1`, else `-r`. Not antisymmetric under swapping `a`, `b`.
    #[default]
    Compat,
    /// `r - 1` if `r >= 1`, else `1 - 1/r`; swapping `a`, `b` negates the score.
    Symmetric,
}

/// Tunables shared by both estimators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatorCfg {
    pub extension_factor: f64,
    pub border_area_frac: f64,
    pub fallback: QuadFallback,
    pub area: AreaModel,
    pub ratio: RatioScore,
}

impl Default for EstimatorCfg {
    fn default() -> Self {
        Self {
            extension_factor: DEFAULT_EXTENSION_FACTOR,
            border_area_frac: DEFAULT_BORDER_AREA_FRAC,
            fallback: QuadFallback::default(),
            area: AreaModel::default(),
            ratio: RatioScore::default(),
        }
    }
}

impl EstimatorCfg {
    /// `extension_factor` finite and `>= 0`; `border_area_frac` finite in `(0, 1]`.
    pub fn check(&self) -> Result<(), EstimateError> {
        check_extension_factor(self.extension_factor)?;
        let frac = self.border_area_frac;
        if !(frac.is_finite() && frac > 0.0 && frac <= 1.0) {
            return Err(EstimateError::InvalidConfig {
                field: "border_area_frac",
                value: frac,
            });
        }
        Ok(())
    }
}

/// A negative factor shrinks the segment (to a point at `-0.5`); NaN poisons it.
pub(crate) fn check_extension_factor(k: f64) -> Result<(), EstimateError> {
    if k.is_finite() && k >= 0.0 {
        Ok(())
    } else {
        Err(EstimateError::InvalidConfig {
            field: "extension_factor",
            value: k,
        })
    }
}

// String forms are shared by the CLI flags and the JSON reports.

impl QuadFallback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::FullFrame => "full-frame",
        }
    }
}

impl AreaModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdjacentSides => "adjacent-sides",
            Self::Shoelace => "shoelace",
        }
    }
}

impl RatioScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compat => "compat",
            Self::Symmetric => "symmetric",
        }
    }
}

macro_rules! str_enum {
    ($ty:ty, [$($variant:expr),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.as_str() == s)
                    .ok_or_else(|| {
                        let known: Vec<&str> = [$($variant),+].iter().map(|v: &$ty| v.as_str()).collect();
                        format!("unknown value `{s}` (expected one of: {})", known.join(", "))
                    })
            }
        }
    };
}

str_enum!(QuadFallback, [QuadFallback::NotFound, QuadFallback::FullFrame]);
str_enum!(AreaModel, [AreaModel::AdjacentSides, AreaModel::Shoelace]);
str_enum!(RatioScore, [RatioScore::Compat, RatioScore::Symmetric]);
