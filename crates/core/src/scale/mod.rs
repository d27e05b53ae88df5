//! Device-relative scale factors.
//!
//! A design is authored against a reference width (and optionally height).
//! The ratio between the actual viewport and that reference is clamped into
//! a dimension range to give `dimen_scale`. Fonts follow a dampened curve:
//!
//! ```text
//!   dimen_scale >= 1  ─▶  font_scale = min(dimen_scale, font_range.max)
//!   dimen_scale <  1  ─▶  font_scale = max(dimen_scale², font_range.min)
//! ```
//!
//! so text grows no faster than layout on large screens and shrinks
//! quadratically (but never below the floor) on small ones.

pub mod ext;
pub mod scaler;

use scaled_protocol::ViewportSize;
use serde::{Deserialize, Serialize};

pub use ext::Scalable;
pub use scaler::Scaler;

pub const DEFAULT_DESIGN_WIDTH: f64 = 375.0;
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_DIMEN_RANGE: ScaleRange = ScaleRange { min: 0.5, max: 1.5 };
pub const DEFAULT_FONT_RANGE: ScaleRange = ScaleRange { min: 0.75, max: 1.3 };

/// Products within this distance above an integer are treated as that
/// integer before ceiling, so `10.0 * 1.1` scales to 11 and not 12.
const CEIL_TOLERANCE: f64 = 1e-9;

/// Inclusive clamp bounds for a scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl ScaleRange {
    /// Builds a range, swapping the bounds if given in the wrong order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, self.min, self.max)
    }
}

/// Scaling configuration. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub design_width: f64,
    /// When set, the ratio is taken along the diagonal instead of the short
    /// side, and per-axis factors are reported as well.
    pub design_height: Option<f64>,
    pub dimen_scale_range: ScaleRange,
    pub font_scale_range: ScaleRange,
    pub default_font_size: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            design_width: DEFAULT_DESIGN_WIDTH,
            design_height: None,
            dimen_scale_range: DEFAULT_DIMEN_RANGE,
            font_scale_range: DEFAULT_FONT_RANGE,
            default_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl ScaleConfig {
    pub fn with_design_size(design_width: f64, design_height: Option<f64>) -> Self {
        Self {
            design_width,
            design_height,
            ..Self::default()
        }
    }
}

/// Factors derived from a viewport and a [`ScaleConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    /// Unclamped viewport / design ratio.
    pub dimen_ratio: f64,
    pub dimen_scale: f64,
    pub font_scale: f64,
    pub width_scale: Option<f64>,
    pub height_scale: Option<f64>,
}

impl ScaleFactors {
    /// Factors that leave every value unchanged.
    pub const IDENTITY: ScaleFactors = ScaleFactors {
        dimen_ratio: 1.0,
        dimen_scale: 1.0,
        font_scale: 1.0,
        width_scale: None,
        height_scale: None,
    };

    pub fn scaled(&self, value: f64) -> f64 {
        ceil_px(value * self.dimen_scale)
    }

    pub fn font_scaled(&self, value: f64) -> f64 {
        ceil_px(value * self.font_scale)
    }

    /// Scale a horizontal measurement. Falls back to `dimen_scale` when no
    /// design height was configured.
    pub fn width_scaled(&self, value: f64) -> f64 {
        ceil_px(value * self.width_scale.unwrap_or(self.dimen_scale))
    }

    pub fn height_scaled(&self, value: f64) -> f64 {
        ceil_px(value * self.height_scale.unwrap_or(self.dimen_scale))
    }
}

/// Compute the scale factors for `viewport` under `config`.
///
/// A non-positive design dimension produces a degenerate (infinite or NaN)
/// ratio; callers loading untrusted configs should run
/// [`crate::config::validate`] first.
pub fn compute_factors(viewport: ViewportSize, config: &ScaleConfig) -> ScaleFactors {
    let dimen_range = config.dimen_scale_range;

    let (dimen_ratio, width_scale, height_scale) = match config.design_height {
        Some(design_height) => {
            let design_diagonal = config.design_width.hypot(design_height);
            (
                viewport.diagonal() / design_diagonal,
                Some(dimen_range.clamp(viewport.min_side() / config.design_width)),
                Some(dimen_range.clamp(viewport.max_side() / design_height)),
            )
        }
        None => (viewport.min_side() / config.design_width, None, None),
    };

    let dimen_scale = dimen_range.clamp(dimen_ratio);
    let font_scale = font_scale_for(dimen_scale, config.font_scale_range);

    ScaleFactors {
        dimen_ratio,
        dimen_scale,
        font_scale,
        width_scale,
        height_scale,
    }
}

pub fn font_scale_for(dimen_scale: f64, font_range: ScaleRange) -> f64 {
    if dimen_scale >= 1.0 {
        dimen_scale.min(font_range.max)
    } else {
        (dimen_scale * dimen_scale).max(font_range.min)
    }
}

/// Like `f64::clamp`, but does not panic when `min > max` or a bound is NaN.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

pub(crate) fn ceil_px(value: f64) -> f64 {
    (value - CEIL_TOLERANCE).ceil()
}
