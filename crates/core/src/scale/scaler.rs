use scaled_protocol::ViewportSize;

use super::{ScaleConfig, ScaleFactors, compute_factors};
use crate::host::WindowMetrics;

/// Owns the active configuration and the factors derived from it.
///
/// Build one at startup and hand it by reference to everything that scales.
/// Re-initialization takes `&mut self`.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaler {
    viewport: ViewportSize,
    config: ScaleConfig,
    factors: ScaleFactors,
}

impl Scaler {
    pub fn init(viewport: ViewportSize, config: ScaleConfig) -> Self {
        let factors = compute_factors(viewport, &config);
        log_factors(viewport, &config, &factors);
        Self {
            viewport,
            config,
            factors,
        }
    }

    /// Read the window size from the host once and initialize from it.
    pub fn from_host<W: WindowMetrics + ?Sized>(host: &W, config: ScaleConfig) -> Self {
        Self::init(host.window_size(), config)
    }

    /// Replace the configuration, keeping the current viewport.
    pub fn reinit(&mut self, config: ScaleConfig) {
        self.config = config;
        self.recompute();
    }

    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.recompute();
    }

    /// Re-read the window size from the host.
    pub fn refresh<W: WindowMetrics + ?Sized>(&mut self, host: &W) {
        self.set_viewport(host.window_size());
    }

    fn recompute(&mut self) {
        self.factors = compute_factors(self.viewport, &self.config);
        log_factors(self.viewport, &self.config, &self.factors);
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    pub fn factors(&self) -> &ScaleFactors {
        &self.factors
    }

    pub fn dimen_scale(&self) -> f64 {
        self.factors.dimen_scale
    }

    pub fn font_scale(&self) -> f64 {
        self.factors.font_scale
    }

    pub fn default_font_size(&self) -> f64 {
        self.config.default_font_size
    }

    pub fn scaled(&self, value: f64) -> f64 {
        self.factors.scaled(value)
    }

    pub fn font_scaled(&self, value: f64) -> f64 {
        self.factors.font_scaled(value)
    }
}

impl Default for Scaler {
    /// Default config on a viewport exactly the default design width wide.
    fn default() -> Self {
        let config = ScaleConfig::default();
        let viewport = ViewportSize::new(config.design_width, config.design_width);
        Self::init(viewport, config)
    }
}

fn log_factors(viewport: ViewportSize, config: &ScaleConfig, factors: &ScaleFactors) {
    tracing::debug!(
        viewport.width,
        viewport.height,
        config.design_width,
        design_height = ?config.design_height,
        dimen_ratio = factors.dimen_ratio,
        dimen_scale = factors.dimen_scale,
        font_scale = factors.font_scale,
        "scale factors computed"
    );
    if !factors.dimen_ratio.is_finite() {
        tracing::warn!(
            config.design_width,
            "degenerate scale factor; design dimensions must be positive"
        );
    }
}
