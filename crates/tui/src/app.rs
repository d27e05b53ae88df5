use scaled_core::{ScaleConfig, ScaledText, Scaler, WindowMetrics};
use scaled_protocol::{TextElement, TextStyle, ViewportSize};

/// Device sizes the preview can cycle through, in logical pixels.
pub const PRESETS: &[(&str, f64, f64)] = &[
    ("iPhone SE", 320.0, 568.0),
    ("iPhone 8", 375.0, 667.0),
    ("Pixel 7", 412.0, 915.0),
    ("iPhone 14 Pro Max", 430.0, 932.0),
    ("iPad mini", 744.0, 1133.0),
    ("iPad Pro 12.9", 1024.0, 1366.0),
];

/// Sample text roles rendered in the preview. `None` uses the configured
/// default font size.
pub const SAMPLES: &[(&str, Option<f64>)] = &[
    ("Caption", Some(10.0)),
    ("Body (default)", None),
    ("Body", Some(16.0)),
    ("Title", Some(20.0)),
    ("Heading", Some(28.0)),
    ("Display", Some(40.0)),
];

const RESIZE_STEP: f64 = 10.0;
const CUSTOM_SCALE_STEP: f64 = 0.1;
const MINIMUM_FONT_SIZE: f64 = 14.0;

pub struct PreviewState {
    pub scaler: Scaler,
    pub device: String,
    pub allow_font_scaling: bool,
    pub custom_font_scale: Option<f64>,
    pub minimum_font_size: Option<f64>,
    preset: usize,
}

pub struct SampleRow {
    pub label: &'static str,
    pub base: f64,
    pub element: TextElement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPreset,
    PrevPreset,
    Wider,
    Narrower,
    Taller,
    Shorter,
    Rotate,
    UseTerminal,
    ToggleScaling,
    ToggleMinimum,
    CustomUp,
    CustomDown,
}

impl PreviewState {
    pub fn new(config: ScaleConfig) -> Self {
        let preset = 1;
        let (name, width, height) = PRESETS[preset];
        Self {
            scaler: Scaler::init(ViewportSize::new(width, height), config),
            device: name.to_string(),
            allow_font_scaling: true,
            custom_font_scale: None,
            minimum_font_size: None,
            preset,
        }
    }

    /// Apply an action. Returns `false` when the preview should exit.
    pub fn apply<W: WindowMetrics + ?Sized>(&mut self, action: Action, host: &W) -> bool {
        let viewport = self.scaler.viewport();
        match action {
            Action::Quit => return false,
            Action::NextPreset => self.select_preset((self.preset + 1) % PRESETS.len()),
            Action::PrevPreset => {
                self.select_preset((self.preset + PRESETS.len() - 1) % PRESETS.len());
            }
            Action::Wider => self.resize(viewport.width + RESIZE_STEP, viewport.height),
            Action::Narrower => self.resize(viewport.width - RESIZE_STEP, viewport.height),
            Action::Taller => self.resize(viewport.width, viewport.height + RESIZE_STEP),
            Action::Shorter => self.resize(viewport.width, viewport.height - RESIZE_STEP),
            Action::Rotate => self.resize(viewport.height, viewport.width),
            Action::UseTerminal => {
                self.scaler.refresh(host);
                self.device = "terminal".to_string();
            }
            Action::ToggleScaling => self.allow_font_scaling = !self.allow_font_scaling,
            Action::ToggleMinimum => {
                self.minimum_font_size = match self.minimum_font_size {
                    Some(_) => None,
                    None => Some(MINIMUM_FONT_SIZE),
                };
            }
            Action::CustomUp => self.step_custom_scale(CUSTOM_SCALE_STEP),
            Action::CustomDown => self.step_custom_scale(-CUSTOM_SCALE_STEP),
        }
        true
    }

    fn select_preset(&mut self, index: usize) {
        let (name, width, height) = PRESETS[index];
        self.preset = index;
        self.device = name.to_string();
        self.scaler.set_viewport(ViewportSize::new(width, height));
    }

    fn resize(&mut self, width: f64, height: f64) {
        let viewport = ViewportSize::new(width.max(RESIZE_STEP), height.max(RESIZE_STEP));
        if viewport != self.scaler.viewport() {
            self.device = "custom".to_string();
        }
        self.scaler.set_viewport(viewport);
    }

    fn step_custom_scale(&mut self, delta: f64) {
        let current = self.custom_font_scale.unwrap_or(1.0);
        let next = ((current + delta) * 10.0).round() / 10.0;
        self.custom_font_scale = if (next - 1.0).abs() < f64::EPSILON || next <= 0.0 {
            None
        } else {
            Some(next)
        };
    }

    pub fn text(&self, label: &str, font_size: Option<f64>) -> ScaledText {
        let mut text = ScaledText::new(label).allow_font_scaling(self.allow_font_scaling);
        if let Some(size) = font_size {
            text = text.style(TextStyle::with_font_size(size));
        }
        if let Some(scale) = self.custom_font_scale {
            text = text.custom_font_scale(scale);
        }
        if let Some(minimum) = self.minimum_font_size {
            text = text.minimum_font_size(minimum);
        }
        text
    }

    pub fn samples(&self) -> Vec<SampleRow> {
        SAMPLES
            .iter()
            .map(|&(label, size)| SampleRow {
                label,
                base: size.unwrap_or_else(|| self.scaler.default_font_size()),
                element: self.text(label, size).render(&self.scaler),
            })
            .collect()
    }
}
