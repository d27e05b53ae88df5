//! JS-facing bridge. A JS host has no place to keep a `Scaler`, so the bridge
//! holds one per module instance; `init_scale` replaces it.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use scaled_core::config::{self, ConfigError};
use scaled_core::{ScaleConfig, ScaleRange, ScaledText, Scaler};
use scaled_protocol::ViewportSize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

static SCALER: Mutex<Option<Scaler>> = Mutex::new(None);

#[derive(Debug, Error)]
enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid text props: {0}")]
    Props(#[source] serde_json::Error),
    #[error("failed to serialize: {0}")]
    Serialize(#[source] serde_json::Error),
}

fn lock_scaler() -> MutexGuard<'static, Option<Scaler>> {
    SCALER.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_scaler<T>(f: impl FnOnce(&Scaler) -> T) -> T {
    let mut guard = lock_scaler();
    f(guard.get_or_insert_with(Scaler::default))
}

fn scaler_from_json(
    viewport_width: f64,
    viewport_height: f64,
    config_json: Option<&str>,
) -> Result<Scaler, BridgeError> {
    let config = match config_json {
        Some(json) => config::parse_config(json, Path::new("<js>"))?,
        None => ScaleConfig::default(),
    };
    Ok(Scaler::init(
        ViewportSize::new(viewport_width, viewport_height),
        config,
    ))
}

#[allow(clippy::too_many_arguments)]
fn config_from_args(
    design_width: Option<f64>,
    design_height: Option<f64>,
    dimen_min: Option<f64>,
    dimen_max: Option<f64>,
    font_min: Option<f64>,
    font_max: Option<f64>,
    default_font_size: Option<f64>,
) -> ScaleConfig {
    let defaults = ScaleConfig::default();
    ScaleConfig {
        design_width: design_width.unwrap_or(defaults.design_width),
        design_height,
        dimen_scale_range: ScaleRange::new(
            dimen_min.unwrap_or(defaults.dimen_scale_range.min),
            dimen_max.unwrap_or(defaults.dimen_scale_range.max),
        ),
        font_scale_range: ScaleRange::new(
            font_min.unwrap_or(defaults.font_scale_range.min),
            font_max.unwrap_or(defaults.font_scale_range.max),
        ),
        default_font_size: default_font_size.unwrap_or(defaults.default_font_size),
    }
}

fn render_json(scaler: &Scaler, props_json: &str) -> Result<String, BridgeError> {
    let text: ScaledText = serde_json::from_str(props_json).map_err(BridgeError::Props)?;
    serde_json::to_string(&text.render(scaler)).map_err(BridgeError::Serialize)
}

/// Initialize from the window size and an optional JSON config
/// (`{"design_width": 375, "font_scale_range": {"min": 0.75, "max": 1.3}, ...}`).
#[wasm_bindgen]
pub fn init_scale(
    viewport_width: f64,
    viewport_height: f64,
    config_json: Option<String>,
) -> Result<(), JsError> {
    let scaler = scaler_from_json(viewport_width, viewport_height, config_json.as_deref())?;
    *lock_scaler() = Some(scaler);
    Ok(())
}

/// Positional form of [`init_scale`]; omitted arguments take the defaults.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn init_scaled_settings(
    viewport_width: f64,
    viewport_height: f64,
    design_width: Option<f64>,
    design_height: Option<f64>,
    dimen_min: Option<f64>,
    dimen_max: Option<f64>,
    font_min: Option<f64>,
    font_max: Option<f64>,
    default_font_size: Option<f64>,
) {
    let config = config_from_args(
        design_width,
        design_height,
        dimen_min,
        dimen_max,
        font_min,
        font_max,
        default_font_size,
    );
    *lock_scaler() = Some(Scaler::init(
        ViewportSize::new(viewport_width, viewport_height),
        config,
    ));
}

#[wasm_bindgen]
pub fn font_scale() -> f64 {
    with_scaler(Scaler::font_scale)
}

#[wasm_bindgen]
pub fn dimen_scale() -> f64 {
    with_scaler(Scaler::dimen_scale)
}

#[wasm_bindgen]
pub fn scaled(value: f64) -> f64 {
    with_scaler(|s| s.scaled(value))
}

#[wasm_bindgen]
pub fn font_scaled(value: f64) -> f64 {
    with_scaler(|s| s.font_scaled(value))
}

#[wasm_bindgen]
pub fn d(value: f64) -> f64 {
    scaled(value)
}

#[wasm_bindgen]
pub fn f(value: f64) -> f64 {
    font_scaled(value)
}

/// Current factors as JSON.
#[wasm_bindgen]
pub fn scale_factors() -> Result<String, JsError> {
    let json = with_scaler(|s| serde_json::to_string(s.factors()));
    Ok(json.map_err(BridgeError::Serialize)?)
}

/// Render scaled text props (`{style, children, allowFontScaling,
/// customFontScale, minimumFontSize, ...rest}`) to a text element as JSON.
#[wasm_bindgen]
pub fn render_scaled_text(props_json: &str) -> Result<String, JsError> {
    Ok(with_scaler(|s| render_json(s, props_json))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_config_is_validated() {
        let err = scaler_from_json(375.0, 667.0, Some(r#"{"design_width": 0}"#));
        assert!(matches!(err, Err(BridgeError::Config(_))));
    }

    #[test]
    fn json_config_applies() {
        let scaler = scaler_from_json(750.0, 1334.0, Some(r#"{"design_width": 750}"#))
            .unwrap_or_default();
        assert!((scaler.dimen_scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn positional_args_fill_defaults() {
        let config = config_from_args(Some(414.0), None, None, Some(2.0), None, None, Some(14.0));
        assert!((config.design_width - 414.0).abs() < f64::EPSILON);
        assert_eq!(config.dimen_scale_range, ScaleRange::new(0.5, 2.0));
        assert_eq!(config.font_scale_range, ScaleConfig::default().font_scale_range);
        assert!((config.default_font_size - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn renders_props_to_element_json() {
        let scaler = scaler_from_json(750.0, 1334.0, None).unwrap_or_default();
        let out = render_json(&scaler, r#"{"style": {"fontSize": 16}, "children": "Hi"}"#)
            .unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap_or_default();
        assert_eq!(value["style"]["fontSize"], serde_json::json!(21.0));
        assert_eq!(value["allowFontScaling"], serde_json::json!(false));
        assert_eq!(value["text"], serde_json::json!("Hi"));
    }

    #[test]
    fn renders_host_style_values() {
        let scaler = scaler_from_json(750.0, 1334.0, None).unwrap_or_default();
        let props = r##"{"style": [{"color": "#333", "fontWeight": 700, "fontSize": 16}, false], "children": 42}"##;
        let out = render_json(&scaler, props).unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap_or_default();
        assert_eq!(value["text"], serde_json::json!("42"));
        assert_eq!(value["style"]["color"], serde_json::json!("#333"));
        assert_eq!(value["style"]["fontWeight"], serde_json::json!(700));
        assert_eq!(value["style"]["fontSize"], serde_json::json!(21.0));
    }

    #[test]
    fn bad_props_are_reported() {
        let scaler = Scaler::default();
        assert!(matches!(
            render_json(&scaler, "[1, 2"),
            Err(BridgeError::Props(_))
        ));
    }
}
