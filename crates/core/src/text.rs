//! Text that scales its own font size.
//!
//! [`ScaledText`] resolves a font size from its style, scales it with the
//! active [`Scaler`], and emits a [`TextElement`] with host auto-scaling
//! switched off so the size is not scaled a second time by the platform.

use scaled_protocol::{StyleProp, TextElement, TextProps, TextStyle};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::scale::{Scaler, ceil_px};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaledText {
    pub style: Option<StyleProp>,
    #[serde(deserialize_with = "text_children")]
    pub children: String,
    /// `false` renders the style-resolved size as is.
    pub allow_font_scaling: bool,
    /// Extra multiplier applied before the global font scale. Ignored unless
    /// finite and positive.
    #[serde(deserialize_with = "lenient_number")]
    pub custom_font_scale: Option<f64>,
    /// Floor for the final size. Ignored unless finite and positive.
    #[serde(deserialize_with = "lenient_number")]
    pub minimum_font_size: Option<f64>,
    #[serde(flatten)]
    pub props: TextProps,
}

impl Default for ScaledText {
    fn default() -> Self {
        Self {
            style: None,
            children: String::new(),
            allow_font_scaling: true,
            custom_font_scale: None,
            minimum_font_size: None,
            props: TextProps::default(),
        }
    }
}

impl ScaledText {
    pub fn new(children: impl Into<String>) -> Self {
        Self {
            children: children.into(),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: impl Into<StyleProp>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn allow_font_scaling(mut self, allow: bool) -> Self {
        self.allow_font_scaling = allow;
        self
    }

    pub fn custom_font_scale(mut self, scale: f64) -> Self {
        self.custom_font_scale = Some(scale);
        self
    }

    pub fn minimum_font_size(mut self, size: f64) -> Self {
        self.minimum_font_size = Some(size);
        self
    }

    pub fn props(mut self, props: TextProps) -> Self {
        self.props = props;
        self
    }

    fn flattened_style(&self) -> TextStyle {
        self.style
            .as_ref()
            .map(StyleProp::flatten)
            .unwrap_or_default()
    }

    /// The font size this text renders at under `scaler`.
    pub fn resolve_font_size(&self, scaler: &Scaler) -> f64 {
        let base = base_font_size(&self.flattened_style(), scaler);
        self.scale_size(base, scaler)
    }

    fn scale_size(&self, base: f64, scaler: &Scaler) -> f64 {
        let mut size = base;

        if self.allow_font_scaling {
            if let Some(custom) = positive(self.custom_font_scale) {
                size = ceil_px(size * custom);
            }
            size = scaler.font_scaled(size);
        }

        if let Some(minimum) = positive(self.minimum_font_size) {
            size = ceil_px(size.max(minimum));
        }

        size
    }

    pub fn render(&self, scaler: &Scaler) -> TextElement {
        let mut style = self.flattened_style();
        let base = base_font_size(&style, scaler);
        let font_size = self.scale_size(base, scaler);
        style.merge_from(&TextStyle::with_font_size(font_size));

        tracing::trace!(
            base,
            font_size,
            allow_font_scaling = self.allow_font_scaling,
            "scaled text resolved"
        );

        TextElement {
            text: self.children.clone(),
            style,
            allow_font_scaling: false,
            props: self.props.clone(),
        }
    }
}

fn base_font_size(style: &TextStyle, scaler: &Scaler) -> f64 {
    style
        .font_size
        .filter(|size| size.is_finite())
        .unwrap_or_else(|| scaler.default_font_size())
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Accept any JSON value; keep it only if it is a number.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

/// Host children as display text: strings as written, numbers in decimal,
/// lists concatenated. `null`, booleans and records render nothing.
fn text_children<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let mut text = String::new();
    push_child_text(&value, &mut text);
    Ok(text)
}

fn push_child_text(value: &Value, text: &mut String) {
    match value {
        Value::String(s) => text.push_str(s),
        Value::Number(n) => text.push_str(&n.to_string()),
        Value::Array(items) => {
            for item in items {
                push_child_text(item, text);
            }
        }
        Value::Null | Value::Bool(_) | Value::Object(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use scaled_protocol::{FontWeight, TextAlign, ViewportSize};

    use super::*;
    use crate::scale::ScaleConfig;

    fn design_screen() -> Scaler {
        Scaler::init(ViewportSize::new(375.0, 812.0), ScaleConfig::default())
    }

    fn tablet() -> Scaler {
        // font_scale 1.3
        Scaler::init(ViewportSize::new(768.0, 1024.0), ScaleConfig::default())
    }

    fn small_phone() -> Scaler {
        // font_scale 0.75
        Scaler::init(ViewportSize::new(320.0, 568.0), ScaleConfig::default())
    }

    #[test]
    fn uses_style_font_size() {
        let el = ScaledText::new("hi")
            .style(TextStyle::with_font_size(16.0))
            .render(&tablet());
        assert_eq!(el.effective_font_size(), Some(21.0));
        assert!(!el.allow_font_scaling);
        assert_eq!(el.text, "hi");
    }

    #[test]
    fn falls_back_to_default_font_size() {
        let el = ScaledText::new("hi").render(&design_screen());
        assert_eq!(el.effective_font_size(), Some(12.0));

        let el = ScaledText::new("hi").render(&tablet());
        // ceil(12 * 1.3) = ceil(15.6)
        assert_eq!(el.effective_font_size(), Some(16.0));
    }

    #[test]
    fn disabled_scaling_keeps_resolved_size() {
        for scaler in [design_screen(), tablet(), small_phone()] {
            let el = ScaledText::new("x")
                .style(TextStyle::with_font_size(15.5))
                .allow_font_scaling(false)
                .render(&scaler);
            assert_eq!(el.effective_font_size(), Some(15.5));
            assert!(!el.allow_font_scaling);
        }
    }

    #[test]
    fn minimum_font_size_raises_small_results() {
        // 18 * 0.75 = 13.5 → 14 → floored to 20
        let text = ScaledText::new("x")
            .style(TextStyle::with_font_size(18.0))
            .minimum_font_size(20.0);
        assert!((text.resolve_font_size(&small_phone()) - 20.0).abs() < f64::EPSILON);

        let without_floor = ScaledText::new("x").style(TextStyle::with_font_size(18.0));
        assert!((without_floor.resolve_font_size(&small_phone()) - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn minimum_font_size_applies_without_scaling() {
        let el = ScaledText::new("x")
            .style(TextStyle::with_font_size(9.0))
            .allow_font_scaling(false)
            .minimum_font_size(11.0)
            .render(&tablet());
        assert_eq!(el.effective_font_size(), Some(11.0));
    }

    #[test]
    fn non_positive_minimum_is_ignored() {
        for minimum in [0.0, -4.0, f64::NAN] {
            let size = ScaledText::new("x")
                .style(TextStyle::with_font_size(16.0))
                .minimum_font_size(minimum)
                .resolve_font_size(&design_screen());
            assert!((size - 16.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn custom_scale_multiplies_before_global_scale() {
        // ceil(10 * 1.5) = 15, then ceil(15 * 1.3) = ceil(19.5) = 20
        let size = ScaledText::new("x")
            .style(TextStyle::with_font_size(10.0))
            .custom_font_scale(1.5)
            .resolve_font_size(&tablet());
        assert!((size - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_custom_scale_is_ignored() {
        for custom in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let size = ScaledText::new("x")
                .style(TextStyle::with_font_size(10.0))
                .custom_font_scale(custom)
                .resolve_font_size(&tablet());
            assert!((size - 13.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn custom_scale_skipped_when_scaling_disabled() {
        let size = ScaledText::new("x")
            .style(TextStyle::with_font_size(10.0))
            .custom_font_scale(2.0)
            .allow_font_scaling(false)
            .resolve_font_size(&tablet());
        assert!((size - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fragments_flatten_and_other_fields_survive() {
        let base = TextStyle {
            font_size: Some(14.0),
            text_align: Some(TextAlign::Center),
            ..TextStyle::default()
        };
        let el = ScaledText::new("x")
            .style(vec![Some(base), None, Some(TextStyle::with_font_size(20.0))])
            .render(&design_screen());
        assert_eq!(el.style.font_size, Some(20.0));
        assert_eq!(el.style.text_align, Some(TextAlign::Center));
    }

    #[test]
    fn props_pass_through_unchanged() {
        let props = TextProps {
            number_of_lines: Some(1),
            test_id: Some("title".into()),
            ..TextProps::default()
        };
        let el = ScaledText::new("x").props(props.clone()).render(&tablet());
        assert_eq!(el.props, props);
    }

    #[test]
    fn deserializes_host_props() {
        let json = r#"{
            "style": [{"fontSize": 16, "color": null}, {"letterSpacing": 1}],
            "children": "Title",
            "customFontScale": "big",
            "minimumFontSize": 0,
            "numberOfLines": 2,
            "accessibilityRole": "header"
        }"#;
        let text: ScaledText = serde_json::from_str(json).unwrap_or_default();
        assert!(text.allow_font_scaling);
        assert_eq!(text.custom_font_scale, None);
        assert_eq!(text.minimum_font_size, Some(0.0));
        assert_eq!(text.props.number_of_lines, Some(2));
        assert!(text.props.extra.contains_key("accessibilityRole"));

        let el = text.render(&tablet());
        assert_eq!(el.effective_font_size(), Some(21.0));
        assert_eq!(el.style.letter_spacing, Some(1.0));
    }

    #[test]
    fn host_color_and_numeric_weight_render() {
        let json = serde_json::json!({
            "style": {"color": "#333", "fontWeight": 700, "fontSize": 16},
            "children": "Hi"
        });
        let text: ScaledText = serde_json::from_value(json).unwrap_or_default();
        let el = text.render(&tablet());
        assert_eq!(el.text, "Hi");
        assert_eq!(el.effective_font_size(), Some(21.0));
        assert_eq!(el.style.color.as_deref(), Some("#333"));
        assert_eq!(el.style.font_weight, Some(FontWeight::Numeric(700)));

        let out = serde_json::to_value(&el).unwrap_or_default();
        assert_eq!(out["style"]["color"], serde_json::json!("#333"));
        assert_eq!(out["style"]["fontWeight"], serde_json::json!(700));
    }

    #[test]
    fn false_fragment_and_numeric_children_render() {
        let json = r#"{"style": [{"fontSize": 16}, false], "children": 42}"#;
        let text: ScaledText = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(text.children, "42");

        let el = text.render(&tablet());
        assert_eq!(el.text, "42");
        assert_eq!(el.effective_font_size(), Some(21.0));
    }

    #[test]
    fn mixed_children_concatenate() {
        let json = r#"{"children": ["Total: ", 3, null, false, " items"], "style": false}"#;
        let text: ScaledText = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(text.children, "Total: 3 items");
        assert_eq!(text.render(&design_screen()).effective_font_size(), Some(12.0));
    }
}
