use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::style::TextStyle;

/// Properties of the host text primitive that the scaled wrapper forwards
/// without looking at them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_lines: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ellipsize_mode: Option<EllipsizeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EllipsizeMode {
    Head,
    Middle,
    Tail,
    Clip,
}

/// A fully resolved text primitive, ready to hand to the host renderer.
///
/// The renderer must honor `allow_font_scaling`: when it is `false` the
/// host's own accessibility text scaling must not be applied on top of
/// `style.font_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub text: String,
    pub style: TextStyle,
    pub allow_font_scaling: bool,
    #[serde(default)]
    pub props: TextProps,
}

impl TextElement {
    pub fn effective_font_size(&self) -> Option<f64> {
        self.style.font_size
    }
}
