use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A partial text style. Every field is optional so fragments can be layered;
/// see [`StyleProp::flatten`].
///
/// Keys this crate does not model (margins, shadows, host-specific flags)
/// are kept in `extra` and survive merging untouched. So does a modelled key
/// whose value has a shape the typed field cannot hold, such as a numeric
/// color: deserializing a style object never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// Host color string (`"#333"`, `"red"`, `"rgba(0,0,0,0.5)"`), passed
    /// through as written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

macro_rules! modelled_keys {
    ($($field:ident => $key:literal),* $(,)?) => {
        impl TextStyle {
            /// Store one host key: typed when the key is modelled and the value
            /// fits, in `extra` otherwise. Either way the other slot is cleared
            /// so a key is never serialized twice.
            fn set_key(&mut self, key: String, value: Value) {
                match key.as_str() {
                    $($key => match serde_json::from_value(value.clone()) {
                        Ok(typed) => {
                            self.$field = Some(typed);
                            self.extra.remove(&key);
                        }
                        Err(_) => {
                            self.$field = None;
                            self.extra.insert(key, value);
                        }
                    },)*
                    _ => {
                        self.extra.insert(key, value);
                    }
                }
            }

            fn overlay_modelled(&mut self, other: &TextStyle) {
                $(if other.$field.is_some() {
                    self.$field.clone_from(&other.$field);
                    self.extra.remove($key);
                })*
            }
        }
    };
}

modelled_keys! {
    font_size => "fontSize",
    font_family => "fontFamily",
    font_weight => "fontWeight",
    font_style => "fontStyle",
    line_height => "lineHeight",
    letter_spacing => "letterSpacing",
    color => "color",
    text_align => "textAlign",
}

impl TextStyle {
    pub fn with_font_size(font_size: f64) -> Self {
        Self {
            font_size: Some(font_size),
            ..Self::default()
        }
    }

    /// Build from host key/value pairs. `null` values count as absent.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut style = Self::default();
        for (key, value) in entries {
            if !value.is_null() {
                style.set_key(key, value);
            }
        }
        style
    }

    /// Overlay `other` onto `self`: every field set in `other` wins.
    pub fn merge_from(&mut self, other: &TextStyle) {
        self.overlay_modelled(other);
        for (key, value) in &other.extra {
            self.set_key(key.clone(), value.clone());
        }
    }
}

impl<'de> Deserialize<'de> for TextStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_entries(entries))
    }
}

/// `fontWeight` as hosts write it: `700` or `"bold"` / `"700"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Numeric(u16),
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Auto,
    Left,
    Center,
    Right,
    Justify,
}

/// A style argument as a host passes it: one record, or an ordered
/// (possibly nested) list of optional fragments.
///
/// Hosts build lists with conditionals (`[base, active && highlight]`), so
/// list entries that are not records or lists (`false`, `null`, `0`, `""`)
/// deserialize to `None`. A bare non-record style is an empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleProp {
    Many(Vec<Option<StyleProp>>),
    One(TextStyle),
}

impl StyleProp {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::One(TextStyle::from_entries(map)),
            Value::Array(items) => Self::Many(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(_) | Value::Array(_) => Some(Self::from_value(item)),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => Self::Many(Vec::new()),
        }
    }

    /// Merge all fragments in order; later fields win and `None` entries
    /// are skipped.
    pub fn flatten(&self) -> TextStyle {
        let mut out = TextStyle::default();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut TextStyle) {
        match self {
            Self::One(style) => out.merge_from(style),
            Self::Many(fragments) => {
                for fragment in fragments.iter().flatten() {
                    fragment.flatten_into(out);
                }
            }
        }
    }
}

impl From<TextStyle> for StyleProp {
    fn from(style: TextStyle) -> Self {
        Self::One(style)
    }
}

impl From<Vec<Option<TextStyle>>> for StyleProp {
    fn from(fragments: Vec<Option<TextStyle>>) -> Self {
        Self::Many(fragments.into_iter().map(|f| f.map(Self::One)).collect())
    }
}

impl<'de> Deserialize<'de> for StyleProp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}
