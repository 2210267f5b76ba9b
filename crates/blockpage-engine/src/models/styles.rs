use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

/// Presentation attributes shared by every block type.
///
/// All fields are optional; an absent field means "renderer default".
/// Values are CSS-like strings the engine never interprets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
}

impl BlockStyles {
    /// Overlay every field that is set in `other`
    pub fn merge(&mut self, other: BlockStyles) {
        let BlockStyles {
            background_color,
            text_color,
            padding,
            margin,
            border,
            border_radius,
            text_align,
        } = other;

        if background_color.is_some() {
            self.background_color = background_color;
        }
        if text_color.is_some() {
            self.text_color = text_color;
        }
        if padding.is_some() {
            self.padding = padding;
        }
        if margin.is_some() {
            self.margin = margin;
        }
        if border.is_some() {
            self.border = border;
        }
        if border_radius.is_some() {
            self.border_radius = border_radius;
        }
        if text_align.is_some() {
            self.text_align = text_align;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == BlockStyles::default()
    }
}
