//! Per-type block payloads.
//!
//! Every payload struct deserializes with `#[serde(default)]` so documents
//! written by an older or newer schema revision (missing or extra fields)
//! still load. Shape dispatch happens on [`BlockType`] only; the engine never
//! looks inside a payload beyond that.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::BlockType;

/// Type-tagged block payload, one variant per [`BlockType`]
#[derive(Clone, Debug, PartialEq)]
pub enum BlockData {
    Text(TextData),
    Heading(HeadingData),
    Image(ImageData),
    Button(ButtonData),
    Spacer(SpacerData),
    Divider(DividerData),
    Gallery(GalleryData),
    Form(FormData),
    Embed(EmbedData),
    Columns(ColumnsData),
    Video(VideoData),
    Quote(QuoteData),
}

impl BlockData {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockData::Text(_) => BlockType::Text,
            BlockData::Heading(_) => BlockType::Heading,
            BlockData::Image(_) => BlockType::Image,
            BlockData::Button(_) => BlockType::Button,
            BlockData::Spacer(_) => BlockType::Spacer,
            BlockData::Divider(_) => BlockType::Divider,
            BlockData::Gallery(_) => BlockType::Gallery,
            BlockData::Form(_) => BlockType::Form,
            BlockData::Embed(_) => BlockType::Embed,
            BlockData::Columns(_) => BlockType::Columns,
            BlockData::Video(_) => BlockType::Video,
            BlockData::Quote(_) => BlockType::Quote,
        }
    }

    /// Payload as a bare JSON object (no type tag)
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            BlockData::Text(data) => serde_json::to_value(data),
            BlockData::Heading(data) => serde_json::to_value(data),
            BlockData::Image(data) => serde_json::to_value(data),
            BlockData::Button(data) => serde_json::to_value(data),
            BlockData::Spacer(data) => serde_json::to_value(data),
            BlockData::Divider(data) => serde_json::to_value(data),
            BlockData::Gallery(data) => serde_json::to_value(data),
            BlockData::Form(data) => serde_json::to_value(data),
            BlockData::Embed(data) => serde_json::to_value(data),
            BlockData::Columns(data) => serde_json::to_value(data),
            BlockData::Video(data) => serde_json::to_value(data),
            BlockData::Quote(data) => serde_json::to_value(data),
        }
    }

    /// Decode a payload object for the given block type.
    ///
    /// Only JSON objects are accepted; serde would otherwise happily read a
    /// struct out of a positional array.
    pub fn from_value(block_type: BlockType, value: Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(serde_json::Error::custom(format!(
                "{block_type} data must be a JSON object"
            )));
        }

        let data = match block_type {
            BlockType::Text => BlockData::Text(serde_json::from_value(value)?),
            BlockType::Heading => BlockData::Heading(serde_json::from_value(value)?),
            BlockType::Image => BlockData::Image(serde_json::from_value(value)?),
            BlockType::Button => BlockData::Button(serde_json::from_value(value)?),
            BlockType::Spacer => BlockData::Spacer(serde_json::from_value(value)?),
            BlockType::Divider => BlockData::Divider(serde_json::from_value(value)?),
            BlockType::Gallery => BlockData::Gallery(serde_json::from_value(value)?),
            BlockType::Form => BlockData::Form(serde_json::from_value(value)?),
            BlockType::Embed => BlockData::Embed(serde_json::from_value(value)?),
            BlockType::Columns => BlockData::Columns(serde_json::from_value(value)?),
            BlockType::Video => BlockData::Video(serde_json::from_value(value)?),
            BlockType::Quote => BlockData::Quote(serde_json::from_value(value)?),
        };
        Ok(data)
    }

    /// Shallow-merge top-level payload fields, producing a new payload of the
    /// same type. `self` is left untouched if the merged shape is invalid.
    pub fn merged(&self, fields: &Value) -> Result<Self, serde_json::Error> {
        let Value::Object(fields) = fields else {
            return Err(serde_json::Error::custom(
                "data update must be a JSON object",
            ));
        };

        let mut value = self.to_value()?;
        if let Value::Object(current) = &mut value {
            for (key, field) in fields {
                current.insert(key.clone(), field.clone());
            }
        }
        Self::from_value(self.block_type(), value)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTag {
    #[default]
    P,
    Span,
    Div,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextData {
    pub content: String,
    pub tag: TextTag,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingData {
    pub content: String,
    #[serde(deserialize_with = "heading_level")]
    pub level: u8,
}

const HEADING_LEVELS: std::ops::RangeInclusive<u8> = 1..=6;

fn heading_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let level = u8::deserialize(deserializer)?;
    if HEADING_LEVELS.contains(&level) {
        Ok(level)
    } else {
        Err(D::Error::custom(format!("heading level {level} is outside 1..=6")))
    }
}

impl Default for HeadingData {
    fn default() -> Self {
        Self {
            content: String::new(),
            level: 2,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
    None,
    ScaleDown,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageData {
    pub src: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<ObjectFit>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Link,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonData {
    pub text: String,
    pub url: String,
    pub variant: ButtonVariant,
    pub open_in_new_tab: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacerData {
    /// Pixels
    pub height: u32,
}

impl Default for SpacerData {
    fn default() -> Self {
        Self { height: 40 }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerData {
    pub style: DividerStyle,
    pub thickness: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Default for DividerData {
    fn default() -> Self {
        Self {
            style: DividerStyle::Solid,
            thickness: 1,
            color: None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryLayout {
    #[default]
    Grid,
    Masonry,
    Carousel,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryData {
    pub images: Vec<GalleryImage>,
    pub layout: GalleryLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    #[default]
    Text,
    Email,
    Tel,
    Number,
    Textarea,
    Select,
    Checkbox,
    Radio,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FormFieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    /// Choices for select and radio fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub title: String,
    pub submit_text: String,
    pub fields: Vec<FormField>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbedData {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

/// One column of a columns block. `blocks` is an opaque nested document: the
/// engine stores it verbatim and never links into it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Column {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    pub blocks: Vec<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnsData {
    pub columns: Vec<Column>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoData {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub autoplay: bool,
    pub controls: bool,
    #[serde(rename = "loop")]
    pub looped: bool,
}

impl Default for VideoData {
    fn default() -> Self {
        Self {
            src: String::new(),
            poster: None,
            autoplay: false,
            controls: true,
            looped: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteData {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
}
