//! Block template catalog.
//!
//! A template is the prototype a new block is stamped from. Templates are
//! never handed out for mutation: [`BlockTemplate::instantiate`] clones the
//! default payload and styles so every block owns its own copy.

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::error::EngineError;
use crate::models::*;

/// Palette grouping used by block pickers
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Basic,
    Media,
    Layout,
    Interactive,
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateCategory::Basic => "basic",
            TemplateCategory::Media => "media",
            TemplateCategory::Layout => "layout",
            TemplateCategory::Interactive => "interactive",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockTemplate {
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: TemplateCategory,
    pub default_data: BlockData,
    pub default_styles: Option<BlockStyles>,
}

impl BlockTemplate {
    pub fn block_type(&self) -> BlockType {
        self.default_data.block_type()
    }

    /// New block with its own deep copy of the defaults
    pub(crate) fn instantiate(&self, id: BlockId, position: usize) -> Block {
        Block::new(
            id,
            position,
            self.default_data.clone(),
            self.default_styles.clone(),
        )
    }
}

/// Immutable lookup table from block type to template
#[derive(Debug)]
pub struct TemplateRegistry {
    templates: Vec<BlockTemplate>,
}

static BUILTIN: LazyLock<Arc<TemplateRegistry>> =
    LazyLock::new(|| Arc::new(TemplateRegistry::new(builtin_templates())));

impl TemplateRegistry {
    /// Build a registry; a later template for the same type replaces an
    /// earlier one.
    pub fn new(templates: impl IntoIterator<Item = BlockTemplate>) -> Self {
        let mut registry = Self {
            templates: Vec::new(),
        };
        for template in templates {
            match registry
                .templates
                .iter_mut()
                .find(|existing| existing.block_type() == template.block_type())
            {
                Some(existing) => *existing = template,
                None => registry.templates.push(template),
            }
        }
        registry
    }

    /// Shared registry holding the default template for every block type
    pub fn builtin() -> Arc<TemplateRegistry> {
        Arc::clone(&BUILTIN)
    }

    pub fn template_for(&self, block_type: BlockType) -> Result<&BlockTemplate, EngineError> {
        self.templates
            .iter()
            .find(|template| template.block_type() == block_type)
            .ok_or_else(|| EngineError::UnknownBlockType(block_type.to_string()))
    }

    /// Look up a template by its wire name, e.g. `"heading"`
    pub fn lookup(&self, name: &str) -> Result<&BlockTemplate, EngineError> {
        self.template_for(name.parse()?)
    }

    pub fn contains(&self, block_type: BlockType) -> bool {
        self.template_for(block_type).is_ok()
    }

    /// All templates in declaration order
    pub fn templates(&self) -> impl Iterator<Item = &BlockTemplate> {
        self.templates.iter()
    }

    pub fn by_category(&self, category: TemplateCategory) -> impl Iterator<Item = &BlockTemplate> {
        self.templates
            .iter()
            .filter(move |template| template.category == category)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn placeholder_image(n: u32) -> GalleryImage {
    GalleryImage {
        src: format!("https://placehold.co/600x400?text=Image+{n}"),
        alt: format!("Gallery image {n}"),
        caption: None,
    }
}

fn padded(padding: &str) -> Option<BlockStyles> {
    Some(BlockStyles {
        padding: Some(padding.to_string()),
        ..Default::default()
    })
}

fn builtin_templates() -> Vec<BlockTemplate> {
    vec![
        BlockTemplate {
            display_name: "Text",
            description: "A paragraph of plain text",
            category: TemplateCategory::Basic,
            default_data: BlockData::Text(TextData {
                content: "Start typing your text here...".to_string(),
                tag: TextTag::P,
            }),
            default_styles: padded("16px"),
        },
        BlockTemplate {
            display_name: "Heading",
            description: "A section title (h1 to h6)",
            category: TemplateCategory::Basic,
            default_data: BlockData::Heading(HeadingData {
                content: "Your Heading Here".to_string(),
                level: 2,
            }),
            default_styles: Some(BlockStyles {
                padding: Some("16px".to_string()),
                text_align: Some(TextAlign::Left),
                ..Default::default()
            }),
        },
        BlockTemplate {
            display_name: "Image",
            description: "A single image with optional caption",
            category: TemplateCategory::Media,
            default_data: BlockData::Image(ImageData {
                src: "https://placehold.co/800x400".to_string(),
                alt: "Placeholder image".to_string(),
                object_fit: Some(ObjectFit::Cover),
                ..Default::default()
            }),
            default_styles: None,
        },
        BlockTemplate {
            display_name: "Button",
            description: "A call-to-action link styled as a button",
            category: TemplateCategory::Interactive,
            default_data: BlockData::Button(ButtonData {
                text: "Click Me".to_string(),
                url: "#".to_string(),
                variant: ButtonVariant::Primary,
                open_in_new_tab: false,
            }),
            default_styles: Some(BlockStyles {
                padding: Some("16px".to_string()),
                text_align: Some(TextAlign::Center),
                ..Default::default()
            }),
        },
        BlockTemplate {
            display_name: "Spacer",
            description: "Empty vertical space",
            category: TemplateCategory::Layout,
            default_data: BlockData::Spacer(SpacerData { height: 40 }),
            default_styles: None,
        },
        BlockTemplate {
            display_name: "Divider",
            description: "A horizontal rule between sections",
            category: TemplateCategory::Layout,
            default_data: BlockData::Divider(DividerData {
                style: DividerStyle::Solid,
                thickness: 1,
                color: Some("#e5e7eb".to_string()),
            }),
            default_styles: padded("8px 0"),
        },
        BlockTemplate {
            display_name: "Gallery",
            description: "A grid of images",
            category: TemplateCategory::Media,
            default_data: BlockData::Gallery(GalleryData {
                images: (1..=3).map(placeholder_image).collect(),
                layout: GalleryLayout::Grid,
                columns: Some(3),
            }),
            default_styles: padded("16px"),
        },
        BlockTemplate {
            display_name: "Form",
            description: "A contact form with configurable fields",
            category: TemplateCategory::Interactive,
            default_data: BlockData::Form(FormData {
                title: "Contact Us".to_string(),
                submit_text: "Submit".to_string(),
                fields: vec![
                    FormField {
                        id: "name".to_string(),
                        field_type: FormFieldType::Text,
                        label: "Name".to_string(),
                        placeholder: Some("Your name".to_string()),
                        required: true,
                        options: None,
                    },
                    FormField {
                        id: "email".to_string(),
                        field_type: FormFieldType::Email,
                        label: "Email".to_string(),
                        placeholder: Some("you@example.com".to_string()),
                        required: true,
                        options: None,
                    },
                    FormField {
                        id: "message".to_string(),
                        field_type: FormFieldType::Textarea,
                        label: "Message".to_string(),
                        placeholder: None,
                        required: false,
                        options: None,
                    },
                ],
            }),
            default_styles: padded("24px"),
        },
        BlockTemplate {
            display_name: "Embed",
            description: "External content such as a map or social post",
            category: TemplateCategory::Media,
            default_data: BlockData::Embed(EmbedData {
                url: String::new(),
                html: None,
                aspect_ratio: Some("16:9".to_string()),
            }),
            default_styles: None,
        },
        BlockTemplate {
            display_name: "Columns",
            description: "Side-by-side columns, each holding its own blocks",
            category: TemplateCategory::Layout,
            default_data: BlockData::Columns(ColumnsData {
                columns: vec![
                    Column {
                        width: Some("50%".to_string()),
                        blocks: Vec::new(),
                    },
                    Column {
                        width: Some("50%".to_string()),
                        blocks: Vec::new(),
                    },
                ],
            }),
            default_styles: padded("16px"),
        },
        BlockTemplate {
            display_name: "Video",
            description: "A video player",
            category: TemplateCategory::Media,
            default_data: BlockData::Video(VideoData::default()),
            default_styles: None,
        },
        BlockTemplate {
            display_name: "Quote",
            description: "A highlighted quotation",
            category: TemplateCategory::Basic,
            default_data: BlockData::Quote(QuoteData {
                content: "An inspiring quote goes here.".to_string(),
                citation: None,
            }),
            default_styles: Some(BlockStyles {
                padding: Some("16px 24px".to_string()),
                border: Some("0 0 0 4px solid #d1d5db".to_string()),
                ..Default::default()
            }),
        },
    ]
}
