use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// The closed set of block kinds a page can be composed from
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Heading,
    Image,
    Button,
    Spacer,
    Divider,
    Gallery,
    Form,
    Embed,
    Columns,
    Video,
    Quote,
}

impl BlockType {
    /// Every block type, in palette order
    pub const ALL: [BlockType; 12] = [
        BlockType::Text,
        BlockType::Heading,
        BlockType::Image,
        BlockType::Button,
        BlockType::Spacer,
        BlockType::Divider,
        BlockType::Gallery,
        BlockType::Form,
        BlockType::Embed,
        BlockType::Columns,
        BlockType::Video,
        BlockType::Quote,
    ];

    /// Wire name used in documents and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Heading => "heading",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Spacer => "spacer",
            BlockType::Divider => "divider",
            BlockType::Gallery => "gallery",
            BlockType::Form => "form",
            BlockType::Embed => "embed",
            BlockType::Columns => "columns",
            BlockType::Video => "video",
            BlockType::Quote => "quote",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|block_type| block_type.as_str() == s)
            .ok_or_else(|| EngineError::UnknownBlockType(s.to_string()))
    }
}
