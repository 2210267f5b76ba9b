use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{BlockData, BlockStyles, BlockType};

/// Opaque block identity, unique within a document
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Fresh random identity (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Creation and change bookkeeping for a block
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Starts at 1, +1 per successful update
    pub version: u64,
}

impl BlockMetadata {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.version += 1;
    }
}

impl Default for BlockMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// A single addressable unit of page content.
///
/// Blocks only live inside a [`crate::BlockStore`]; outside code gets shared
/// references and changes them through store operations.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub(crate) id: BlockId,
    pub(crate) position: usize,
    pub(crate) data: BlockData,
    pub(crate) styles: Option<BlockStyles>,
    pub(crate) metadata: BlockMetadata,
}

impl Block {
    pub(crate) fn new(
        id: BlockId,
        position: usize,
        data: BlockData,
        styles: Option<BlockStyles>,
    ) -> Self {
        Self {
            id,
            position,
            data,
            styles,
            metadata: BlockMetadata::new(),
        }
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn block_type(&self) -> BlockType {
        self.data.block_type()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn data(&self) -> &BlockData {
        &self.data
    }

    pub fn styles(&self) -> Option<&BlockStyles> {
        self.styles.as_ref()
    }

    pub fn metadata(&self) -> &BlockMetadata {
        &self.metadata
    }

    /// Copy of this block's content under a new identity and fresh metadata
    pub(crate) fn duplicate(&self, id: BlockId, position: usize) -> Self {
        Block::new(id, position, self.data.clone(), self.styles.clone())
    }
}
