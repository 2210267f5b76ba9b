use crate::models::{BlockId, BlockType};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),
    #[error("Invalid {block_type} data: {source}")]
    InvalidPayload {
        block_type: BlockType,
        source: serde_json::Error,
    },
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EngineError {
    /// True for stale-reference errors a caller can safely ignore
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::BlockNotFound(_))
    }
}
