use crate::models::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Blocks whose content or position changed (including removed blocks)
    pub changed: Vec<BlockId>,
    /// Block created by an add or duplicate command
    pub created: Option<BlockId>,
    /// Selection after the command
    pub selection: Option<BlockId>,
    pub revision: u64,
}
