use crate::editing::BlockStore;
use crate::models::{Block, BlockId};

/// Read-only view of a store for renderers
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<'a> {
    pub blocks: Vec<RenderBlock<'a>>,
    pub selected: Option<&'a BlockId>,
    pub preview: bool,
    pub revision: u64,
}

/// A block plus the editor flags a renderer needs to draw it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBlock<'a> {
    pub block: &'a Block,
    pub is_selected: bool,
    /// False in preview mode
    pub is_editable: bool,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(store: &'a BlockStore) -> Self {
        let selected = store.selected();
        let preview = store.is_preview();
        let blocks = store
            .blocks()
            .iter()
            .map(|block| RenderBlock {
                block,
                is_selected: selected == Some(block.id()),
                is_editable: !preview,
            })
            .collect();

        Self {
            blocks,
            selected,
            preview,
            revision: store.revision(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
