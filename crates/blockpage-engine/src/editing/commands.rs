use crate::editing::{BlockStore, BlockUpdate};
use crate::error::EngineError;
use crate::models::{BlockId, BlockType};

/// Commands that can be applied to the store.
///
/// Renderers report user intents as commands; [`BlockStore::apply`] runs
/// them one at a time, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    AddBlock {
        block_type: BlockType,
        at: Option<isize>,
    },
    UpdateBlock {
        id: BlockId,
        update: BlockUpdate,
    },
    DeleteBlock {
        id: BlockId,
    },
    MoveBlock {
        id: BlockId,
        to: isize,
    },
    MoveUp {
        id: BlockId,
    },
    MoveDown {
        id: BlockId,
    },
    DuplicateBlock {
        id: BlockId,
    },
    Select {
        id: Option<BlockId>,
    },
    SetPreviewMode {
        enabled: bool,
    },
    ClearBlocks,
}

/// Run a command, returning the ids it touched and the id it created
pub(crate) fn execute(
    store: &mut BlockStore,
    cmd: Cmd,
) -> Result<(Vec<BlockId>, Option<BlockId>), EngineError> {
    match cmd {
        Cmd::AddBlock { block_type, at } => {
            let id = store.add_block(block_type, at)?;
            let index = store.index_of(&id)?;
            Ok((store.ids_from(index), Some(id)))
        }
        Cmd::UpdateBlock { id, update } => {
            store.update_block(&id, update)?;
            Ok((vec![id], None))
        }
        Cmd::DeleteBlock { id } => {
            let index = store.index_of(&id)?;
            store.delete_block(&id)?;
            let mut changed = vec![id];
            changed.extend(store.ids_from(index));
            Ok((changed, None))
        }
        Cmd::MoveBlock { id, to } => {
            let from = store.index_of(&id)?;
            let to = store.move_block(&id, to)?;
            Ok((moved_span(store, from, to), None))
        }
        Cmd::MoveUp { id } => {
            let from = store.index_of(&id)?;
            let to = store.move_block_up(&id)?;
            Ok((moved_span(store, from, to), None))
        }
        Cmd::MoveDown { id } => {
            let from = store.index_of(&id)?;
            let to = store.move_block_down(&id)?;
            Ok((moved_span(store, from, to), None))
        }
        Cmd::DuplicateBlock { id } => {
            let copy = store.duplicate_block(&id)?;
            let index = store.index_of(&copy)?;
            Ok((store.ids_from(index), Some(copy)))
        }
        Cmd::Select { id } => {
            store.select_block(id.as_ref())?;
            Ok((Vec::new(), None))
        }
        Cmd::SetPreviewMode { enabled } => {
            store.set_preview_mode(enabled);
            Ok((Vec::new(), None))
        }
        Cmd::ClearBlocks => {
            let removed = store.ids_from(0);
            store.clear_blocks();
            Ok((removed, None))
        }
    }
}

/// Ids of every block whose position changed in a move from `from` to `to`
fn moved_span(store: &BlockStore, from: usize, to: usize) -> Vec<BlockId> {
    if from == to {
        return Vec::new();
    }
    let (start, end) = (from.min(to), from.max(to));
    store.blocks()[start..=end]
        .iter()
        .map(|block| block.id().clone())
        .collect()
}
