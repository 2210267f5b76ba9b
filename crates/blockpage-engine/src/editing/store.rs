use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::codec::{self, DroppedEntry, Format};
use crate::editing::{Cmd, Patch, Snapshot, check_invariants};
use crate::error::EngineError;
use crate::models::{Block, BlockId, BlockStyles, BlockType};
use crate::templates::TemplateRegistry;

/// Partial change to a block
///
/// `data` is a JSON object whose top-level fields are shallow-merged into the
/// block's payload; `styles` fields that are set replace the block's.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlockUpdate {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub styles: Option<BlockStyles>,
}

impl BlockUpdate {
    pub fn data(fields: Value) -> Self {
        Self {
            data: Some(fields),
            styles: None,
        }
    }

    pub fn styles(styles: BlockStyles) -> Self {
        Self {
            data: None,
            styles: Some(styles),
        }
    }
}

/// Outcome of [`BlockStore::import_document`]
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub dropped: Vec<DroppedEntry>,
}

impl ImportSummary {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Owner of a page's ordered block collection and its editor state.
///
/// Every operation either succeeds completely or leaves the store unchanged.
/// After every operation block positions equal their index (`0..len`) and
/// ids are unique.
///
/// ```rust
/// # use blockpage_engine::{BlockStore, BlockType};
/// let mut store = BlockStore::new();
/// let text = store.add_block(BlockType::Text, None).unwrap();
/// let image = store.add_block(BlockType::Image, None).unwrap();
/// let button = store.add_block(BlockType::Button, Some(1)).unwrap();
///
/// let order: Vec<_> = store.blocks().iter().map(|b| b.id().clone()).collect();
/// assert_eq!(order, vec![text, button.clone(), image]);
/// assert_eq!(store.selected(), Some(&button));
/// ```
#[derive(Debug)]
pub struct BlockStore {
    registry: Arc<TemplateRegistry>,
    blocks: Vec<Block>,
    selected: Option<BlockId>,
    preview: bool,
    /// Incremented on each successful operation (change detection)
    revision: u64,
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStore {
    /// Empty store backed by the builtin template catalog
    pub fn new() -> Self {
        Self::with_registry(TemplateRegistry::builtin())
    }

    pub fn with_registry(registry: Arc<TemplateRegistry>) -> Self {
        Self {
            registry,
            blocks: Vec::new(),
            selected: None,
            preview: false,
            revision: 0,
        }
    }

    /// Load a store from document text
    pub fn from_document(text: &str) -> Result<(Self, ImportSummary), EngineError> {
        let mut store = Self::new();
        let summary = store.import_document(text)?;
        Ok((store, summary))
    }

    // Queries

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Blocks in position order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| &block.id == id)
    }

    pub fn position_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| &block.id == id)
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self)
    }

    // Mutations

    /// Apply a command and describe its effect
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EngineError> {
        log::debug!("applying {cmd:?}");
        let (changed, created) = crate::editing::commands::execute(self, cmd)?;
        Ok(Patch {
            changed,
            created,
            selection: self.selected.clone(),
            revision: self.revision,
        })
    }

    /// Create a block from its template.
    ///
    /// `None` appends; `Some(position)` is clamped to `0..=len` and inserts
    /// there. The new block becomes the selection.
    pub fn add_block(
        &mut self,
        block_type: BlockType,
        position: Option<isize>,
    ) -> Result<BlockId, EngineError> {
        let template = self.registry.template_for(block_type)?;

        let index = match position {
            Some(position) => clamp_position(position, self.blocks.len()),
            None => self.blocks.len(),
        };
        let id = self.fresh_id();
        let block = template.instantiate(id.clone(), index);

        self.blocks.insert(index, block);
        self.renumber_from(index);
        self.set_selection(Some(id.clone()));
        self.commit();
        Ok(id)
    }

    /// Merge a partial update into a block, bumping its version.
    ///
    /// Unknown ids and updates that would leave the payload in an invalid
    /// shape are rejected without touching the block.
    pub fn update_block(&mut self, id: &BlockId, update: BlockUpdate) -> Result<(), EngineError> {
        let index = self.index_of(id)?;
        let block = &self.blocks[index];

        let data = match &update.data {
            Some(fields) => Some(block.data.merged(fields).map_err(|source| {
                EngineError::InvalidPayload {
                    block_type: block.block_type(),
                    source,
                }
            })?),
            None => None,
        };

        let block = &mut self.blocks[index];
        if let Some(data) = data {
            block.data = data;
        }
        if let Some(styles) = update.styles {
            block.styles.get_or_insert_with(BlockStyles::default).merge(styles);
        }
        block.metadata.touch();
        self.commit();
        Ok(())
    }

    /// Remove a block, closing the gap it leaves
    pub fn delete_block(&mut self, id: &BlockId) -> Result<Block, EngineError> {
        let index = self.index_of(id)?;
        let removed = self.blocks.remove(index);
        self.renumber_from(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.commit();
        Ok(removed)
    }

    /// Move a block to `new_position` (clamped to `0..len`).
    ///
    /// Blocks between the old and new slot shift by one; returns the final
    /// position.
    pub fn move_block(&mut self, id: &BlockId, new_position: isize) -> Result<usize, EngineError> {
        let from = self.index_of(id)?;
        let to = clamp_position(new_position, self.blocks.len() - 1);

        if from != to {
            let block = self.blocks.remove(from);
            self.blocks.insert(to, block);
            self.renumber_from(from.min(to));
        }
        self.commit();
        Ok(to)
    }

    /// Move one slot towards the top; no-op for the first block
    pub fn move_block_up(&mut self, id: &BlockId) -> Result<usize, EngineError> {
        let from = self.index_of(id)?;
        self.move_block(id, from as isize - 1)
    }

    /// Move one slot towards the bottom; no-op for the last block
    pub fn move_block_down(&mut self, id: &BlockId) -> Result<usize, EngineError> {
        let from = self.index_of(id)?;
        self.move_block(id, from as isize + 1)
    }

    /// Insert a deep copy right after the original and select it
    pub fn duplicate_block(&mut self, id: &BlockId) -> Result<BlockId, EngineError> {
        let index = self.index_of(id)?;
        let copy_id = self.fresh_id();
        let copy = self.blocks[index].duplicate(copy_id.clone(), index + 1);

        self.blocks.insert(index + 1, copy);
        self.renumber_from(index + 1);
        self.set_selection(Some(copy_id.clone()));
        self.commit();
        Ok(copy_id)
    }

    /// Select a block, or clear the selection with `None`.
    ///
    /// In preview mode nothing can be selected, so the selection is forced
    /// to `None`.
    pub fn select_block(&mut self, id: Option<&BlockId>) -> Result<(), EngineError> {
        if let Some(id) = id {
            self.index_of(id)?;
        }
        self.set_selection(id.cloned());
        self.commit();
        Ok(())
    }

    /// Entering preview mode clears the selection; leaving it does not
    /// restore anything.
    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.preview = enabled;
        if enabled {
            self.selected = None;
        }
        self.commit();
    }

    pub fn clear_blocks(&mut self) {
        self.blocks.clear();
        self.selected = None;
        self.commit();
    }

    // Document boundary

    pub fn export_document(&self) -> Result<String, EngineError> {
        codec::serialize(&self.blocks, Format::Compact)
    }

    pub fn export_document_pretty(&self) -> Result<String, EngineError> {
        codec::serialize(&self.blocks, Format::Pretty)
    }

    /// Replace the collection with the blocks of a document.
    ///
    /// Malformed entries are dropped and listed in the summary; a document
    /// that is unreadable as a whole leaves the store untouched.
    pub fn import_document(&mut self, text: &str) -> Result<ImportSummary, EngineError> {
        let report = codec::deserialize(text)?;
        let summary = ImportSummary {
            imported: report.blocks.len(),
            dropped: report.dropped,
        };

        self.blocks = report.blocks;
        self.selected = None;
        self.commit();

        log::debug!(
            "imported {} blocks, dropped {}",
            summary.imported,
            summary.dropped_count()
        );
        Ok(summary)
    }

    // Internals

    pub(crate) fn index_of(&self, id: &BlockId) -> Result<usize, EngineError> {
        self.position_of(id).ok_or_else(|| {
            log::warn!("no block with id {id}");
            EngineError::BlockNotFound(id.clone())
        })
    }

    pub(crate) fn ids_from(&self, start: usize) -> Vec<BlockId> {
        self.blocks
            .iter()
            .skip(start)
            .map(|block| block.id.clone())
            .collect()
    }

    fn fresh_id(&self) -> BlockId {
        loop {
            let id = BlockId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn set_selection(&mut self, id: Option<BlockId>) {
        self.selected = if self.preview { None } else { id };
    }

    fn renumber_from(&mut self, start: usize) {
        for (index, block) in self.blocks.iter_mut().enumerate().skip(start) {
            block.position = index;
        }
    }

    fn commit(&mut self) {
        self.revision += 1;
        debug_assert_eq!(check_invariants(&self.blocks), Ok(()));
    }
}

/// Clamp a caller-supplied position into `0..=max`
fn clamp_position(position: isize, max: usize) -> usize {
    if position <= 0 {
        0
    } else {
        (position as usize).min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockData, TextAlign, TextData};
    use crate::tests::{ids, positions, store_with, types};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_add_first_block() {
        let mut store = BlockStore::new();
        let id = store.add_block(BlockType::Heading, None).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.blocks()[0].position(), 0);
        assert_eq!(store.blocks()[0].block_type(), BlockType::Heading);
        assert_eq!(store.selected(), Some(&id));
    }

    #[test]
    fn test_add_at_position_inserts_and_renumbers() {
        let mut store = BlockStore::new();
        store.add_block(BlockType::Text, None).unwrap();
        store.add_block(BlockType::Image, None).unwrap();
        store.add_block(BlockType::Button, Some(1)).unwrap();

        assert_eq!(
            types(&store),
            vec![BlockType::Text, BlockType::Button, BlockType::Image]
        );
        assert_eq!(positions(&store), vec![0, 1, 2]);
    }

    #[rstest]
    #[case::negative(-5, 0)]
    #[case::zero(0, 0)]
    #[case::middle(1, 1)]
    #[case::end(2, 2)]
    #[case::past_end(99, 2)]
    fn test_add_clamps_position(#[case] requested: isize, #[case] expected: usize) {
        let mut store = store_with(&[BlockType::Text, BlockType::Text]);
        let id = store.add_block(BlockType::Spacer, Some(requested)).unwrap();

        assert_eq!(store.position_of(&id), Some(expected));
        assert_eq!(positions(&store), vec![0, 1, 2]);
    }

    #[test]
    fn test_add_unknown_type_has_no_side_effects() {
        let registry = Arc::new(TemplateRegistry::new(
            TemplateRegistry::builtin()
                .templates()
                .filter(|template| template.block_type() == BlockType::Text)
                .cloned(),
        ));
        let mut store = BlockStore::with_registry(registry);
        let text = store.add_block(BlockType::Text, None).unwrap();
        let revision = store.revision();

        let result = store.add_block(BlockType::Video, Some(0));

        assert!(matches!(result, Err(EngineError::UnknownBlockType(_))));
        assert_eq!(ids(&store), vec![text.clone()]);
        assert_eq!(store.selected(), Some(&text));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_blocks_of_same_type_are_independent() {
        let mut store = BlockStore::new();
        let first = store.add_block(BlockType::Text, None).unwrap();
        let second = store.add_block(BlockType::Text, None).unwrap();

        store
            .update_block(&first, BlockUpdate::data(json!({"content": "changed"})))
            .unwrap();

        assert_eq!(
            store.get(&second).unwrap().data(),
            &store.registry().template_for(BlockType::Text).unwrap().default_data
        );
    }

    #[test]
    fn test_update_merges_data_and_bumps_version() {
        let mut store = store_with(&[BlockType::Text]);
        let id = ids(&store)[0].clone();

        store
            .update_block(&id, BlockUpdate::data(json!({"content": "Hello"})))
            .unwrap();

        let block = store.get(&id).unwrap();
        assert_eq!(
            block.data(),
            &BlockData::Text(TextData {
                content: "Hello".to_string(),
                ..TextData::default()
            })
        );
        assert_eq!(block.metadata().version, 2);
        assert_eq!(block.position(), 0);
    }

    #[test]
    fn test_update_with_same_values_still_bumps_version() {
        let mut store = store_with(&[BlockType::Spacer]);
        let id = ids(&store)[0].clone();
        let before = store.get(&id).unwrap().data().clone();

        store.update_block(&id, BlockUpdate::default()).unwrap();
        store
            .update_block(&id, BlockUpdate::data(json!({"height": 40})))
            .unwrap();

        let block = store.get(&id).unwrap();
        assert_eq!(block.data(), &before);
        assert_eq!(block.metadata().version, 3);
    }

    #[test]
    fn test_update_merges_styles() {
        let mut store = store_with(&[BlockType::Heading]);
        let id = ids(&store)[0].clone();

        store
            .update_block(
                &id,
                BlockUpdate::styles(BlockStyles {
                    text_align: Some(TextAlign::Right),
                    ..Default::default()
                }),
            )
            .unwrap();

        let styles = store.get(&id).unwrap().styles().unwrap();
        assert_eq!(styles.text_align, Some(TextAlign::Right));
        assert_eq!(styles.padding.as_deref(), Some("16px"));
    }

    #[test]
    fn test_update_creates_styles_when_absent() {
        let mut store = store_with(&[BlockType::Spacer]);
        let id = ids(&store)[0].clone();
        assert!(store.get(&id).unwrap().styles().is_none());

        store
            .update_block(
                &id,
                BlockUpdate::styles(BlockStyles {
                    margin: Some("8px".to_string()),
                    ..Default::default()
                }),
            )
            .unwrap();

        assert_eq!(
            store.get(&id).unwrap().styles().unwrap().margin.as_deref(),
            Some("8px")
        );
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = store_with(&[BlockType::Text]);
        let revision = store.revision();

        let result = store.update_block(&BlockId::from("missing"), BlockUpdate::default());

        assert!(matches!(result, Err(EngineError::BlockNotFound(_))));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_invalid_update_leaves_block_untouched() {
        let mut store = store_with(&[BlockType::Spacer]);
        let id = ids(&store)[0].clone();
        let before = store.get(&id).unwrap().clone();

        let result = store.update_block(
            &id,
            BlockUpdate {
                data: Some(json!({"height": "tall"})),
                styles: Some(BlockStyles {
                    padding: Some("1px".to_string()),
                    ..Default::default()
                }),
            },
        );

        assert!(matches!(
            result,
            Err(EngineError::InvalidPayload {
                block_type: BlockType::Spacer,
                ..
            })
        ));
        assert_eq!(store.get(&id).unwrap(), &before);
    }

    #[test]
    fn test_update_rejects_heading_level_out_of_range() {
        let mut store = store_with(&[BlockType::Heading]);
        let id = ids(&store)[0].clone();
        let before = store.get(&id).unwrap().clone();

        let result = store.update_block(&id, BlockUpdate::data(json!({"level": 99})));

        assert!(matches!(
            result,
            Err(EngineError::InvalidPayload {
                block_type: BlockType::Heading,
                ..
            })
        ));
        assert_eq!(store.get(&id).unwrap(), &before);
    }

    #[test]
    fn test_delete_renumbers_remaining() {
        let mut store = store_with(&[BlockType::Text, BlockType::Image, BlockType::Button]);
        let before = ids(&store);

        store.delete_block(&before[1]).unwrap();

        assert_eq!(ids(&store), vec![before[0].clone(), before[2].clone()]);
        assert_eq!(positions(&store), vec![0, 1]);
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut store = store_with(&[BlockType::Text, BlockType::Image]);
        let selected = store.selected().cloned().unwrap();

        store.delete_block(&selected).unwrap();

        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_delete_other_keeps_selection() {
        let mut store = store_with(&[BlockType::Text, BlockType::Image]);
        let first = ids(&store)[0].clone();
        let selected = store.selected().cloned();

        store.delete_block(&first).unwrap();

        assert_eq!(store.selected().cloned(), selected);
    }

    #[test]
    fn test_delete_last_block_leaves_empty_store() {
        let mut store = store_with(&[BlockType::Divider]);
        let id = ids(&store)[0].clone();

        let removed = store.delete_block(&id).unwrap();

        assert_eq!(removed.id(), &id);
        assert!(store.is_empty());
        assert_eq!(check_invariants(store.blocks()), Ok(()));
    }

    #[test]
    fn test_delete_twice_is_not_found() {
        let mut store = store_with(&[BlockType::Text, BlockType::Image]);
        let id = ids(&store)[0].clone();

        store.delete_block(&id).unwrap();
        let result = store.delete_block(&id);

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    #[case::first_to_last(0, 2, [1, 2, 0])]
    #[case::last_to_first(2, 0, [2, 0, 1])]
    #[case::one_down(0, 1, [1, 0, 2])]
    #[case::middle_up(1, 0, [1, 0, 2])]
    #[case::past_end(0, 10, [1, 2, 0])]
    #[case::negative(2, -1, [2, 0, 1])]
    fn test_move_shifts_blocks_between(
        #[case] from: usize,
        #[case] to: isize,
        #[case] expected: [usize; 3],
    ) {
        let mut store = store_with(&[BlockType::Text, BlockType::Image, BlockType::Button]);
        let before = ids(&store);

        store.move_block(&before[from], to).unwrap();

        let expected: Vec<_> = expected.iter().map(|&i| before[i].clone()).collect();
        assert_eq!(ids(&store), expected);
        assert_eq!(positions(&store), vec![0, 1, 2]);
    }

    #[test]
    fn test_move_to_own_position_is_noop() {
        let mut store = store_with(&[BlockType::Text, BlockType::Image, BlockType::Button]);
        let before = store.blocks().to_vec();

        let position = store.move_block(before[1].id(), 1).unwrap();

        assert_eq!(position, 1);
        assert_eq!(store.blocks(), before.as_slice());
    }

    #[test]
    fn test_move_unknown_id_is_not_found() {
        let mut store = store_with(&[BlockType::Text]);
        let result = store.move_block(&BlockId::from("missing"), 0);
        assert!(matches!(result, Err(EngineError::BlockNotFound(_))));
    }

    #[test]
    fn test_move_up_and_down_are_sequential() {
        let mut store = store_with(&[BlockType::Text, BlockType::Image, BlockType::Button]);
        let before = ids(&store);

        assert_eq!(store.move_block_down(&before[0]).unwrap(), 1);
        assert_eq!(store.move_block_down(&before[0]).unwrap(), 2);
        assert_eq!(store.move_block_down(&before[0]).unwrap(), 2);
        assert_eq!(
            ids(&store),
            vec![before[1].clone(), before[2].clone(), before[0].clone()]
        );

        assert_eq!(store.move_block_up(&before[1]).unwrap(), 0);
        assert_eq!(store.move_block_up(&before[2]).unwrap(), 0);
        assert_eq!(
            ids(&store),
            vec![before[2].clone(), before[1].clone(), before[0].clone()]
        );
    }

    #[test]
    fn test_duplicate_inserts_after_original() {
        let mut store = store_with(&[BlockType::Text, BlockType::Image, BlockType::Button]);
        let before = ids(&store);

        let copy = store.duplicate_block(&before[1]).unwrap();

        assert_eq!(
            ids(&store),
            vec![
                before[0].clone(),
                before[1].clone(),
                copy.clone(),
                before[2].clone()
            ]
        );
        assert_eq!(positions(&store), vec![0, 1, 2, 3]);
        assert_eq!(store.selected(), Some(&copy));
        assert_eq!(store.get(&copy).unwrap().block_type(), BlockType::Image);
    }

    #[test]
    fn test_duplicate_resets_metadata() {
        let mut store = store_with(&[BlockType::Text]);
        let id = ids(&store)[0].clone();
        store
            .update_block(&id, BlockUpdate::data(json!({"content": "x"})))
            .unwrap();

        let copy = store.duplicate_block(&id).unwrap();

        assert_eq!(store.get(&id).unwrap().metadata().version, 2);
        assert_eq!(store.get(&copy).unwrap().metadata().version, 1);
        assert_eq!(store.get(&copy).unwrap().data(), store.get(&id).unwrap().data());
    }

    #[test]
    fn test_duplicate_is_isolated_from_original() {
        let mut store = store_with(&[BlockType::Gallery]);
        let original = ids(&store)[0].clone();
        let copy = store.duplicate_block(&original).unwrap();
        let original_data = store.get(&original).unwrap().data().clone();

        store
            .update_block(&copy, BlockUpdate::data(json!({"images": [], "columns": 1})))
            .unwrap();
        assert_eq!(store.get(&original).unwrap().data(), &original_data);

        store
            .update_block(&original, BlockUpdate::data(json!({"layout": "carousel"})))
            .unwrap();
        let BlockData::Gallery(copy_gallery) = store.get(&copy).unwrap().data() else {
            panic!("duplicate changed type");
        };
        assert_eq!(copy_gallery.columns, Some(1));
        assert_eq!(copy_gallery.layout, crate::models::GalleryLayout::Grid);
    }

    #[test]
    fn test_duplicate_unknown_id_is_not_found() {
        let mut store = store_with(&[BlockType::Text]);
        assert!(
            store
                .duplicate_block(&BlockId::from("missing"))
                .unwrap_err()
                .is_not_found()
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_select_and_deselect() {
        let mut store = store_with(&[BlockType::Text, BlockType::Image]);
        let first = ids(&store)[0].clone();

        store.select_block(Some(&first)).unwrap();
        assert_eq!(store.selected_block().map(Block::id), Some(&first));

        store.select_block(None).unwrap();
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_select_unknown_id_keeps_selection() {
        let mut store = store_with(&[BlockType::Text]);
        let selected = store.selected().cloned();

        let result = store.select_block(Some(&BlockId::from("missing")));

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(store.selected().cloned(), selected);
    }

    #[test]
    fn test_preview_mode_clears_and_blocks_selection() {
        let mut store = store_with(&[BlockType::Text, BlockType::Image]);
        let first = ids(&store)[0].clone();
        assert!(store.selected().is_some());

        store.set_preview_mode(true);
        assert!(store.is_preview());
        assert_eq!(store.selected(), None);

        store.select_block(Some(&first)).unwrap();
        assert_eq!(store.selected(), None);

        store.set_preview_mode(false);
        assert_eq!(store.selected(), None);

        store.select_block(Some(&first)).unwrap();
        assert_eq!(store.selected(), Some(&first));
    }

    #[test]
    fn test_add_in_preview_mode_does_not_select() {
        let mut store = BlockStore::new();
        store.set_preview_mode(true);

        store.add_block(BlockType::Text, None).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_clear_blocks() {
        let mut store = store_with(&[BlockType::Text, BlockType::Image]);

        store.clear_blocks();

        assert!(store.is_empty());
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = BlockStore::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..20 {
            let id = store.add_block(BlockType::Text, Some(0)).unwrap();
            assert!(seen.insert(id.clone()));
            store.delete_block(&id).unwrap();
        }
    }

    #[test]
    fn test_import_replaces_blocks_and_selection() {
        let mut store = store_with(&[BlockType::Text]);
        let document = store_with(&[BlockType::Heading, BlockType::Quote])
            .export_document()
            .unwrap();

        let summary = store.import_document(&document).unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.dropped_count(), 0);
        assert_eq!(types(&store), vec![BlockType::Heading, BlockType::Quote]);
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_unreadable_import_leaves_store_untouched() {
        let mut store = store_with(&[BlockType::Text]);
        let before = store.blocks().to_vec();

        let result = store.import_document("not json");

        assert!(matches!(result, Err(EngineError::MalformedDocument(_))));
        assert_eq!(store.blocks(), before.as_slice());
    }

    #[test]
    fn test_revision_counts_successful_operations() {
        let mut store = BlockStore::new();
        assert_eq!(store.revision(), 0);

        let id = store.add_block(BlockType::Text, None).unwrap();
        store.select_block(None).unwrap();
        let _ = store.delete_block(&BlockId::from("missing"));
        store.delete_block(&id).unwrap();

        assert_eq!(store.revision(), 3);
    }
}
