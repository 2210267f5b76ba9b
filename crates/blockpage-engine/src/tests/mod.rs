use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::editing::BlockStore;
use crate::models::{BlockId, BlockType};

/// Create a temporary documents directory
pub fn create_test_documents_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(documents_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = documents_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Store holding one appended block per type, in order. The last one is
/// selected.
pub fn store_with(block_types: &[BlockType]) -> BlockStore {
    let mut store = BlockStore::new();
    for &block_type in block_types {
        store.add_block(block_type, None).unwrap();
    }
    store
}

pub fn ids(store: &BlockStore) -> Vec<BlockId> {
    store.blocks().iter().map(|block| block.id().clone()).collect()
}

pub fn types(store: &BlockStore) -> Vec<BlockType> {
    store.blocks().iter().map(|block| block.block_type()).collect()
}

pub fn positions(store: &BlockStore) -> Vec<usize> {
    store.blocks().iter().map(|block| block.position()).collect()
}
