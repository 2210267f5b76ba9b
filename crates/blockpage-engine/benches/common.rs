// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use blockpage_engine::{BlockStore, BlockType};

#[allow(dead_code)]
pub fn generate_store(size: usize) -> BlockStore {
    let mut store = BlockStore::new();
    for block_type in BlockType::ALL.into_iter().cycle().take(size) {
        store.add_block(block_type, None).unwrap();
    }
    store
}
