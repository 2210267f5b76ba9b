/*!
 * # Block Composition
 *
 * The editing core: a [`BlockStore`] owns one page's ordered blocks plus the
 * transient editor state (selection and preview mode).
 *
 * ## Invariants
 *
 * After every operation, successful or not:
 * - block positions are exactly `0..len` in collection order
 * - block ids are unique
 *
 * Failed operations (unknown id, unknown type, invalid payload) change
 * nothing. [`check_invariants`] verifies a collection and is debug-asserted
 * after each store operation.
 *
 * ## Usage Pattern
 *
 * ```rust
 * use blockpage_engine::editing::*;
 * use blockpage_engine::BlockType;
 *
 * let mut store = BlockStore::new();
 *
 * // Renderer intents arrive as commands
 * let patch = store.apply(Cmd::AddBlock { block_type: BlockType::Heading, at: None }).unwrap();
 * let heading = patch.created.unwrap();
 *
 * store.apply(Cmd::DuplicateBlock { id: heading.clone() }).unwrap();
 * store.apply(Cmd::MoveDown { id: heading }).unwrap();
 *
 * // Renderers draw from a snapshot
 * let snapshot = store.snapshot();
 * assert_eq!(snapshot.blocks.len(), 2);
 * assert!(check_invariants(store.blocks()).is_ok());
 * ```
 */

pub mod commands;
pub mod invariants;
pub mod patch;
pub mod snapshot;
pub mod store;

pub use commands::Cmd;
pub use invariants::{InvariantViolation, check_invariants};
pub use patch::Patch;
pub use snapshot::{RenderBlock, Snapshot};
pub use store::{BlockStore, BlockUpdate, ImportSummary};
