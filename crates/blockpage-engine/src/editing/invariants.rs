use std::collections::HashSet;

use crate::models::{Block, BlockId};

/// Structural corruption of a block collection. Store operations never
/// produce these; seeing one means a logic bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("block {id} is at index {index} but has position {position}")]
    PositionMismatch {
        id: BlockId,
        index: usize,
        position: usize,
    },
    #[error("block id {0} appears more than once")]
    DuplicateId(BlockId),
}

/// Check position density (`position == index` for every block, hence a
/// gap-free permutation of `0..N`) and id uniqueness.
pub fn check_invariants(blocks: &[Block]) -> Result<(), InvariantViolation> {
    let mut seen = HashSet::with_capacity(blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        if block.position != index {
            return Err(InvariantViolation::PositionMismatch {
                id: block.id.clone(),
                index,
                position: block.position,
            });
        }
        if !seen.insert(&block.id) {
            return Err(InvariantViolation::DuplicateId(block.id.clone()));
        }
    }
    Ok(())
}
