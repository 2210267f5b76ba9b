pub mod block;
pub mod block_data;
pub mod block_type;
pub mod styles;

pub use block::{Block, BlockId, BlockMetadata};
pub use block_data::*;
pub use block_type::BlockType;
pub use styles::{BlockStyles, TextAlign};
