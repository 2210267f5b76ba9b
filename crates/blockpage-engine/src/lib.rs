pub mod codec;
pub mod editing;
pub mod error;
pub mod io;
pub mod models;
pub mod templates;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use codec::{DropReason, DroppedEntry, Format, ImportReport, SCHEMA_VERSION};
pub use editing::{
    BlockStore, BlockUpdate, Cmd, ImportSummary, InvariantViolation, Patch, RenderBlock, Snapshot,
    check_invariants,
};
pub use error::EngineError;
pub use io::{DocumentsDir, IoError};
pub use models::*;
pub use templates::{BlockTemplate, TemplateCategory, TemplateRegistry};
