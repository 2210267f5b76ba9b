//! Portable JSON document format.
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "blocks": [
//!     {"id": "...", "type": "heading", "position": 0,
//!      "data": {"content": "Welcome", "level": 1},
//!      "styles": {"textAlign": "center"},
//!      "metadata": {"createdAt": "...", "updatedAt": "...", "version": 1}}
//!   ]
//! }
//! ```
//!
//! A bare array of block records is also accepted on import. Records are
//! validated one by one; a bad record is dropped and reported without
//! affecting the rest of the document.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

use crate::error::EngineError;
use crate::models::{Block, BlockData, BlockId, BlockMetadata, BlockStyles, BlockType};

/// Newest document schema this build reads and the one it writes
pub const SCHEMA_VERSION: u64 = 1;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Compact,
    Pretty,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentEnvelope<'a> {
    schema_version: u64,
    blocks: Vec<BlockRecord<'a>>,
}

#[derive(Serialize)]
struct BlockRecord<'a> {
    id: &'a BlockId,
    #[serde(rename = "type")]
    block_type: BlockType,
    position: usize,
    data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    styles: Option<&'a BlockStyles>,
    metadata: &'a BlockMetadata,
}

/// Why an imported record was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropReason {
    #[error("entry is not an object")]
    NotAnObject,
    #[error("missing or empty id")]
    MissingId,
    #[error("missing type")]
    MissingType,
    #[error("unknown block type '{0}'")]
    UnknownType(String),
    #[error("missing or non-numeric position")]
    MissingPosition,
    #[error("missing data")]
    MissingData,
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("invalid styles: {0}")]
    InvalidStyles(String),
    #[error("id already used by an earlier entry")]
    DuplicateId,
}

/// A rejected record: its index in the input array and, when readable, its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedEntry {
    pub index: usize,
    pub id: Option<BlockId>,
    pub reason: DropReason,
}

impl fmt::Display for DroppedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "entry {} ({id}): {}", self.index, self.reason),
            None => write!(f, "entry {}: {}", self.index, self.reason),
        }
    }
}

/// Result of decoding a document
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    /// Accepted blocks, renumbered `0..len`
    pub blocks: Vec<Block>,
    pub dropped: Vec<DroppedEntry>,
}

impl ImportReport {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Encode blocks as a document. Editor state (selection, preview) is not
/// part of a document.
pub fn serialize(blocks: &[Block], format: Format) -> Result<String, EngineError> {
    let records = blocks
        .iter()
        .map(|block| {
            Ok(BlockRecord {
                id: &block.id,
                block_type: block.block_type(),
                position: block.position,
                data: block.data.to_value()?,
                styles: block.styles.as_ref(),
                metadata: &block.metadata,
            })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    let envelope = DocumentEnvelope {
        schema_version: SCHEMA_VERSION,
        blocks: records,
    };
    let text = match format {
        Format::Compact => serde_json::to_string(&envelope)?,
        Format::Pretty => serde_json::to_string_pretty(&envelope)?,
    };
    Ok(text)
}

/// Decode a document, dropping records that fail structural validation.
///
/// Fails as a whole only when the text is not JSON, the top level is neither
/// an array nor a document object, or the schema version is newer than
/// [`SCHEMA_VERSION`]. Accepted blocks are ordered by their recorded
/// position (ties keep document order) and renumbered.
pub fn deserialize(text: &str) -> Result<ImportReport, EngineError> {
    let root: Value = serde_json::from_str(text)
        .map_err(|e| EngineError::MalformedDocument(format!("not valid JSON: {e}")))?;
    let entries = top_level_entries(root)?;

    let mut accepted: Vec<(f64, Block)> = Vec::with_capacity(entries.len());
    let mut dropped = Vec::new();
    let mut seen = HashSet::new();

    for (index, entry) in entries.into_iter().enumerate() {
        match decode_entry(entry) {
            Ok((position, block)) => {
                if seen.insert(block.id.clone()) {
                    accepted.push((position, block));
                } else {
                    dropped.push(DroppedEntry {
                        index,
                        id: Some(block.id),
                        reason: DropReason::DuplicateId,
                    });
                }
            }
            Err((id, reason)) => dropped.push(DroppedEntry { index, id, reason }),
        }
    }

    for entry in &dropped {
        log::warn!("dropping document {entry}");
    }

    // Stable sort: equal positions keep document order
    accepted.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    let blocks = accepted
        .into_iter()
        .enumerate()
        .map(|(index, (_, mut block))| {
            block.position = index;
            block
        })
        .collect();

    Ok(ImportReport { blocks, dropped })
}

fn top_level_entries(root: Value) -> Result<Vec<Value>, EngineError> {
    match root {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut envelope) => {
            if let Some(version) = envelope.get("schemaVersion") {
                let version = version.as_u64().ok_or_else(|| {
                    EngineError::MalformedDocument(
                        "schemaVersion must be a non-negative integer".to_string(),
                    )
                })?;
                if version > SCHEMA_VERSION {
                    return Err(EngineError::MalformedDocument(format!(
                        "schema version {version} is newer than supported version {SCHEMA_VERSION}"
                    )));
                }
            }
            match envelope.remove("blocks") {
                Some(Value::Array(entries)) => Ok(entries),
                _ => Err(EngineError::MalformedDocument(
                    "document has no blocks array".to_string(),
                )),
            }
        }
        _ => Err(EngineError::MalformedDocument(
            "expected a document object or an array of blocks".to_string(),
        )),
    }
}

type EntryError = (Option<BlockId>, DropReason);

fn decode_entry(entry: Value) -> Result<(f64, Block), EntryError> {
    let Value::Object(mut record) = entry else {
        return Err((None, DropReason::NotAnObject));
    };

    let id = match record.get("id") {
        Some(Value::String(id)) if !id.is_empty() => BlockId::from(id.as_str()),
        _ => return Err((None, DropReason::MissingId)),
    };
    let fail = |reason: DropReason| -> Result<(f64, Block), EntryError> {
        Err((Some(id.clone()), reason))
    };

    let block_type = match record.get("type") {
        Some(Value::String(name)) => match name.parse::<BlockType>() {
            Ok(block_type) => block_type,
            Err(_) => return fail(DropReason::UnknownType(name.clone())),
        },
        _ => return fail(DropReason::MissingType),
    };

    let Some(position) = record.get("position").and_then(Value::as_f64) else {
        return fail(DropReason::MissingPosition);
    };

    let data = match record.remove("data") {
        Some(Value::Null) | None => return fail(DropReason::MissingData),
        Some(value) => match BlockData::from_value(block_type, value) {
            Ok(data) => data,
            Err(e) => return fail(DropReason::InvalidData(e.to_string())),
        },
    };

    let styles = match record.remove("styles") {
        Some(Value::Null) | None => None,
        Some(value @ Value::Object(_)) => match serde_json::from_value::<BlockStyles>(value) {
            Ok(styles) => Some(styles),
            Err(e) => return fail(DropReason::InvalidStyles(e.to_string())),
        },
        Some(_) => {
            return fail(DropReason::InvalidStyles(
                "styles must be a JSON object".to_string(),
            ));
        }
    };

    let metadata = decode_metadata(&mut record);

    let block = Block {
        id,
        position: 0,
        data,
        styles,
        metadata,
    };
    Ok((position, block))
}

/// Metadata is bookkeeping: a missing or unreadable record gets a fresh one
fn decode_metadata(record: &mut Map<String, Value>) -> BlockMetadata {
    record
        .remove("metadata")
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}
