//! Error types for schema-level operations.

use thiserror::Error;

use crate::BlockId;

/// Errors raised by document operations and id checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Block not found in document.
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    /// Two blocks (or two items in the same parent list) share an id.
    #[error("duplicate id {id} in {scope}")]
    DuplicateId { id: BlockId, scope: String },

    /// A block or nested item is missing its id.
    #[error("missing id in {0}")]
    MissingId(String),

    /// Insert or move position past the end of the document.
    #[error("position {pos} out of bounds for document with {len} blocks")]
    PositionOutOfBounds { pos: usize, len: usize },

    /// Unrecognized block type tag.
    #[error("unknown block type: {0}")]
    UnknownKind(String),
}

impl SchemaError {
    /// Create a DuplicateId error.
    pub fn duplicate(id: BlockId, scope: impl Into<String>) -> Self {
        Self::DuplicateId {
            id,
            scope: scope.into(),
        }
    }
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
