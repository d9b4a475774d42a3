//! Error types for block rendering.

use thiserror::Error;

/// Errors that can occur while rendering a single block.
///
/// These never escape the dispatcher: each one is contained to the block
/// that produced it and shown as an inline error placeholder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A field the renderer cannot do without is empty.
    #[error("{block_type}: missing required field `{field}`")]
    MissingField { block_type: String, field: String },

    /// A known block type whose payload did not decode.
    #[error("block {index} ({block_type}): malformed payload: {message}")]
    Malformed {
        block_type: String,
        index: usize,
        message: String,
    },

    /// The renderer for one block panicked; siblings are unaffected.
    #[error("block {index} ({block_type}) failed to render: {message}")]
    Panicked {
        block_type: String,
        index: usize,
        message: String,
    },
}

impl RenderError {
    pub fn missing_field(block_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            block_type: block_type.into(),
            field: field.into(),
        }
    }

    /// Build from a `catch_unwind` payload.
    pub fn panicked(
        block_type: impl Into<String>,
        index: usize,
        payload: &(dyn std::any::Any + Send),
    ) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());
        Self::Panicked {
            block_type: block_type.into(),
            index,
            message,
        }
    }
}

/// Result type for block rendering.
pub type Result<T> = std::result::Result<T, RenderError>;
