//! Error types for kernel services.

use thiserror::Error;
use vitrina_types::SchemaError;

/// Errors from the clipboard, template library, document store and config.
#[derive(Error, Debug)]
pub enum KernelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("clipboard is empty")]
    EmptyClipboard,

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl KernelError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

/// Clipboard operations share the kernel error type.
pub type ClipboardError = KernelError;

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;
