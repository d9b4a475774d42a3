//! Error types for import.

use thiserror::Error;

use crate::ValidationResult;

/// Errors that can occur while importing a document.
///
/// Export never fails: unmapped content degrades to placeholders.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation produced blocking errors; nothing was committed.
    #[error("import rejected with {} blocking error(s): {}", .0.errors.len(), .0.summary())]
    Rejected(ValidationResult),

    /// Accepted input failed to decode into a document.
    #[error("decode error: {0}")]
    Decode(String),
}

impl CodecError {
    /// The validation report, when the import was rejected.
    pub fn report(&self) -> Option<&ValidationResult> {
        match self {
            CodecError::Rejected(report) => Some(report),
            _ => None,
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
