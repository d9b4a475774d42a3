//! Codec for Vitrina documents.
//!
//! - **Export**: [`export_json`] (canonical, lossless, re-importable) and
//!   [`export_markdown`] (one-way, lossy, never drops a block silently).
//! - **Import**: [`validate`] classifies arbitrary external JSON into
//!   blocking errors, warnings, and manual-field notices; [`commit`] turns an
//!   accepted document into a [`BlogDocument`](vitrina_types::BlogDocument),
//!   stripping manual markers and minting missing ids.
//!
//! Import is all-or-nothing: any blocking error refuses the commit.

mod error;
pub mod inline;
mod json;
mod markdown;
pub mod marker;
mod validate;

pub use error::{CodecError, Result};
pub use json::{EXPORT_STAMP, Imported, commit, export_json, export_json_string, import_str};
pub use markdown::{block_to_markdown, export_markdown};
pub use validate::{
    ImportOptions, ManualFieldNotice, ManualReason, ValidationError, ValidationResult,
    ValidationWarning, validate,
};
