//! Canonical JSON export and validated import.

use serde_json::{Value, json};
use tracing::{debug, info, warn};
use vitrina_types::BlogDocument;
use vitrina_types::walk::fill_missing_ids_json;

use crate::marker;
use crate::validate::{ImportOptions, ValidationResult, validate};
use crate::{CodecError, Result};

/// Value of the `origen` field stamped on every export.
pub const EXPORT_STAMP: &str = "vitrina";

/// Export a document as canonical JSON (`{origen, metadata, bloques}`).
pub fn export_json(doc: &BlogDocument) -> Value {
    json!({
        "origen": EXPORT_STAMP,
        "metadata": serde_json::to_value(&doc.metadata).unwrap_or_default(),
        "bloques": serde_json::to_value(&doc.bloques).unwrap_or_default(),
    })
}

/// Pretty-printed [`export_json`].
pub fn export_json_string(doc: &BlogDocument) -> String {
    serde_json::to_string_pretty(&export_json(doc)).unwrap_or_default()
}

/// A committed import.
#[derive(Debug)]
pub struct Imported {
    pub document: BlogDocument,
    /// Warnings and manual-field notices (errors are always empty here).
    pub report: ValidationResult,
    /// Ids minted for blocks and nested items that arrived without one.
    pub minted_ids: usize,
    /// String values the marker token was stripped from.
    pub stripped_markers: usize,
}

/// Validate and commit external JSON.
///
/// All-or-nothing: any blocking error refuses the import and nothing is
/// produced. Otherwise markers are stripped, missing ids are minted
/// positionally, and the document is decoded.
pub fn commit(mut input: Value, options: &ImportOptions) -> Result<Imported> {
    let report = validate(&input, options);
    if !report.is_ok() {
        warn!(errors = report.errors.len(), "import rejected");
        return Err(CodecError::Rejected(report));
    }

    let stripped_markers = marker::strip(&mut input, &options.marker);
    let minted_ids = input
        .get_mut("bloques")
        .map(fill_missing_ids_json)
        .unwrap_or_default();
    if let Some(root) = input.as_object_mut() {
        root.remove("origen");
    }

    let document: BlogDocument =
        serde_json::from_value(input).map_err(|e| CodecError::Decode(e.to_string()))?;
    document
        .bloques
        .check_unique_ids()
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    debug!(minted_ids, stripped_markers, "import normalized");
    info!(
        slug = %document.metadata.slug,
        blocks = document.bloques.len(),
        warnings = report.warnings.len(),
        manual_fields = report.manual_fields.len(),
        "import committed"
    );

    Ok(Imported {
        document,
        report,
        minted_ids,
        stripped_markers,
    })
}

/// Parse JSON text, then [`commit`].
pub fn import_str(text: &str, options: &ImportOptions) -> Result<Imported> {
    let value: Value = serde_json::from_str(text)?;
    commit(value, options)
}

// ============================================================================
// Tests
// ============================================================================
