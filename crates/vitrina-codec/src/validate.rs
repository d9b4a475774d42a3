//! Import validation: a fixed, ordered pipeline over raw JSON.
//!
//! Produces three independent buckets:
//!
//! - **errors**: blocking; the import is refused.
//! - **warnings**: non-blocking.
//! - **manual fields**: the import proceeds, but a human must complete
//!   these values afterwards (marker tokens, unverifiable references).
//!
//! The pipeline never decodes into typed blocks: it must classify input
//! that does not fit the schema at all.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vitrina_types::{BlockKind, TextFormat};

use crate::json::EXPORT_STAMP;
use crate::marker;

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("static regex"));

const REQUIRED_METADATA: [&str; 3] = ["titulo", "slug", "descripcion_corta"];

/// Import tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Manual-field marker token.
    pub marker: String,
    /// Short descriptions longer than this (in characters) draw a warning.
    pub max_description_len: usize,
    /// Skip the unconditional reference notices for documents carrying our
    /// own export stamp.
    pub trust_export_stamp: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            marker: marker::DEFAULT_MARKER.to_string(),
            max_description_len: 160,
            trust_export_stamp: true,
        }
    }
}

/// Blocking problem: the import is refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

/// Non-blocking problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

/// Why a value needs human follow-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualReason {
    /// The value carried the marker token.
    Marker,
    /// The block points at URLs or ids the importer cannot verify.
    Reference,
}

/// A value that needs human completion after the import.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ManualFieldNotice {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    pub reason: ManualReason,
}

/// Outcome of [`validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub manual_fields: Vec<ManualFieldNotice>,
}

impl ValidationResult {
    /// No blocking errors: commit is allowed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// One-line summary of the blocking errors.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    fn manual(&mut self, path: impl Into<String>, block_type: Option<String>, reason: ManualReason) {
        self.manual_fields.push(ManualFieldNotice {
            path: path.into(),
            block_type,
            reason,
        });
    }
}

fn non_empty_str<'a>(obj: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Validate external JSON claiming to be a document.
pub fn validate(input: &Value, options: &ImportOptions) -> ValidationResult {
    let mut report = ValidationResult::default();

    let Some(root) = input.as_object() else {
        report.error("", "document must be a JSON object");
        return report;
    };

    // 1. Required metadata
    let empty = serde_json::Map::new();
    let metadata = match root.get("metadata") {
        Some(Value::Object(map)) => map,
        Some(_) => {
            report.error("metadata", "metadata must be an object");
            &empty
        }
        None => &empty,
    };
    for field in REQUIRED_METADATA {
        if non_empty_str(metadata, field).is_none() {
            report.error(format!("metadata.{field}"), format!("missing required field `{field}`"));
        }
    }

    // 2. Slug pattern
    if let Some(slug) = non_empty_str(metadata, "slug")
        && !SLUG.is_match(slug)
    {
        report.error(
            "metadata.slug",
            format!("slug `{slug}` must be lowercase words joined by single hyphens"),
        );
    }

    // 3. Description length
    if let Some(description) = non_empty_str(metadata, "descripcion_corta") {
        let len = description.chars().count();
        if len > options.max_description_len {
            report.warn(
                "metadata.descripcion_corta",
                format!(
                    "short description is {len} characters (recommended at most {})",
                    options.max_description_len
                ),
            );
        }
    }

    // 4. Block list
    let blocks = match root.get("bloques") {
        Some(Value::Array(blocks)) => blocks.as_slice(),
        Some(_) => {
            report.error("bloques", "block list must be an array");
            &[]
        }
        None => {
            report.error("bloques", "missing block list");
            &[]
        }
    };

    // 5. Per-block shape, 6. reference notices
    let trusted = options.trust_export_stamp
        && root.get("origen").and_then(Value::as_str) == Some(EXPORT_STAMP);
    let mut seen = HashSet::new();
    for (idx, block) in blocks.iter().enumerate() {
        if let Some(id) = id_key(block)
            && !seen.insert(id.clone())
        {
            report.error(format!("bloques[{idx}].id"), format!("duplicate block id `{id}`"));
        }
        validate_block(idx, block, trusted, &mut report);
    }

    // 7. Marker scan
    for path in marker::scan(input, &options.marker) {
        let block_type = block_type_at(input, &path);
        report.manual(path, block_type, ManualReason::Marker);
    }

    report
}

fn validate_block(idx: usize, block: &Value, trusted: bool, report: &mut ValidationResult) {
    let path = format!("bloques[{idx}]");
    let Some(obj) = block.as_object() else {
        report.error(path, "block must be an object");
        return;
    };
    let Some(tag) = non_empty_str(obj, "type") else {
        report.error(format!("{path}.type"), "block is missing its `type`");
        return;
    };
    let Some(kind) = BlockKind::from_str(tag) else {
        report.warn(
            format!("{path}.type"),
            format!("unknown block type `{tag}` will render as a placeholder"),
        );
        return;
    };

    if kind == BlockKind::Text {
        let data = obj.get("data").and_then(Value::as_object);
        match data.and_then(|d| d.get("format")).and_then(Value::as_str) {
            None => report.error(format!("{path}.data.format"), "text block is missing `format`"),
            Some(format) if TextFormat::from_str(format).is_none() => report.warn(
                format!("{path}.data.format"),
                format!("unknown text format `{format}`"),
            ),
            Some(_) => {}
        }
        if data.and_then(|d| d.get("content")).and_then(Value::as_str).is_none() {
            report.error(format!("{path}.data.content"), "text block is missing `content`");
        }
    }

    check_nested_ids(&path, kind, obj, report);

    if kind.needs_manual_reference() && !trusted {
        report.manual(path, Some(tag.to_string()), ManualReason::Reference);
    }
}

/// Id as it will be committed: trimmed strings, numbers in string form.
/// `None` when the id is absent or blank and will be minted.
fn id_key(value: &Value) -> Option<String> {
    match value.get("id")? {
        Value::String(s) => {
            let id = s.trim();
            (!id.is_empty()).then(|| id.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Nested item ids must be unique within their parent block.
fn check_nested_ids(
    path: &str,
    kind: BlockKind,
    obj: &serde_json::Map<String, Value>,
    report: &mut ValidationResult,
) {
    let Some(data) = obj.get("data").and_then(Value::as_object) else {
        return;
    };
    let mut seen = HashSet::new();
    for field in kind.nested_id_fields() {
        let Some(items) = data.get(*field).and_then(Value::as_array) else {
            continue;
        };
        for (item_idx, item) in items.iter().enumerate() {
            if let Some(id) = id_key(item)
                && !seen.insert(id.clone())
            {
                report.error(
                    format!("{path}.data.{field}[{item_idx}].id"),
                    format!("duplicate item id `{id}`"),
                );
            }
        }
    }
}

/// Block type owning a scanned path, if it is inside `bloques[n]`.
fn block_type_at(input: &Value, path: &str) -> Option<String> {
    let rest = path.strip_prefix("bloques[")?;
    let idx: usize = rest.split(']').next()?.parse().ok()?;
    input["bloques"][idx]["type"].as_str().map(str::to_string)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_doc() -> Value {
        json!({
            "metadata": {
                "titulo": "Las mejores herramientas de diseño",
                "slug": "mejores-herramientas-diseno",
                "descripcion_corta": "Una selección curada."
            },
            "bloques": [
                {"id": "b1", "type": "text", "data": {"format": "paragraph", "content": "<p>Hola</p>"}}
            ]
        })
    }

    // ── Blocking errors ─────────────────────────────────────────────────

    #[test]
    fn test_valid_document_passes() {
        let report = validate(&valid_doc(), &ImportOptions::default());
        assert!(report.is_ok(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
        assert!(report.manual_fields.is_empty());
    }

    #[test]
    fn test_missing_slug_is_single_error() {
        let input = json!({"metadata": {"titulo": "X", "descripcion_corta": "Y"}, "bloques": []});
        let report = validate(&input, &ImportOptions::default());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].path.contains("slug"));
    }

    #[test]
    fn test_non_object_root() {
        let report = validate(&json!([1, 2]), &ImportOptions::default());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "");
    }

    #[test]
    fn test_missing_metadata_reports_each_field() {
        let report = validate(&json!({"bloques": []}), &ImportOptions::default());
        let paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            ["metadata.titulo", "metadata.slug", "metadata.descripcion_corta"]
        );
    }

    #[test]
    fn test_bad_slug_pattern() {
        for slug in ["Mayus", "doble--guion", "-inicio", "fin-", "con espacio", "acentuó"] {
            let mut doc = valid_doc();
            doc["metadata"]["slug"] = json!(slug);
            let report = validate(&doc, &ImportOptions::default());
            assert_eq!(report.errors.len(), 1, "slug {slug:?}");
            assert_eq!(report.errors[0].path, "metadata.slug");
        }
        let mut doc = valid_doc();
        doc["metadata"]["slug"] = json!("top-10-apps-2024");
        assert!(validate(&doc, &ImportOptions::default()).is_ok());
    }

    #[test]
    fn test_block_list_shape() {
        let mut doc = valid_doc();
        doc.as_object_mut().unwrap().remove("bloques");
        let report = validate(&doc, &ImportOptions::default());
        assert_eq!(report.errors[0].message, "missing block list");

        doc["bloques"] = json!({"not": "an array"});
        let report = validate(&doc, &ImportOptions::default());
        assert_eq!(report.errors[0].message, "block list must be an array");
    }

    #[test]
    fn test_block_missing_type() {
        let mut doc = valid_doc();
        doc["bloques"] = json!([{"id": "x", "data": {}}, "nope"]);
        let report = validate(&doc, &ImportOptions::default());
        let paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["bloques[0].type", "bloques[1]"]);
    }

    #[test]
    fn test_duplicate_block_ids_block_import() {
        let mut doc = valid_doc();
        doc["bloques"] = json!([
            {"id": "a", "type": "separator", "data": {}},
            {"id": "a", "type": "separator", "data": {}},
            {"type": "separator", "data": {}}
        ]);
        let report = validate(&doc, &ImportOptions::default());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "bloques[1].id");
    }

    #[test]
    fn test_numeric_and_string_ids_collide() {
        let mut doc = valid_doc();
        doc["bloques"] = json!([
            {"id": 5, "type": "separator", "data": {}},
            {"id": "5", "type": "separator", "data": {}}
        ]);
        let report = validate(&doc, &ImportOptions::default());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "bloques[1].id");
        assert_eq!(report.errors[0].message, "duplicate block id `5`");
    }

    #[test]
    fn test_duplicate_nested_ids_within_parent() {
        let mut doc = valid_doc();
        doc["bloques"] = json!([
            {"id": "f", "type": "faq", "data": {"items": [
                {"id": "q", "question": "¿Uno?", "answer": "Sí."},
                {"id": "q", "question": "¿Dos?", "answer": "No."}
            ]}},
            {"id": "g", "type": "faq", "data": {"items": [
                {"id": "q", "question": "¿Tres?", "answer": "Quizá."}
            ]}}
        ]);
        let report = validate(&doc, &ImportOptions::default());
        let paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["bloques[0].data.items[1].id"]);
    }

    #[test]
    fn test_text_block_requires_format_and_content() {
        let mut doc = valid_doc();
        doc["bloques"] = json!([{"type": "text", "data": {}}]);
        let report = validate(&doc, &ImportOptions::default());
        let paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["bloques[0].data.format", "bloques[0].data.content"]);
    }

    // ── Warnings ────────────────────────────────────────────────────────

    #[test]
    fn test_long_description_warns() {
        let mut doc = valid_doc();
        doc["metadata"]["descripcion_corta"] = json!("a".repeat(161));
        let report = validate(&doc, &ImportOptions::default());
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "metadata.descripcion_corta");
    }

    #[test]
    fn test_unknown_type_warns_only() {
        let mut doc = valid_doc();
        doc["bloques"] = json!([{"type": "hologram", "data": {}}]);
        let report = validate(&doc, &ImportOptions::default());
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_uppercase_text_format_warns() {
        let mut doc = valid_doc();
        doc["bloques"] = json!([{"type": "text", "data": {"format": "H2", "content": "Hola"}}]);
        let report = validate(&doc, &ImportOptions::default());
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "bloques[0].data.format");
    }

    // ── Manual fields ───────────────────────────────────────────────────

    #[test]
    fn test_reference_blocks_flagged_unconditionally() {
        let mut doc = valid_doc();
        doc["bloques"] = json!([
            {"type": "image", "data": {"url": "https://cdn/x.png", "alt": "x"}},
            {"type": "programs-grid", "data": {"programIds": ["figma"]}},
            {"type": "quote", "data": {"text": "hola"}}
        ]);
        let report = validate(&doc, &ImportOptions::default());
        assert!(report.is_ok());
        let flagged: Vec<_> = report
            .manual_fields
            .iter()
            .map(|m| (m.path.as_str(), m.block_type.as_deref(), m.reason))
            .collect();
        assert_eq!(
            flagged,
            [
                ("bloques[0]", Some("image"), ManualReason::Reference),
                ("bloques[1]", Some("programs-grid"), ManualReason::Reference),
            ]
        );
    }

    #[test]
    fn test_export_stamp_suppresses_reference_notices() {
        let mut doc = valid_doc();
        doc["origen"] = json!(EXPORT_STAMP);
        doc["bloques"] = json!([{"id": "i", "type": "image", "data": {"url": "u", "alt": "a"}}]);
        let report = validate(&doc, &ImportOptions::default());
        assert!(report.manual_fields.is_empty());

        let strict = ImportOptions {
            trust_export_stamp: false,
            ..Default::default()
        };
        assert_eq!(validate(&doc, &strict).manual_fields.len(), 1);
    }

    #[test]
    fn test_marker_notices_carry_block_type() {
        let mut doc = valid_doc();
        doc["bloques"] = json!([
            {"type": "cta-banner", "data": {"title": "Prueba", "buttonUrl": "[MANUAL]"}}
        ]);
        let report = validate(&doc, &ImportOptions::default());
        assert_eq!(report.manual_fields.len(), 1);
        let notice = &report.manual_fields[0];
        assert_eq!(notice.path, "bloques[0].data.buttonUrl");
        assert_eq!(notice.block_type.as_deref(), Some("cta-banner"));
        assert_eq!(notice.reason, ManualReason::Marker);
    }
}
