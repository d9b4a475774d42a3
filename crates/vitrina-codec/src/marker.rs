//! Manual-field marker protocol.
//!
//! Generators embed a literal bracketed token (default `[MANUAL]`) in any
//! string value that needs a human-supplied replacement. The importer reports
//! every occurrence and strips the token before the document is committed.

use serde_json::Value;

/// Default marker token.
pub const DEFAULT_MARKER: &str = "[MANUAL]";

/// Paths (`metadata.titulo`, `bloques[2].data.url`) of string values that
/// contain `marker`. Object keys are not scanned.
pub fn scan(value: &Value, marker: &str) -> Vec<String> {
    let mut hits = Vec::new();
    if !marker.is_empty() {
        scan_at(value, marker, String::new(), &mut hits);
    }
    hits
}

fn scan_at(value: &Value, marker: &str, path: String, hits: &mut Vec<String>) {
    match value {
        Value::String(s) if s.contains(marker) => hits.push(path),
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                scan_at(item, marker, format!("{path}[{idx}]"), hits);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                scan_at(item, marker, child, hits);
            }
        }
        _ => {}
    }
}

/// Remove every occurrence of `marker` from string values, trimming what is
/// left. Returns the number of values changed.
pub fn strip(value: &mut Value, marker: &str) -> usize {
    if marker.is_empty() {
        return 0;
    }
    match value {
        Value::String(s) if s.contains(marker) => {
            *s = s.replace(marker, "").trim().to_string();
            1
        }
        Value::Array(items) => items.iter_mut().map(|item| strip(item, marker)).sum(),
        Value::Object(map) => map.values_mut().map(|item| strip(item, marker)).sum(),
        _ => 0,
    }
}

// ============================================================================
// Tests
// ============================================================================
