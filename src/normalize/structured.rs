use super::entry::looks_like_entry;
use crate::error::{Result, SyncError};
use serde_json::Value;

/// Extracts every URL/IP-shaped string leaf from a nested document,
/// wherever it appears. No field name carries meaning; the validity
/// predicate is the sole filter, which keeps extraction robust to unknown
/// or varying document shapes.
pub(super) fn extract(body: &str) -> Result<Vec<String>> {
    let document: Value = serde_json::from_str(body)
        .map_err(|e| SyncError::Parse(format!("malformed structured document: {e}")))?;

    let mut found = Vec::new();
    walk(&document, &mut found);
    Ok(found)
}

/// Depth-first over objects, arrays and scalars. Only string leaves can
/// yield candidates; numbers, booleans and null never do.
fn walk(value: &Value, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for child in map.values() {
                walk(child, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, found);
            }
        }
        Value::String(leaf) => {
            let leaf = leaf.trim();
            if looks_like_entry(leaf) {
                found.push(leaf.to_string());
            }
        }
        _ => {}
    }
}
