use crate::error::{Result, SyncError};
use tracing::warn;

/// Header names tried in order when no column is configured.
const INFERRED_HEADERS: [&str; 8] = [
    "url", "urls", "domain", "host", "hostname", "ip", "address", "cidr",
];

/// Extracts the URL/IP column from a delimited table with a header row.
pub(super) fn extract(body: &str, configured_column: Option<&str>) -> Result<Vec<String>> {
    // Comment lines are not valid CSV; strip them before parsing.
    let data: String = body
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SyncError::Parse(format!("table header row: {e}")))?
        .clone();

    let column = match configured_column {
        Some(name) => headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name)),
        None => INFERRED_HEADERS.iter().find_map(|candidate| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(candidate))
        }),
    }
    .ok_or_else(|| {
        SyncError::Parse(format!(
            "no URL/IP column found among table headers {:?}",
            headers.iter().collect::<Vec<_>>()
        ))
    })?;

    let mut candidates = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| SyncError::Parse(format!("table row {}: {e}", idx + 2)))?;
        match record.get(column) {
            Some(value) => candidates.push(value.trim().to_string()),
            None => warn!("Skipping row {}: column {} out of bounds", idx + 2, column),
        }
    }
    Ok(candidates)
}
