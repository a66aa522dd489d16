mod entry;
mod structured;
mod table;
mod text;

pub use entry::{canonical_entry, looks_like_entry};

use crate::config::{Config, SourceFormat};
use crate::error::{Result, SyncError};
use crate::source::RawSource;
use std::collections::BTreeSet;
use tracing::info;

/// Canonical set of entries: sorted, deduplicated, scheme-stripped.
pub type EntrySet = BTreeSet<String>;

/// Anything shorter cannot be a dotted hostname or address.
const MIN_ENTRY_LEN: usize = 4;

/// Reduces a fetched payload to the canonical entry set. Fails when the
/// payload does not conform to the resolved format, or when zero entries
/// survive extraction (a configuration error, never a silent empty sync).
pub fn normalize(raw: &RawSource, config: &Config) -> Result<EntrySet> {
    let candidates = match raw.format {
        SourceFormat::Text => text::extract(&raw.body),
        SourceFormat::Table => table::extract(&raw.body, config.table_url_column.as_deref())?,
        SourceFormat::Structured => structured::extract(&raw.body)?,
    };
    let total = candidates.len();

    let entries: EntrySet = candidates
        .iter()
        .map(|c| c.trim())
        .filter(|c| looks_like_entry(c))
        .map(canonical_entry)
        .filter(|e| e.len() >= MIN_ENTRY_LEN)
        .collect();

    if entries.is_empty() {
        return Err(SyncError::Parse(format!(
            "no valid URL/IP entries extracted ({total} raw candidates inspected)"
        )));
    }

    info!(
        "Normalized {} entries from {} raw candidates",
        entries.len(),
        total
    );
    Ok(entries)
}
