use crate::config::Config;
use crate::diff::diff;
use crate::error::Result;
use crate::gateway::CategoryStore;
use crate::normalize::{normalize, EntrySet};
use crate::source::{self, RawSource};
use tracing::info;

/// Description applied to categories this tool creates.
const CATEGORY_DESCRIPTION: &str = "Synchronized from an external URL list";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The category already matched the source; nothing was written.
    UpToDate,
    /// The full new set was pushed to the gateway.
    Updated { added: usize, removed: usize },
}

/// Drives one complete run: fetch, normalize, resolve the category, diff,
/// write only when the diff is non-empty.
pub async fn run(
    http: &reqwest::Client,
    store: &dyn CategoryStore,
    config: &Config,
) -> Result<SyncOutcome> {
    let raw = source::fetch(http, config).await?;
    reconcile(raw, store, config).await
}

/// The pipeline after the fetch. Split out so tests can inject a payload
/// and a store without any network.
pub async fn reconcile(
    raw: RawSource,
    store: &dyn CategoryStore,
    config: &Config,
) -> Result<SyncOutcome> {
    let source_entries = normalize(&raw, config)?;

    let category = match store.find_by_name(&config.category_name).await? {
        Some(existing) => existing,
        None => {
            info!(
                "Category '{}' not found, creating it",
                config.category_name
            );
            store
                .create(&config.category_name, CATEGORY_DESCRIPTION)
                .await?
        }
    };
    // The comparison baseline is always what the gateway reports, never a
    // remembered set from a prior run.
    let current: EntrySet = category
        .urls
        .iter()
        .map(|u| u.trim().to_string())
        .collect();

    let delta = diff(&source_entries, &current);
    if delta.is_empty() {
        info!(
            "Category '{}' is already up to date ({} entries)",
            category.configured_name,
            current.len()
        );
        return Ok(SyncOutcome::UpToDate);
    }

    info!(
        "Differences found: {} to add, {} to remove",
        delta.additions.len(),
        delta.removals.len()
    );
    // The gateway models entries as an atomic set; always push the full
    // new membership, never a delta.
    store.replace_entries(&category, &source_entries).await?;

    if config.activate_changes {
        store.activate().await?;
    }

    Ok(SyncOutcome::Updated {
        added: delta.additions.len(),
        removed: delta.removals.len(),
    })
}
