use super::types::Category;
use crate::error::Result;
use crate::normalize::EntrySet;

/// Read/create/update surface of the gateway's category resource. The
/// orchestrator only sees this trait, so it can be exercised without a
/// network.
#[async_trait::async_trait]
pub trait CategoryStore: Send + Sync {
    /// Returns the category whose configured name matches exactly, if any.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// Creates a category with an empty entry set. Idempotent: when a
    /// category of that name already exists it is returned as-is, never
    /// duplicated.
    async fn create(&self, name: &str, description: &str) -> Result<Category>;

    /// Atomically replaces the category's full entry set.
    async fn replace_entries(&self, category: &Category, entries: &EntrySet) -> Result<()>;

    /// Commits staged configuration changes.
    async fn activate(&self) -> Result<()>;
}
