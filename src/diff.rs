use crate::normalize::EntrySet;

/// What separates the source list from the category's current membership.
/// Ephemeral, computed once per run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Present in the source, absent in the category.
    pub additions: EntrySet,
    /// Present in the category, absent in the source.
    pub removals: EntrySet,
}

impl DiffResult {
    /// When both sides are empty the run performs no mutation.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }
}

/// Pure set difference in both directions. No side effects, no I/O.
pub fn diff(source: &EntrySet, current: &EntrySet) -> DiffResult {
    DiffResult {
        additions: source.difference(current).cloned().collect(),
        removals: current.difference(source).cloned().collect(),
    }
}
