use crate::util;

/// Result of a filter operation, partitioning candidates into kept and removed.
pub struct FilterResult<C> {
    pub kept: Vec<C>,
    pub removed: Vec<C>,
}

/// Filters run sequentially and partition candidates into kept and removed sets.
///
/// Filters are pure predicates over a candidate and the current query; a
/// filter whose query field is blank disables itself through `enable`.
pub trait Filter<Q, C>: Send + Sync {
    /// Decide if this filter should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Whether a single candidate survives this filter.
    fn keep(&self, query: &Q, candidate: &C) -> bool;

    /// Filter candidates by evaluating each against `keep`.
    /// Kept candidates continue to the next filter; removed candidates
    /// are excluded from further processing. Order is preserved in both.
    fn filter(&self, query: &Q, candidates: Vec<C>) -> FilterResult<C> {
        let (kept, removed) = candidates
            .into_iter()
            .partition(|c| self.keep(query, c));
        FilterResult { kept, removed }
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
