use std::cmp::Ordering;

use crate::types::InventoryRow;
use crate::util;

/// Selectors order and optionally truncate a candidate list.
pub trait Selector<C>: Send + Sync
where
    C: Clone,
{
    /// Default selection: sort and truncate based on provided configs.
    fn select(&self, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = self.sort(candidates);
        if let Some(limit) = self.size() {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Total order between two candidates.
    fn compare(&self, a: &C, b: &C) -> Ordering;

    /// Stable sort by `compare`; ties keep their input order.
    fn sort(&self, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = candidates;
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }

    /// Optionally provide a maximum number of candidates to select.
    /// Defaults to no truncation if not overridden.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}

/// On-lot units before in-transit units, then oldest first.
pub fn transit_then_age(a: &InventoryRow, b: &InventoryRow) -> Ordering {
    a.is_in_transit()
        .cmp(&b.is_in_transit())
        .then_with(|| b.age.cmp(&a.age))
}

/// Case-insensitive ascending model comparison, falling back to a
/// byte-wise comparison so distinct spellings never tie.
pub fn compare_model_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
