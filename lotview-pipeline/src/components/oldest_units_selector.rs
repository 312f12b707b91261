use std::cmp::Ordering;

use crate::selector::{transit_then_age, Selector};
use crate::types::InventoryRow;

/// Selects the N oldest on-lot units for the "oldest units" panel.
///
/// Callers pass only on-lot rows with a positive age; the selector
/// orders and truncates.
pub struct OldestUnitsSelector {
    pub limit: usize,
}

impl Default for OldestUnitsSelector {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl Selector<InventoryRow> for OldestUnitsSelector {
    fn compare(&self, a: &InventoryRow, b: &InventoryRow) -> Ordering {
        transit_then_age(a, b)
    }

    fn size(&self) -> Option<usize> {
        Some(self.limit)
    }
}
