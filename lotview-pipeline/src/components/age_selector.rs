use std::cmp::Ordering;

use crate::selector::{transit_then_age, Selector};
use crate::types::InventoryRow;

/// Orders rows oldest first, with every in-transit unit after every
/// on-lot unit regardless of age.
pub struct AgeSelector;

impl Selector<InventoryRow> for AgeSelector {
    fn compare(&self, a: &InventoryRow, b: &InventoryRow) -> Ordering {
        transit_then_age(a, b)
    }
}

/// Age-descending copy of `rows`; the input is left untouched.
pub fn sort_by_age_descending(rows: &[InventoryRow]) -> Vec<InventoryRow> {
    AgeSelector.sort(rows.to_vec())
}
