use std::cmp::Ordering;

use crate::selector::{compare_model_names, transit_then_age, Selector};
use crate::types::InventoryRow;

/// Orders rows by model name, then transit-last and oldest first within
/// each model.
pub struct ModelAgeSelector;

impl Selector<InventoryRow> for ModelAgeSelector {
    fn compare(&self, a: &InventoryRow, b: &InventoryRow) -> Ordering {
        compare_model_names(&a.model, &b.model).then_with(|| transit_then_age(a, b))
    }
}

/// Model-then-age copy of `rows`; the input is left untouched.
pub fn sort_by_model_then_age(rows: &[InventoryRow]) -> Vec<InventoryRow> {
    ModelAgeSelector.sort(rows.to_vec())
}
