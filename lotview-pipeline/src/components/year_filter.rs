use crate::filter::Filter;
use crate::types::{FilterSpec, InventoryRow};

/// Keeps rows whose model year equals the selected year.
pub struct YearFilter;

impl Filter<FilterSpec, InventoryRow> for YearFilter {
    fn enable(&self, query: &FilterSpec) -> bool {
        query.year_constraint().is_some()
    }

    fn keep(&self, query: &FilterSpec, row: &InventoryRow) -> bool {
        match query.year_constraint() {
            Some(year) => row.year.to_string() == year,
            None => true,
        }
    }
}
