use crate::filter::Filter;
use crate::types::{FilterSpec, InventoryRow};

/// Keeps rows whose stock number contains the entered text, ignoring case.
pub struct StockNumberFilter;

impl Filter<FilterSpec, InventoryRow> for StockNumberFilter {
    fn enable(&self, query: &FilterSpec) -> bool {
        !query.stock_number.trim().is_empty()
    }

    fn keep(&self, query: &FilterSpec, row: &InventoryRow) -> bool {
        let needle = query.stock_number.trim().to_lowercase();
        row.stock_number.trim().to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_case_insensitive_match() {
        let query = FilterSpec {
            stock_number: " t241 ".into(),
            ..FilterSpec::default()
        };
        let hit = InventoryRow {
            stock_number: "T24101".into(),
            ..InventoryRow::default()
        };
        let miss = InventoryRow {
            stock_number: "C24001".into(),
            ..InventoryRow::default()
        };
        assert!(StockNumberFilter.keep(&query, &hit));
        assert!(!StockNumberFilter.keep(&query, &miss));
    }
}
