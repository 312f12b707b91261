use crate::filter::Filter;
use crate::types::{FilterSpec, InventoryRow};

/// Free-text search across stock number, VIN, model and model number.
pub struct SearchTermFilter;

impl Filter<FilterSpec, InventoryRow> for SearchTermFilter {
    fn enable(&self, query: &FilterSpec) -> bool {
        !query.search_term.trim().is_empty()
    }

    fn keep(&self, query: &FilterSpec, row: &InventoryRow) -> bool {
        let needle = query.search_term.trim().to_lowercase();
        [
            row.stock_number.as_str(),
            row.vin.as_str(),
            row.model.as_str(),
            row.model_number.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(term: &str) -> FilterSpec {
        FilterSpec {
            search_term: term.into(),
            ..FilterSpec::default()
        }
    }

    #[test]
    fn matches_model_substring() {
        let silverado = InventoryRow {
            stock_number: "T1".into(),
            model: "SILVERADO 1500".into(),
            ..InventoryRow::default()
        };
        let tahoe = InventoryRow {
            stock_number: "T2".into(),
            model: "TAHOE".into(),
            ..InventoryRow::default()
        };
        assert!(SearchTermFilter.keep(&query("silv"), &silverado));
        assert!(!SearchTermFilter.keep(&query("silv"), &tahoe));
    }

    #[test]
    fn matches_vin_suffix_and_model_number() {
        let row = InventoryRow {
            vin: "1GCUDDED5RZ100001".into(),
            model_number: "CK10543".into(),
            ..InventoryRow::default()
        };
        assert!(SearchTermFilter.keep(&query("rz100001"), &row));
        assert!(SearchTermFilter.keep(&query("ck105"), &row));
        assert!(!SearchTermFilter.keep(&query("tk105"), &row));
    }
}
