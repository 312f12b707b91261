//! Row inclusion against the current filter selections.

use once_cell::sync::Lazy;

use crate::components::model_filter::ModelFilter;
use crate::components::price_range_filter::PriceRangeFilter;
use crate::components::search_term_filter::SearchTermFilter;
use crate::components::stock_number_filter::StockNumberFilter;
use crate::components::year_filter::YearFilter;
use crate::filter::{Filter, FilterResult};
use crate::types::{FilterSpec, InventoryRow};

/// Runs every filter component over the rows; a row is included iff
/// every enabled filter keeps it.
pub struct FilterEvaluator {
    filters: Vec<Box<dyn Filter<FilterSpec, InventoryRow>>>,
}

impl Default for FilterEvaluator {
    fn default() -> Self {
        Self {
            filters: vec![
                Box::new(ModelFilter),
                Box::new(YearFilter),
                Box::new(PriceRangeFilter),
                Box::new(StockNumberFilter),
                Box::new(SearchTermFilter),
            ],
        }
    }
}

impl FilterEvaluator {
    pub fn filters(&self) -> &[Box<dyn Filter<FilterSpec, InventoryRow>>] {
        &self.filters
    }

    pub fn matches(&self, spec: &FilterSpec, row: &InventoryRow) -> bool {
        self.filters
            .iter()
            .filter(|f| f.enable(spec))
            .all(|f| f.keep(spec, row))
    }

    /// Apply enabled filters in sequence, preserving row order.
    pub fn apply(&self, spec: &FilterSpec, rows: Vec<InventoryRow>) -> FilterResult<InventoryRow> {
        let mut kept = rows;
        let mut removed = Vec::new();
        for filter in self.filters.iter().filter(|f| f.enable(spec)) {
            let result = filter.filter(spec, kept);
            log::trace!(
                "filter={} kept={} removed={}",
                filter.name(),
                result.kept.len(),
                result.removed.len()
            );
            kept = result.kept;
            removed.extend(result.removed);
        }
        FilterResult { kept, removed }
    }
}

static DEFAULT_EVALUATOR: Lazy<FilterEvaluator> = Lazy::new(FilterEvaluator::default);

/// Whether a single row passes the filter selections, using a shared
/// evaluator with the default components.
pub fn row_matches_filter(row: &InventoryRow, spec: &FilterSpec) -> bool {
    DEFAULT_EVALUATOR.matches(spec, row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(stock: &str, year: i32, model: &str, model_number: &str, msrp: f64) -> InventoryRow {
        InventoryRow {
            stock_number: stock.into(),
            year,
            model: model.into(),
            model_number: model_number.into(),
            msrp,
            ..InventoryRow::default()
        }
    }

    #[test]
    fn default_spec_keeps_everything() {
        let rows = vec![
            row("A", 2024, "TAHOE", "", 70000.0),
            row("B", 2025, "SILVERADO 1500", "CK10543", 0.0),
        ];
        let result = FilterEvaluator::default().apply(&FilterSpec::default(), rows);
        assert_eq!(result.kept.len(), 2);
        assert!(result.removed.is_empty());
    }

    #[test]
    fn search_term_scenario() {
        let spec = FilterSpec {
            search_term: "silv".into(),
            ..FilterSpec::default()
        };
        assert!(row_matches_filter(&row("A", 2024, "SILVERADO 1500", "", 1.0), &spec));
        assert!(!row_matches_filter(&row("B", 2024, "TAHOE", "", 1.0), &spec));
    }

    #[test]
    fn all_constraints_must_hold() {
        let spec = FilterSpec {
            model: "SILVERADO 1500".into(),
            year: "2024".into(),
            price_min: "50000".into(),
            price_max: "not a number".into(),
            stock_number: "t".into(),
            search_term: String::new(),
        };
        let evaluator = FilterEvaluator::default();
        assert!(evaluator.matches(&spec, &row("T1", 2024, "SILVERADO 1500", "CK10543", 55000.0)));
        assert!(!evaluator.matches(&spec, &row("T2", 2025, "SILVERADO 1500", "CK10543", 55000.0)));
        assert!(!evaluator.matches(&spec, &row("T3", 2024, "SILVERADO 1500", "CK10543", 45000.0)));
        assert!(!evaluator.matches(&spec, &row("C4", 2024, "SILVERADO 1500", "CK10543", 55000.0)));
        assert!(!evaluator.matches(&spec, &row("T5", 2024, "SIERRA 1500", "TK10543", 55000.0)));
    }

    #[test]
    fn apply_preserves_order_and_reports_removed() {
        let rows = vec![
            row("A", 2024, "TAHOE", "", 1.0),
            row("B", 2025, "TAHOE", "", 1.0),
            row("C", 2024, "EQUINOX", "", 1.0),
            row("D", 2024, "TAHOE", "", 1.0),
        ];
        let spec = FilterSpec {
            model: "TAHOE".into(),
            year: "2024".into(),
            ..FilterSpec::default()
        };
        let result = FilterEvaluator::default().apply(&spec, rows);
        let kept: Vec<_> = result.kept.iter().map(|r| r.stock_number.as_str()).collect();
        assert_eq!(kept, vec!["A", "D"]);
        assert_eq!(result.removed.len(), 2);
    }

    #[test]
    fn shared_evaluator_agrees_with_a_fresh_one() {
        let rows = vec![
            row("T1", 2024, "SILVERADO 1500", "CK10543", 55000.0),
            row("T2", 2025, "TAHOE", "", 72000.0),
            row("C3", 2024, "SIERRA 1500", "TK10543", 61000.0),
        ];
        let specs = vec![
            FilterSpec::default(),
            FilterSpec {
                year: "2024".into(),
                price_min: "56000".into(),
                ..FilterSpec::default()
            },
            FilterSpec {
                stock_number: "t".into(),
                search_term: "tahoe".into(),
                ..FilterSpec::default()
            },
        ];
        let fresh = FilterEvaluator::default();
        for spec in &specs {
            for row in &rows {
                assert_eq!(row_matches_filter(row, spec), fresh.matches(spec, row));
            }
        }
    }
}
