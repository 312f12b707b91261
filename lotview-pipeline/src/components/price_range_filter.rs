use crate::filter::Filter;
use crate::types::{FilterSpec, InventoryRow};
use crate::util::parse_lenient_number;

/// Keeps rows whose MSRP lies within the entered price bounds.
///
/// Bounds that do not parse as numbers are ignored rather than rejected,
/// so a half-typed "abc" never empties the table.
pub struct PriceRangeFilter;

impl PriceRangeFilter {
    fn bounds(query: &FilterSpec) -> (Option<f64>, Option<f64>) {
        (
            parse_lenient_number(&query.price_min),
            parse_lenient_number(&query.price_max),
        )
    }
}

impl Filter<FilterSpec, InventoryRow> for PriceRangeFilter {
    fn enable(&self, query: &FilterSpec) -> bool {
        let (min, max) = Self::bounds(query);
        min.is_some() || max.is_some()
    }

    fn keep(&self, query: &FilterSpec, row: &InventoryRow) -> bool {
        let (min, max) = Self::bounds(query);
        min.map_or(true, |min| row.msrp >= min) && max.map_or(true, |max| row.msrp <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(msrp: f64) -> InventoryRow {
        InventoryRow {
            msrp,
            ..InventoryRow::default()
        }
    }

    fn query(min: &str, max: &str) -> FilterSpec {
        FilterSpec {
            price_min: min.into(),
            price_max: max.into(),
            ..FilterSpec::default()
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let q = query("40000", "50000");
        assert!(PriceRangeFilter.keep(&q, &row(40000.0)));
        assert!(PriceRangeFilter.keep(&q, &row(50000.0)));
        assert!(!PriceRangeFilter.keep(&q, &row(39999.0)));
        assert!(!PriceRangeFilter.keep(&q, &row(50001.0)));
    }

    #[test]
    fn unparsable_bounds_are_ignored() {
        let q = query("abc", "");
        assert!(!PriceRangeFilter.enable(&q));
        assert!(PriceRangeFilter.keep(&q, &row(1.0)));

        let q = query("abc", "$60,000");
        assert!(PriceRangeFilter.enable(&q));
        assert!(PriceRangeFilter.keep(&q, &row(59000.0)));
        assert!(!PriceRangeFilter.keep(&q, &row(61000.0)));
    }
}
