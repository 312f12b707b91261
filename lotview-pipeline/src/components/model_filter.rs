use crate::filter::Filter;
use crate::model_normalizer::row_matches_model_filter;
use crate::types::{FilterSpec, InventoryRow};

/// Keeps rows selected by the model dropdown entry.
///
/// Split-model entries match on model and model number; every other
/// entry matches on model name alone.
pub struct ModelFilter;

impl Filter<FilterSpec, InventoryRow> for ModelFilter {
    fn enable(&self, query: &FilterSpec) -> bool {
        !query.model.trim().is_empty()
    }

    fn keep(&self, query: &FilterSpec, row: &InventoryRow) -> bool {
        row_matches_model_filter(row, query.model.trim())
    }
}
