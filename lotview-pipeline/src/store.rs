//! View state.
//!
//! A `ViewStore` is an immutable snapshot of the loaded rows plus the
//! user's selections. Every setter returns a new snapshot. Derived views
//! are computed lazily and memoized inside the snapshot they belong to:
//! views that depend only on the rows live in a shared `RowSnapshot` and
//! survive selection changes; the filtered view is dropped whenever the
//! filters change.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;

use crate::aging::{self, AgingSummary};
use crate::components::age_selector::sort_by_age_descending;
use crate::config::DashboardConfig;
use crate::error::LoadResult;
use crate::evaluator::FilterEvaluator;
use crate::grouping::group_rows;
use crate::model_normalizer::row_display_name;
use crate::query_params::{decode_filters, encode_filters};
use crate::types::{DrillSelector, FilterSpec, InventoryKpis, InventoryRow, ModelGroup};

/// Issued when a load starts; only the most recently issued ticket may
/// replace the rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened when a load settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { rows: usize },
    /// A newer load was started before this one settled.
    Superseded,
    /// The previous rows were kept.
    Failed { message: String },
}

#[derive(Default)]
struct RowSnapshot {
    rows: Vec<InventoryRow>,
    generation: u64,
    loaded_at: Option<DateTime<Utc>>,
    sorted: OnceCell<Vec<InventoryRow>>,
    aging: OnceCell<AgingSummary>,
    model_options: OnceCell<Vec<String>>,
}

impl RowSnapshot {
    fn new(rows: Vec<InventoryRow>, generation: u64, loaded_at: Option<DateTime<Utc>>) -> Self {
        Self {
            rows,
            generation,
            loaded_at,
            ..Self::default()
        }
    }
}

#[derive(Clone)]
pub struct ViewStore {
    snapshot: Arc<RowSnapshot>,
    filters: FilterSpec,
    drill: Option<DrillSelector>,
    selected_stock: Option<String>,
    new_arrival_days: u32,
    oldest_units_limit: usize,
    latest_ticket: u64,
    pending: Option<u64>,
    last_error: Option<String>,
    filtered: Arc<OnceCell<Vec<InventoryRow>>>,
}

impl ViewStore {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            snapshot: Arc::new(RowSnapshot::default()),
            filters: FilterSpec::default(),
            drill: None,
            selected_stock: None,
            new_arrival_days: config.new_arrival_days,
            oldest_units_limit: config.oldest_units_limit,
            latest_ticket: 0,
            pending: None,
            last_error: None,
            filtered: Arc::new(OnceCell::new()),
        }
    }

    /// Initial state with filters restored from a URL query string.
    pub fn from_query(config: &DashboardConfig, query: &str) -> Self {
        Self::new(config).with_filters(decode_filters(query))
    }

    // -----------------------------------------------------------------------
    // Setters
    // -----------------------------------------------------------------------

    /// Replace the row set wholesale, outside of a tracked load (e.g. from
    /// the cache).
    pub fn with_rows(&self, rows: Vec<InventoryRow>, loaded_at: Option<DateTime<Utc>>) -> Self {
        Self {
            snapshot: Arc::new(RowSnapshot::new(rows, self.snapshot.generation, loaded_at)),
            filtered: Arc::new(OnceCell::new()),
            ..self.clone()
        }
    }

    pub fn with_filters(&self, filters: FilterSpec) -> Self {
        Self {
            filters,
            filtered: Arc::new(OnceCell::new()),
            ..self.clone()
        }
    }

    pub fn with_search_term(&self, search_term: impl Into<String>) -> Self {
        self.with_filters(FilterSpec {
            search_term: search_term.into(),
            ..self.filters.clone()
        })
    }

    pub fn with_drill(&self, drill: Option<DrillSelector>) -> Self {
        Self {
            drill,
            ..self.clone()
        }
    }

    pub fn with_selected(&self, stock_number: Option<String>) -> Self {
        Self {
            selected_stock: stock_number,
            ..self.clone()
        }
    }

    /// Start a load. Any load started earlier becomes stale.
    pub fn begin_load(&self) -> (Self, LoadTicket) {
        let generation = self.latest_ticket + 1;
        let next = Self {
            latest_ticket: generation,
            pending: Some(generation),
            ..self.clone()
        };
        (next, LoadTicket { generation })
    }

    /// Settle a load. Results for stale tickets are ignored; failures keep
    /// the current rows and record the message.
    pub fn complete_load(
        &self,
        ticket: LoadTicket,
        result: LoadResult<Vec<InventoryRow>>,
    ) -> (Self, LoadOutcome) {
        if ticket.generation != self.latest_ticket {
            log::info!(
                "load generation={} superseded by generation={}",
                ticket.generation,
                self.latest_ticket
            );
            return (self.clone(), LoadOutcome::Superseded);
        }

        match result {
            Ok(rows) => {
                let count = rows.len();
                log::info!("load generation={} applied rows={}", ticket.generation, count);
                let next = Self {
                    snapshot: Arc::new(RowSnapshot::new(
                        rows,
                        ticket.generation,
                        Some(Utc::now()),
                    )),
                    pending: None,
                    last_error: None,
                    filtered: Arc::new(OnceCell::new()),
                    ..self.clone()
                };
                (next, LoadOutcome::Applied { rows: count })
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("load generation={} failed: {}", ticket.generation, message);
                let next = Self {
                    pending: None,
                    last_error: Some(message.clone()),
                    ..self.clone()
                };
                (next, LoadOutcome::Failed { message })
            }
        }
    }

    // -----------------------------------------------------------------------
    // State accessors
    // -----------------------------------------------------------------------

    pub fn rows(&self) -> &[InventoryRow] {
        &self.snapshot.rows
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn drill(&self) -> Option<DrillSelector> {
        self.drill
    }

    /// Generation of the load that produced the current rows (0 if none).
    pub fn generation(&self) -> u64 {
        self.snapshot.generation
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.loaded_at
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The URL form of the current filters.
    pub fn query_string(&self) -> String {
        encode_filters(&self.filters)
    }

    /// The row open in the detail drawer, if it is in this snapshot.
    pub fn selected_row(&self) -> Option<&InventoryRow> {
        let stock = self.selected_stock.as_deref()?;
        self.snapshot.rows.iter().find(|r| r.stock_number == stock)
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Every row, transit last and oldest first.
    pub fn sorted_rows(&self) -> &[InventoryRow] {
        self.snapshot
            .sorted
            .get_or_init(|| sort_by_age_descending(&self.snapshot.rows))
    }

    /// Rows passing the current filters, in `sorted_rows` order.
    pub fn filtered_rows(&self) -> &[InventoryRow] {
        self.filtered.get_or_init(|| {
            FilterEvaluator::default()
                .apply(&self.filters, self.sorted_rows().to_vec())
                .kept
        })
    }

    pub fn filtered_groups(&self) -> Vec<ModelGroup> {
        group_rows(self.filtered_rows())
    }

    /// Aging buckets over all rows; filters only narrow the table.
    pub fn aging_summary(&self) -> &AgingSummary {
        self.snapshot
            .aging
            .get_or_init(|| aging::aging_summary(&self.snapshot.rows))
    }

    pub fn kpis(&self) -> InventoryKpis {
        aging::compute_kpis(&self.snapshot.rows, self.new_arrival_days)
    }

    pub fn new_arrivals(&self) -> Vec<InventoryRow> {
        aging::new_arrivals(self.sorted_rows(), self.new_arrival_days)
    }

    pub fn oldest_units(&self) -> Vec<InventoryRow> {
        aging::oldest_units(&self.snapshot.rows, self.oldest_units_limit)
    }

    /// Rows behind a KPI card, over the whole snapshot.
    pub fn drill_rows(&self, selector: DrillSelector) -> Vec<InventoryRow> {
        let rows = self.sorted_rows();
        match selector {
            DrillSelector::Total => rows.to_vec(),
            DrillSelector::New => aging::new_arrivals(rows, self.new_arrival_days),
            DrillSelector::Aging(bucket) => aging::rows_in_bucket(rows, bucket),
            DrillSelector::InTransit => rows.iter().filter(|r| r.is_in_transit()).cloned().collect(),
        }
    }

    pub fn drill_groups_for(&self, selector: DrillSelector) -> Vec<ModelGroup> {
        group_rows(&self.drill_rows(selector))
    }

    /// Groups for the active drill-down, if one is selected.
    pub fn drill_groups(&self) -> Option<Vec<ModelGroup>> {
        self.drill.map(|selector| self.drill_groups_for(selector))
    }

    /// Distinct model dropdown entries across all rows, sorted.
    pub fn model_options(&self) -> &[String] {
        self.snapshot.model_options.get_or_init(|| {
            self.snapshot
                .rows
                .iter()
                .map(row_display_name)
                .filter(|name| !name.is_empty())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::types::{AgingBucket, LotStatus};

    fn row(stock: &str, model: &str, model_number: &str, age: u32, status: LotStatus) -> InventoryRow {
        InventoryRow {
            stock_number: stock.into(),
            year: 2024,
            model: model.into(),
            model_number: model_number.into(),
            age,
            lot_status: status,
            msrp: 50000.0,
            ..InventoryRow::default()
        }
    }

    fn sample_rows() -> Vec<InventoryRow> {
        vec![
            row("A", "SILVERADO 1500", "CK10543", 45, LotStatus::OnLot),
            row("B", "SIERRA 1500", "TK10543", 5, LotStatus::InTransit),
            row("C", "TAHOE", "CK10706", 20, LotStatus::OnLot),
            row("D", "SILVERADO 1500", "CK10743", 95, LotStatus::OnLot),
            row("E", "TAHOE", "CK10706", 3, LotStatus::OnLot),
        ]
    }

    fn loaded_store() -> ViewStore {
        ViewStore::new(&DashboardConfig::default()).with_rows(sample_rows(), None)
    }

    fn stocks(rows: &[InventoryRow]) -> Vec<&str> {
        rows.iter().map(|r| r.stock_number.as_str()).collect()
    }

    #[test]
    fn filtered_rows_are_sorted_and_narrowed() {
        let store = loaded_store();
        assert_eq!(stocks(store.filtered_rows()), vec!["D", "A", "C", "E", "B"]);

        let store = store.with_filters(FilterSpec {
            model: "TAHOE".into(),
            ..FilterSpec::default()
        });
        assert_eq!(stocks(store.filtered_rows()), vec!["C", "E"]);
    }

    #[test]
    fn aging_ignores_filters() {
        let store = loaded_store().with_search_term("tahoe");
        assert_eq!(store.filtered_rows().len(), 2);
        let summary = store.aging_summary();
        assert_eq!(summary.on_lot_total, 4);
        assert_eq!(summary.count(AgingBucket::Over90), 1);
    }

    #[test]
    fn setters_leave_previous_snapshot_untouched() {
        let before = loaded_store();
        let after = before.with_filters(FilterSpec {
            year: "2023".into(),
            ..FilterSpec::default()
        });
        assert_eq!(before.filtered_rows().len(), 5);
        assert!(after.filtered_rows().is_empty());
        assert_eq!(before.filters(), &FilterSpec::default());
    }

    #[test]
    fn model_options_are_distinct_display_names() {
        let store = loaded_store();
        assert_eq!(
            store.model_options(),
            &[
                "SIERRA 1500 4WD CREW CAB 147\" WB".to_string(),
                "SILVERADO 1500 4WD CREW CAB 147\" WB".to_string(),
                "SILVERADO 1500 4WD CREW CAB 157\" WB".to_string(),
                "TAHOE".to_string(),
            ]
        );
    }

    #[test]
    fn drill_down_subsets() {
        let store = loaded_store();
        assert_eq!(store.drill_rows(DrillSelector::Total).len(), 5);
        assert_eq!(stocks(&store.drill_rows(DrillSelector::New)), vec!["E"]);
        assert_eq!(stocks(&store.drill_rows(DrillSelector::InTransit)), vec!["B"]);
        assert_eq!(
            stocks(&store.drill_rows(DrillSelector::Aging(AgingBucket::Days0To30))),
            vec!["C", "E"]
        );
        assert!(store.drill_groups().is_none());

        let drilled = store.with_drill(Some(DrillSelector::Aging(AgingBucket::Days0To30)));
        let groups = drilled.drill_groups().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].display_name, "TAHOE");
    }

    #[test]
    fn selected_row_resolves_against_snapshot() {
        let store = loaded_store().with_selected(Some("C".into()));
        assert_eq!(store.selected_row().map(|r| r.model.as_str()), Some("TAHOE"));
        let missing = store.with_selected(Some("ZZZ".into()));
        assert!(missing.selected_row().is_none());
    }

    #[test]
    fn stale_load_cannot_overwrite_newer_snapshot() {
        let store = ViewStore::new(&DashboardConfig::default());
        let (store, first) = store.begin_load();
        let (store, second) = store.begin_load();

        let (store, outcome) = store.complete_load(second, Ok(vec![row("NEW", "TAHOE", "", 1, LotStatus::OnLot)]));
        assert_eq!(outcome, LoadOutcome::Applied { rows: 1 });
        assert!(!store.is_loading());

        let (store, outcome) = store.complete_load(first, Ok(sample_rows()));
        assert_eq!(outcome, LoadOutcome::Superseded);
        assert_eq!(stocks(store.rows()), vec!["NEW"]);
        assert_eq!(store.generation(), second.generation());
    }

    #[test]
    fn failed_load_keeps_previous_rows() {
        let store = loaded_store();
        let (loading, ticket) = store.begin_load();
        assert!(loading.is_loading());
        let (store, outcome) = loading.complete_load(ticket, Err(LoadError::EmptySheet));
        assert!(matches!(outcome, LoadOutcome::Failed { .. }));
        assert_eq!(store.rows().len(), 5);
        assert_eq!(store.last_error(), Some("Spreadsheet has no header row"));
        assert!(!store.is_loading());
    }

    #[test]
    fn filters_restore_from_query() {
        let store = ViewStore::from_query(&DashboardConfig::default(), "model=TAHOE&year=2024");
        assert_eq!(store.filters().model, "TAHOE");
        assert_eq!(store.query_string(), "model=TAHOE&year=2024");
    }

    #[test]
    fn empty_store_views_are_empty() {
        let store = ViewStore::new(&DashboardConfig::default());
        assert!(store.filtered_rows().is_empty());
        assert!(store.filtered_groups().is_empty());
        assert!(store.model_options().is_empty());
        assert_eq!(store.kpis(), InventoryKpis::default());
        assert_eq!(store.aging_summary().on_lot_total, 0);
        assert!(store.oldest_units().is_empty());
    }
}
