use std::sync::{Arc, RwLock, RwLockWriteGuard};

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::cache::{self, CacheFreshness, CachedSnapshot, SnapshotCache};
use crate::config::DashboardConfig;
use crate::inventory_loader::load_inventory;
use crate::side_effect::SideEffect;
use crate::source::InventorySource;
use crate::store::{LoadOutcome, LoadTicket, ViewStore};
use crate::types::{DrillSelector, FilterSpec};

/// What `Dashboard::open` did.
#[derive(Debug)]
pub struct OpenOutcome {
    /// Freshness of the cache entry that was shown first, if any.
    pub cached: Option<CacheFreshness>,
    /// Result of the fetch awaited because nothing usable was cached.
    pub load: Option<LoadOutcome>,
    /// Background refetch started behind a stale cache entry.
    pub refetch: Option<JoinHandle<LoadOutcome>>,
}

/// The inventory dashboard.
///
/// Owns the current `ViewStore` and wires it to its collaborators:
/// 1. `InventorySource` fetches the spreadsheet export
/// 2. `load_inventory` parses and coerces it into rows
/// 3. `ViewStore::complete_load` applies the rows unless a newer load
///    has started in the meantime
/// 4. `SnapshotCache` keeps the applied rows for the next open
/// 5. `SideEffect`s run after every filter change (URL sync)
///
/// The lock is never held across an await, so reads stay available while
/// a fetch is in flight.
pub struct Dashboard {
    config: DashboardConfig,
    source: Box<dyn InventorySource>,
    cache: Arc<dyn SnapshotCache>,
    side_effects: Vec<Box<dyn SideEffect<FilterSpec>>>,
    state: RwLock<ViewStore>,
}

impl Dashboard {
    pub fn new(
        config: DashboardConfig,
        source: Box<dyn InventorySource>,
        cache: Arc<dyn SnapshotCache>,
    ) -> Self {
        let state = RwLock::new(ViewStore::new(&config));
        Self {
            config,
            source,
            cache,
            side_effects: Vec::new(),
            state,
        }
    }

    /// Restore filters from a URL query string.
    pub fn with_query(self, query: &str) -> Self {
        let restored = ViewStore::from_query(&self.config, query);
        *self.lock_state() = restored;
        self
    }

    pub fn with_side_effect(mut self, side_effect: Box<dyn SideEffect<FilterSpec>>) -> Self {
        self.side_effects.push(side_effect);
        self
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The current view state. Cheap: row data is shared.
    pub fn snapshot(&self) -> ViewStore {
        match self.state.read() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_filters(&self, filters: FilterSpec) -> ViewStore {
        let (next, ()) = self.update(|state| (state.with_filters(filters.clone()), ()));
        self.run_side_effects(&filters);
        next
    }

    /// Change only the search term, keeping the other selections as they
    /// are at the moment of the write.
    pub fn set_search_term(&self, search_term: &str) -> ViewStore {
        let (next, filters) = self.update(|state| {
            let next = state.with_search_term(search_term);
            let filters = next.filters().clone();
            (next, filters)
        });
        self.run_side_effects(&filters);
        next
    }

    pub fn set_drill(&self, drill: Option<DrillSelector>) -> ViewStore {
        self.update(|state| (state.with_drill(drill), ())).0
    }

    pub fn select_row(&self, stock_number: Option<String>) -> ViewStore {
        self.update(|state| (state.with_selected(stock_number), ())).0
    }

    /// Show cached rows for `scope` if an unexpired entry exists.
    pub fn hydrate_from_cache(&self, scope: &str) -> Option<CacheFreshness> {
        let (snapshot, freshness) =
            cache::lookup(self.cache.as_ref(), scope, Utc::now(), &self.config.cache)?;
        log::info!(
            "cache hit scope={} freshness={:?} rows={}",
            scope,
            freshness,
            snapshot.rows.len()
        );
        self.update(|state| (state.with_rows(snapshot.rows, Some(snapshot.timestamp)), ()));
        Some(freshness)
    }

    /// Fetch a full snapshot and apply it if no newer load has started.
    pub async fn reload(&self, scope: &str) -> LoadOutcome {
        let ticket = self.start_load(scope);
        self.finish_load(scope, ticket).await
    }

    /// Run a reload on its own task. The load is marked as started before
    /// this returns, so a later reload supersedes it.
    pub fn spawn_reload(self: &Arc<Self>, scope: &str) -> JoinHandle<LoadOutcome> {
        let ticket = self.start_load(scope);
        let dashboard = Arc::clone(self);
        let scope = scope.to_string();
        tokio::spawn(async move { dashboard.finish_load(&scope, ticket).await })
    }

    fn start_load(&self, scope: &str) -> LoadTicket {
        let (_, ticket) = self.update(|state| state.begin_load());
        log::info!(
            "load started source={} scope={} generation={}",
            self.source.name(),
            scope,
            ticket.generation()
        );
        ticket
    }

    async fn finish_load(&self, scope: &str, ticket: LoadTicket) -> LoadOutcome {
        let result = match self.source.fetch(scope).await {
            Ok(bytes) => load_inventory(bytes.as_slice()),
            Err(e) => Err(e),
        };

        let (next, outcome) = self.update(|state| state.complete_load(ticket, result));
        if let LoadOutcome::Applied { .. } = outcome {
            let snapshot = CachedSnapshot::new(
                next.rows().to_vec(),
                next.loaded_at().unwrap_or_else(Utc::now),
            );
            self.cache.put(scope, snapshot);
        }
        outcome
    }

    /// First load for a scope.
    ///
    /// A fresh cache entry is served without fetching. A stale one is
    /// served at once and a refetch is spawned; its handle is returned in
    /// `refetch`. With nothing usable cached the fetch is awaited.
    pub async fn open(self: &Arc<Self>, scope: &str) -> OpenOutcome {
        let cached = self.hydrate_from_cache(scope);
        match cached {
            Some(CacheFreshness::Fresh) => OpenOutcome {
                cached,
                load: None,
                refetch: None,
            },
            Some(CacheFreshness::Stale) => OpenOutcome {
                cached,
                load: None,
                refetch: Some(self.spawn_reload(scope)),
            },
            _ => OpenOutcome {
                cached,
                load: Some(self.reload(scope).await),
                refetch: None,
            },
        }
    }

    fn run_side_effects(&self, filters: &FilterSpec) {
        for side_effect in self.side_effects.iter().filter(|s| s.enable(filters)) {
            if let Err(e) = side_effect.run(filters) {
                log::warn!("side effect {} failed: {}", side_effect.name(), e);
            }
        }
    }

    /// Replace the state with the first element of `f`'s result and return
    /// the new state alongside the second.
    fn update<T>(&self, f: impl FnOnce(&ViewStore) -> (ViewStore, T)) -> (ViewStore, T) {
        let mut state = self.lock_state();
        let (next, extra) = f(&state);
        *state = next.clone();
        (next, extra)
    }

    fn lock_state(&self) -> RwLockWriteGuard<'_, ViewStore> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
