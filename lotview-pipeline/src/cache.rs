//! Short-lived snapshot cache.
//!
//! A cached snapshot is only a head start for the next page load: fresh
//! entries are used as-is, stale entries are shown while a refetch runs,
//! and expired entries are treated as absent.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CachePolicy;
use crate::types::InventoryRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedSnapshot {
    pub rows: Vec<InventoryRow>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheFreshness {
    /// Usable without a refetch.
    Fresh,
    /// Usable immediately, but a refetch should follow.
    Stale,
    /// Treat as absent.
    Expired,
}

impl CachedSnapshot {
    pub fn new(rows: Vec<InventoryRow>, timestamp: DateTime<Utc>) -> Self {
        Self { rows, timestamp }
    }

    /// Entries stamped in the future count as fresh.
    pub fn freshness(&self, now: DateTime<Utc>, policy: &CachePolicy) -> CacheFreshness {
        let age = now.signed_duration_since(self.timestamp);
        if threshold_reached(age, policy.expiry_secs) {
            CacheFreshness::Expired
        } else if threshold_reached(age, policy.fresh_secs) {
            CacheFreshness::Stale
        } else {
            CacheFreshness::Fresh
        }
    }
}

/// A threshold too large for `Duration` is never reached; one too far
/// below zero always is.
fn threshold_reached(age: Duration, secs: i64) -> bool {
    match Duration::try_seconds(secs) {
        Some(threshold) => age >= threshold,
        None => secs < 0,
    }
}

/// Key-value store for snapshots, keyed by cache scope.
pub trait SnapshotCache: Send + Sync {
    fn get(&self, scope: &str) -> Option<CachedSnapshot>;

    fn put(&self, scope: &str, snapshot: CachedSnapshot);

    fn remove(&self, scope: &str);
}

/// Process-local cache; contents do not survive a restart.
#[derive(Default)]
pub struct InMemorySnapshotCache {
    entries: RwLock<HashMap<String, CachedSnapshot>>,
}

impl InMemorySnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotCache for InMemorySnapshotCache {
    fn get(&self, scope: &str) -> Option<CachedSnapshot> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(scope).cloned())
    }

    fn put(&self, scope: &str, snapshot: CachedSnapshot) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(scope.to_string(), snapshot);
        }
    }

    fn remove(&self, scope: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(scope);
        }
    }
}

/// Look up a snapshot, dropping it from the cache if it has expired.
pub fn lookup(
    cache: &dyn SnapshotCache,
    scope: &str,
    now: DateTime<Utc>,
    policy: &CachePolicy,
) -> Option<(CachedSnapshot, CacheFreshness)> {
    let snapshot = cache.get(scope)?;
    match snapshot.freshness(now, policy) {
        CacheFreshness::Expired => {
            cache.remove(scope);
            None
        }
        freshness => Some((snapshot, freshness)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CachePolicy {
        CachePolicy {
            fresh_secs: 60,
            expiry_secs: 600,
        }
    }

    fn snapshot_aged(now: DateTime<Utc>, secs: i64) -> CachedSnapshot {
        CachedSnapshot::new(
            vec![InventoryRow {
                stock_number: "A".into(),
                ..InventoryRow::default()
            }],
            now - Duration::seconds(secs),
        )
    }

    #[test]
    fn freshness_thresholds() {
        let now = Utc::now();
        assert_eq!(snapshot_aged(now, 0).freshness(now, &policy()), CacheFreshness::Fresh);
        assert_eq!(snapshot_aged(now, 59).freshness(now, &policy()), CacheFreshness::Fresh);
        assert_eq!(snapshot_aged(now, 60).freshness(now, &policy()), CacheFreshness::Stale);
        assert_eq!(snapshot_aged(now, 599).freshness(now, &policy()), CacheFreshness::Stale);
        assert_eq!(snapshot_aged(now, 600).freshness(now, &policy()), CacheFreshness::Expired);
        assert_eq!(snapshot_aged(now, -30).freshness(now, &policy()), CacheFreshness::Fresh);
    }

    #[test]
    fn out_of_range_thresholds_do_not_panic() {
        let now = Utc::now();
        let unbounded = CachePolicy {
            fresh_secs: i64::MAX,
            expiry_secs: i64::MAX,
        };
        let old = snapshot_aged(now, 10 * 365 * 86_400);
        assert_eq!(old.freshness(now, &unbounded), CacheFreshness::Fresh);

        let never_expires = CachePolicy {
            fresh_secs: 60,
            expiry_secs: i64::MAX,
        };
        assert_eq!(old.freshness(now, &never_expires), CacheFreshness::Stale);

        let always_expired = CachePolicy {
            fresh_secs: 60,
            expiry_secs: i64::MIN,
        };
        assert_eq!(
            snapshot_aged(now, 0).freshness(now, &always_expired),
            CacheFreshness::Expired
        );
    }

    #[test]
    fn configured_max_expiry_never_expires() {
        let config = crate::config::DashboardConfig::from_json_str(
            r#"{"cache": {"expiry_secs": 9223372036854775807}}"#,
        )
        .unwrap();
        let now = Utc::now();
        let cache = InMemorySnapshotCache::new();
        cache.put("inventory", snapshot_aged(now, 30 * 86_400));
        let (_, freshness) = lookup(&cache, "inventory", now, &config.cache).unwrap();
        assert_eq!(freshness, CacheFreshness::Stale);
    }

    #[test]
    fn scopes_are_independent() {
        let cache = InMemorySnapshotCache::new();
        let now = Utc::now();
        cache.put("north-lot", snapshot_aged(now, 0));
        assert!(cache.get("north-lot").is_some());
        assert!(cache.get("south-lot").is_none());
    }

    #[test]
    fn lookup_evicts_expired_entries() {
        let cache = InMemorySnapshotCache::new();
        let now = Utc::now();
        cache.put("inventory", snapshot_aged(now, 700));
        assert!(lookup(&cache, "inventory", now, &policy()).is_none());
        assert!(cache.get("inventory").is_none());

        cache.put("inventory", snapshot_aged(now, 120));
        let (snapshot, freshness) = lookup(&cache, "inventory", now, &policy()).unwrap();
        assert_eq!(freshness, CacheFreshness::Stale);
        assert_eq!(snapshot.rows.len(), 1);
    }
}
