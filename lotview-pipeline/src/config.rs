//! Dashboard configuration.
//!
//! Every field has a default, so an empty JSON object (or no config file
//! at all) yields a working dashboard.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DashboardResult;

/// Non-transit units at or below this age count as new arrivals.
const DEFAULT_NEW_ARRIVAL_DAYS: u32 = 7;
/// Rows shown in the "oldest units" panel.
const DEFAULT_OLDEST_UNITS_LIMIT: usize = 10;
/// Cache entries younger than this are used without a refetch.
const DEFAULT_CACHE_FRESH_SECS: i64 = 15 * 60;
/// Cache entries older than this are treated as absent.
const DEFAULT_CACHE_EXPIRY_SECS: i64 = 24 * 60 * 60;
const DEFAULT_CACHE_SCOPE: &str = "inventory";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub new_arrival_days: u32,
    pub oldest_units_limit: usize,
    pub cache: CachePolicy,
    pub cache_scope: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            new_arrival_days: DEFAULT_NEW_ARRIVAL_DAYS,
            oldest_units_limit: DEFAULT_OLDEST_UNITS_LIMIT,
            cache: CachePolicy::default(),
            cache_scope: DEFAULT_CACHE_SCOPE.to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> DashboardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Freshness thresholds for cached snapshots, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    pub fresh_secs: i64,
    pub expiry_secs: i64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            fresh_secs: DEFAULT_CACHE_FRESH_SECS,
            expiry_secs: DEFAULT_CACHE_EXPIRY_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config = DashboardConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.new_arrival_days, 7);
        assert_eq!(config.cache.fresh_secs, 900);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config =
            DashboardConfig::from_json_str(r#"{"oldest_units_limit": 3, "cache": {"expiry_secs": 60}}"#)
                .unwrap();
        assert_eq!(config.oldest_units_limit, 3);
        assert_eq!(config.cache.expiry_secs, 60);
        assert_eq!(config.cache.fresh_secs, DEFAULT_CACHE_FRESH_SECS);
        assert_eq!(config.cache_scope, "inventory");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = DashboardConfig::from_json_str("{not json").unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
