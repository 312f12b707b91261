use std::sync::{Arc, RwLock};

use crate::query_params::encode_filters;
use crate::side_effect::SideEffect;
use crate::types::FilterSpec;

/// Mirrors filter changes into a URL query string.
///
/// The target is shared with whatever owns the address bar; reading it
/// back through `decode_filters` reconstructs the filter.
#[derive(Clone, Default)]
pub struct UrlQuerySideEffect {
    target: Arc<RwLock<String>>,
}

impl UrlQuerySideEffect {
    pub fn new(target: Arc<RwLock<String>>) -> Self {
        Self { target }
    }

    /// The query string last written.
    pub fn current(&self) -> String {
        self.target
            .read()
            .map(|query| query.clone())
            .unwrap_or_default()
    }
}

impl SideEffect<FilterSpec> for UrlQuerySideEffect {
    fn run(&self, query: &FilterSpec) -> Result<(), String> {
        let encoded = encode_filters(query);
        let mut target = self
            .target
            .write()
            .map_err(|e| format!("query target poisoned: {}", e))?;
        log::info!("filters changed query='{}'", encoded);
        *target = encoded;
        Ok(())
    }
}
