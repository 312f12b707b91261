//! URL query-string form of the filter selections.
//!
//! Only the fields a bookmarked URL carries are encoded: `model`, `year`,
//! `priceMin`, `priceMax` and `stock`. Unconstrained fields are omitted,
//! so the default filter encodes to the empty string. The search box is
//! session-only and never written to the URL.

use serde::{Deserialize, Serialize};

use crate::types::{FilterSpec, ALL_YEARS};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct FilterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<String>,
    #[serde(default, rename = "priceMin", skip_serializing_if = "Option::is_none")]
    price_min: Option<String>,
    #[serde(default, rename = "priceMax", skip_serializing_if = "Option::is_none")]
    price_max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stock: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Encode the URL-backed filter fields as a query string (no leading `?`).
pub fn encode_filters(spec: &FilterSpec) -> String {
    let params = FilterParams {
        model: non_empty(&spec.model),
        year: spec.year_constraint().map(String::from),
        price_min: non_empty(&spec.price_min),
        price_max: non_empty(&spec.price_max),
        stock: non_empty(&spec.stock_number),
    };
    // Serializing a struct of optional strings cannot fail.
    serde_urlencoded::to_string(&params).unwrap_or_default()
}

/// Decode a query string into filter selections.
///
/// Missing parameters take their defaults and unknown parameters are
/// ignored. A leading `?` is accepted. Malformed input decodes to the
/// default filter.
pub fn decode_filters(query: &str) -> FilterSpec {
    let query = query.strip_prefix('?').unwrap_or(query);
    let params: FilterParams = match serde_urlencoded::from_str(query) {
        Ok(params) => params,
        Err(e) => {
            log::debug!("ignoring malformed filter query '{}': {}", query, e);
            FilterParams::default()
        }
    };

    FilterSpec {
        model: params.model.unwrap_or_default(),
        year: params
            .year
            .filter(|y| !y.is_empty())
            .unwrap_or_else(|| ALL_YEARS.to_string()),
        price_min: params.price_min.unwrap_or_default(),
        price_max: params.price_max.unwrap_or_default(),
        stock_number: params.stock.unwrap_or_default(),
        search_term: String::new(),
    }
}
