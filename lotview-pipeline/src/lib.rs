//! Core of the dealership inventory dashboard: spreadsheet ingestion,
//! model naming, filtering, grouping, aging and the view state that ties
//! them together.

pub mod aging;
pub mod body_description;
pub mod cache;
pub mod components;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod export;
pub mod filter;
pub mod grouping;
pub mod inventory_loader;
pub mod model_normalizer;
pub mod pipelines;
pub mod query_params;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod store;
pub mod types;
pub mod util;

pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult, LoadError, LoadResult};
pub use pipelines::dashboard::{Dashboard, OpenOutcome};
pub use store::{LoadOutcome, LoadTicket, ViewStore};
pub use types::*;
