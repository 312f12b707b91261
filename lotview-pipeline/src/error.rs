//! Error types for the load boundary and the application root.
//!
//! Everything past ingestion is total: field coercion and filter parsing
//! default silently instead of failing, so only loading, configuration
//! and export have named failure modes here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Fetch failed for {scope}: {reason}")]
    Fetch { scope: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet parse error: {0}")]
    Spreadsheet(#[from] csv::Error),

    #[error("Spreadsheet has no header row")]
    EmptySheet,
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("Load failed: {0}")]
    Load(#[from] LoadError),
}

/// Result type alias for the load boundary.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type alias for configuration, export and wiring.
pub type DashboardResult<T> = Result<T, DashboardError>;
