use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{LoadError, LoadResult};
use crate::source::InventorySource;

/// Reads the export from a file on disk, whatever the scope.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl InventorySource for FileSource {
    async fn fetch(&self, scope: &str) -> LoadResult<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|e| LoadError::Fetch {
            scope: scope.to_string(),
            reason: format!("failed to read '{}': {}", self.path.display(), e),
        })
    }
}

/// Serves a fixed in-memory export. Useful for fixtures and demos.
pub struct StaticSource {
    bytes: Vec<u8>,
}

impl StaticSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl InventorySource for StaticSource {
    async fn fetch(&self, _scope: &str) -> LoadResult<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_a_fetch_error() {
        let source = FileSource::new("/nonexistent/lotview/inventory.csv");
        let err = source.fetch("inventory").await.unwrap_err();
        match err {
            LoadError::Fetch { scope, reason } => {
                assert_eq!(scope, "inventory");
                assert!(reason.contains("inventory.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn static_source_returns_bytes() {
        let source = StaticSource::new("Stock Number\nA1\n");
        let bytes = source.fetch("any").await.unwrap();
        assert_eq!(bytes, b"Stock Number\nA1\n".to_vec());
        assert_eq!(source.name(), "StaticSource");
    }
}
