use async_trait::async_trait;

use crate::error::LoadResult;
use crate::util;

/// The bulk-load boundary: fetches a whole spreadsheet export for a scope.
///
/// This is the only asynchronous seam in the crate. Each call fetches a
/// complete snapshot; there is no incremental loading.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetch the raw spreadsheet bytes for the given cache scope.
    async fn fetch(&self, scope: &str) -> LoadResult<Vec<u8>>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
