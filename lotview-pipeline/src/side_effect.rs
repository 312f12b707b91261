use crate::util;

/// A side effect runs after a state change and does not affect the
/// resulting state. Examples: syncing the URL, logging.
pub trait SideEffect<Q>: Send + Sync {
    /// Decide if this side effect should run.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Execute the side effect.
    fn run(&self, query: &Q) -> Result<(), String>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
