//! Application-scoped access to the immutable fact store.
//!
//! A [`StoreContext`] owns the graph file path and a once-only-guarded
//! handle to the loaded store. Concurrent first accesses race to a single
//! load; losers block until the winner finishes, and every later access
//! returns the cached immutable reference with no synchronization overhead.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::LarderResult;
use crate::graph::format;
use crate::graph::store::FactStore;

/// Environment variable overriding the default graph file location.
pub const GRAPH_PATH_ENV: &str = "LARDER_GRAPH_PATH";

/// Resolve the graph file path: the environment override when set,
/// otherwise `data/recipes.facts`.
pub fn default_graph_path() -> PathBuf {
    std::env::var_os(GRAPH_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/recipes.facts"))
}

/// Lazily-initialized handle to the store behind a path.
#[derive(Debug)]
pub struct StoreContext {
    path: PathBuf,
    cell: OnceCell<Arc<FactStore>>,
}

impl StoreContext {
    /// Create a context for an explicit graph file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Create a context for the environment-resolved graph file path.
    pub fn from_env() -> Self {
        Self::new(default_graph_path())
    }

    /// The graph file path this context resolves.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The store handle; loads the graph file on first call.
    ///
    /// A failed load is not cached, so a later call retries once the file
    /// exists.
    pub fn store(&self) -> LarderResult<Arc<FactStore>> {
        self.cell
            .get_or_try_init(|| {
                let store = format::load(&self.path)?;
                tracing::info!(
                    path = %self.path.display(),
                    facts = store.len(),
                    entities = store.registry().len(),
                    "loaded fact graph"
                );
                Ok(Arc::new(store))
            })
            .map(Arc::clone)
    }
}
