//! Async bridge for the synchronous record store
//!
//! SQLite calls block, so async callers run them on tokio's blocking pool
//! through [`with_store`] instead of stalling the runtime.
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use prodtrack_store::{RecordStore, async_wrapper::with_store};
//! # async fn example(store: Arc<RecordStore>) -> prodtrack_store::Result<()> {
//! let id = with_store(&store, |s| s.insert_material_intake("Bobina 7", "Cru")).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::errors::{Result, StoreError};
use crate::store::RecordStore;

/// Run a store operation on the blocking thread pool.
pub async fn with_store<F, T>(store: &Arc<RecordStore>, f: F) -> Result<T>
where
    F: FnOnce(&RecordStore) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);

    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| StoreError::unavailable_with_source("store task failed to complete", e))?
}
