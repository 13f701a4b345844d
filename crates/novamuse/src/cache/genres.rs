//! Single-slot cache of the distinct genres in the table.
//!
//! Loaded on first use and never invalidated. A stale list only skews random
//! selection towards genres that existed at load time; a cold cache costs one
//! full projected scan.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct GenreCache {
    slot: Arc<RwLock<Option<Arc<Vec<String>>>>>,
}

impl GenreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached genres, running `load` if the cache is empty.
    ///
    /// Concurrent callers on a cold cache wait for a single load. A failed
    /// load leaves the cache empty.
    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<Arc<Vec<String>>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>, E>>,
    {
        if let Some(genres) = self.slot.read().await.as_ref() {
            return Ok(Arc::clone(genres));
        }

        let mut slot = self.slot.write().await;
        if let Some(genres) = slot.as_ref() {
            return Ok(Arc::clone(genres));
        }

        let genres = Arc::new(load().await?);
        tracing::debug!(count = genres.len(), "Loaded genre cache");
        *slot = Some(Arc::clone(&genres));
        Ok(genres)
    }

    /// Empties the cache so the next lookup reloads.
    #[cfg(test)]
    pub async fn reset(&self) {
        *self.slot.write().await = None;
    }

    #[cfg(test)]
    pub async fn is_loaded(&self) -> bool {
        self.slot.read().await.is_some()
    }
}
