//! Application state shared by every request handler.

use std::sync::Arc;

use novamuse_core::storage::QuoteRepository;

use crate::cache::GenreCache;
use crate::config::Config;
use crate::picker::QuotePicker;

/// Shared application state.
///
/// Cloned for each request. The storage backend is a trait object so the
/// handlers stay backend-agnostic. The picker is seeded from `RANDOM_SEED`
/// when it is set.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn QuoteRepository>,
    pub config: Arc<Config>,
    pub genres: GenreCache,
    pub picker: QuotePicker,
}

impl AppState {
    pub fn new(repo: Arc<dyn QuoteRepository>, config: Config) -> Self {
        let picker = config
            .random_seed
            .map(QuotePicker::seeded)
            .unwrap_or_default();

        Self {
            repo,
            config: Arc::new(config),
            genres: GenreCache::new(),
            picker,
        }
    }
}
