//! In-memory repository implementation.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use novamuse_core::quote::Quote;
use novamuse_core::storage::{
    keys, Page, PageKey, QuoteIndex, QuoteRepository, RepositoryError, Result, SortOrder,
};

/// Items returned by an unbounded scan page.
const DEFAULT_SCAN_PAGE_SIZE: usize = 100;

/// In-memory storage backend.
///
/// Quotes are kept in a `BTreeMap` keyed by partition key, wrapped in
/// `Arc<RwLock<_>>` for thread-safe access. Index queries sort by the index
/// sort key and break ties on the partition key. Data is not persisted.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    quotes: Arc<RwLock<BTreeMap<String, Quote>>>,
    scan_page_size: usize,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            quotes: Arc::new(RwLock::new(BTreeMap::new())),
            scan_page_size: DEFAULT_SCAN_PAGE_SIZE,
        }
    }

    /// Creates a repository holding `quotes`. Later duplicates of the same
    /// id are ignored, like a conditional put would.
    pub fn with_quotes(quotes: impl IntoIterator<Item = Quote>) -> Self {
        let mut map = BTreeMap::new();
        for quote in quotes {
            map.entry(keys::quote_pk(&quote.quote_id)).or_insert(quote);
        }

        Self {
            quotes: Arc::new(RwLock::new(map)),
            scan_page_size: DEFAULT_SCAN_PAGE_SIZE,
        }
    }

    /// Sets how many items a scan without a limit returns per page.
    #[cfg(test)]
    pub fn with_scan_page_size(mut self, size: usize) -> Self {
        self.scan_page_size = size.max(1);
        self
    }

    /// Number of stored quotes.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }

    /// Returns true if no quotes are stored.
    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.quotes.read().await.is_empty()
    }

    async fn scan_page(
        &self,
        limit: usize,
        exclusive_start_key: Option<PageKey>,
    ) -> Result<Page<Quote>> {
        let lower = match exclusive_start_key {
            Some(key) => {
                require(&key, keys::SK)?;
                Bound::Excluded(require(&key, keys::PK)?.to_string())
            }
            None => Bound::Unbounded,
        };

        let quotes = self.quotes.read().await;
        let rows = quotes
            .range((lower, Bound::Unbounded))
            .map(|(_, quote)| quote)
            .collect();

        Ok(take_page(rows, limit, table_key))
    }
}

#[async_trait]
impl QuoteRepository for InMemoryRepository {
    async fn query(
        &self,
        index: QuoteIndex,
        partition_key: &str,
        limit: Option<usize>,
        exclusive_start_key: Option<PageKey>,
        order: SortOrder,
    ) -> Result<Page<Quote>> {
        let start = exclusive_start_key
            .map(|key| index_position(index, partition_key, &key))
            .transpose()?;

        let quotes = self.quotes.read().await;
        let mut rows: Vec<((String, String), &Quote)> = quotes
            .iter()
            .filter_map(|(pk, quote)| {
                let (partition, sort) = keys::index_keys(index, quote);
                let position = (sort, pk.clone());
                (partition == partition_key).then_some((position, quote))
            })
            .collect();

        rows.sort_by(|a, b| a.0.cmp(&b.0));
        if !order.scan_forward() {
            rows.reverse();
        }

        let rows = rows
            .into_iter()
            .filter(|(position, _)| match (&start, order) {
                (None, _) => true,
                (Some(start), SortOrder::Ascending) => position > start,
                (Some(start), SortOrder::Descending) => position < start,
            })
            .map(|(_, quote)| quote)
            .collect();

        let limit = limit.unwrap_or(usize::MAX);
        Ok(take_page(rows, limit, |quote| index_key(index, quote)))
    }

    async fn scan(
        &self,
        limit: Option<usize>,
        exclusive_start_key: Option<PageKey>,
    ) -> Result<Page<Quote>> {
        let limit = limit.unwrap_or(self.scan_page_size);
        self.scan_page(limit, exclusive_start_key).await
    }

    async fn scan_index_keys(
        &self,
        index: QuoteIndex,
        exclusive_start_key: Option<PageKey>,
    ) -> Result<Page<String>> {
        let size = self.scan_page_size;
        let page = self.scan_page(size, exclusive_start_key).await?;

        let values = page
            .items
            .iter()
            .map(|quote| keys::index_keys(index, quote).0)
            .collect();

        Ok(Page::new(values, page.last_evaluated_key))
    }

    async fn put_if_absent(&self, quote: &Quote) -> Result<()> {
        let mut quotes = self.quotes.write().await;
        match quotes.entry(keys::quote_pk(&quote.quote_id)) {
            Entry::Occupied(_) => Err(RepositoryError::AlreadyExists {
                entity_type: "Quote",
                id: quote.quote_id.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(quote.clone());
                Ok(())
            }
        }
    }
}

/// Cuts `rows` to `limit`, with a continuation key only if rows remain.
fn take_page(rows: Vec<&Quote>, limit: usize, key_of: impl Fn(&Quote) -> PageKey) -> Page<Quote> {
    let limit = limit.max(1);
    let more = rows.len() > limit;
    let items: Vec<Quote> = rows.into_iter().take(limit).cloned().collect();
    let last_evaluated_key = items.last().filter(|_| more).map(key_of);

    Page::new(items, last_evaluated_key)
}

fn table_key(quote: &Quote) -> PageKey {
    PageKey::new()
        .with(keys::PK, keys::quote_pk(&quote.quote_id))
        .with(keys::SK, keys::quote_sk())
}

fn index_key(index: QuoteIndex, quote: &Quote) -> PageKey {
    let (partition, sort) = keys::index_keys(index, quote);
    table_key(quote)
        .with(index.partition_key_attribute(), partition)
        .with(index.sort_key_attribute(), sort)
}

/// Position of an index start key as `(sort key, partition key)`.
fn index_position(
    index: QuoteIndex,
    partition_key: &str,
    key: &PageKey,
) -> Result<(String, String)> {
    require(key, keys::SK)?;
    if require(key, index.partition_key_attribute())? != partition_key {
        return Err(RepositoryError::InvalidData(
            "The provided starting key does not match the query partition".to_string(),
        ));
    }

    Ok((
        require(key, index.sort_key_attribute())?.to_string(),
        require(key, keys::PK)?.to_string(),
    ))
}

fn require<'a>(key: &'a PageKey, attribute: &str) -> Result<&'a str> {
    let missing = || {
        let message = format!("The provided starting key is invalid: missing {attribute}");
        RepositoryError::InvalidData(message)
    };
    key.get(attribute).ok_or_else(missing)
}
