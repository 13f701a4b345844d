use async_trait::async_trait;

use crate::quote::Quote;

use super::{Page, PageKey, QuoteIndex, Result, SortOrder};

/// Storage collaborator for quote records.
///
/// Every read returns at most one page; callers resume with the returned
/// `last_evaluated_key`.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Queries one partition of a secondary index, ordered by creation time.
    async fn query(
        &self,
        index: QuoteIndex,
        partition_key: &str,
        limit: Option<usize>,
        exclusive_start_key: Option<PageKey>,
        order: SortOrder,
    ) -> Result<Page<Quote>>;

    /// Scans the whole table.
    async fn scan(
        &self,
        limit: Option<usize>,
        exclusive_start_key: Option<PageKey>,
    ) -> Result<Page<Quote>>;

    /// Scans the whole table projecting only the partition-key attribute of
    /// `index` (`GSI1PK` or `GSI2PK`). Values keep their prefix.
    async fn scan_index_keys(
        &self,
        index: QuoteIndex,
        exclusive_start_key: Option<PageKey>,
    ) -> Result<Page<String>>;

    /// Writes a quote unless its primary key already exists.
    ///
    /// Fails with `RepositoryError::AlreadyExists` on conflict.
    async fn put_if_absent(&self, quote: &Quote) -> Result<()>;
}
