//! Browse: paged listing of quotes filtered by genre and/or author.

mod filter;
mod selection;

pub use filter::apply_post_filter;
pub use selection::{select_access_path, AccessPath, BrowseFilter};

use crate::pagination::PageLimit;
use crate::quote::Quote;
use crate::storage::{keys, Page, PageKey, QuoteIndex, QuoteRepository, Result, SortOrder};

/// A decoded browse request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseRequest {
    pub filter: BrowseFilter,
    pub limit: PageLimit,
    pub start_key: Option<PageKey>,
    pub order: SortOrder,
}

/// Reads one page of quotes along the access path chosen for the filters.
pub async fn browse_quotes(
    repo: &dyn QuoteRepository,
    request: BrowseRequest,
) -> Result<Page<Quote>> {
    let limit = Some(request.limit.get());

    match select_access_path(&request.filter) {
        AccessPath::GenreIndex {
            genre,
            author_filter,
        } => {
            let page = repo
                .query(
                    QuoteIndex::Genre,
                    &keys::genre_pk(&genre),
                    limit,
                    request.start_key,
                    request.order,
                )
                .await?;

            Ok(match author_filter {
                Some(author) => apply_post_filter(page, &author),
                None => page,
            })
        }
        AccessPath::AuthorIndex { author } => {
            repo.query(
                QuoteIndex::Author,
                &keys::author_pk(&author),
                limit,
                request.start_key,
                request.order,
            )
            .await
        }
        AccessPath::FullScan => repo.scan(limit, request.start_key).await,
    }
}
