//! Distinct genre and author listings.

use std::collections::BTreeSet;

use crate::storage::{keys, QuoteIndex, QuoteRepository, Result};

/// Collects every distinct value of `index`'s partition key, prefix
/// stripped, sorted.
///
/// Drains the projected scan across all pages before returning.
pub async fn list_distinct_values(
    repo: &dyn QuoteRepository,
    index: QuoteIndex,
) -> Result<Vec<String>> {
    let strip: fn(&str) -> &str = match index {
        QuoteIndex::Genre => keys::strip_genre_prefix,
        QuoteIndex::Author => keys::strip_author_prefix,
    };

    let mut values = BTreeSet::new();
    let mut start = None;
    loop {
        let page = repo.scan_index_keys(index, start).await?;
        values.extend(page.items.iter().map(|v| strip(v).to_string()));

        match page.last_evaluated_key {
            Some(key) => start = Some(key),
            None => break,
        }
    }

    Ok(values.into_iter().collect())
}
