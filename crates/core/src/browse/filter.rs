use crate::quote::Quote;
use crate::storage::Page;

/// Keeps only the quotes by `author`.
///
/// The store's continuation token points at the pre-filter position. If
/// anything was removed, resuming from it may skip or repeat records, so the
/// token is dropped. If nothing was removed the page is exactly what the
/// store returned and the token is kept.
pub fn apply_post_filter(page: Page<Quote>, author: &str) -> Page<Quote> {
    let fetched = page.items.len();
    let items: Vec<Quote> = page
        .items
        .into_iter()
        .filter(|quote| quote.author == author)
        .collect();

    let last_evaluated_key = if items.len() < fetched {
        None
    } else {
        page.last_evaluated_key
    };

    Page::new(items, last_evaluated_key)
}
