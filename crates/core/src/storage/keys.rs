//! Key generation for the single-table quote layout.
//!
//! Pure functions, shared by every backend and by the handlers that strip
//! index prefixes back off.

use chrono::{DateTime, Utc};

use crate::quote::{format_timestamp, Quote};

use super::QuoteIndex;

// ============================================================================
// Key prefixes
// ============================================================================

pub const QUOTE_PREFIX: &str = "QUOTE#";
pub const GENRE_PREFIX: &str = "GENRE#";
pub const AUTHOR_PREFIX: &str = "AUTHOR#";
pub const CREATED_PREFIX: &str = "CREATED#";

/// Constant sort key of every quote item.
pub const METADATA_SK: &str = "METADATA";

// ============================================================================
// Attribute names
// ============================================================================

pub const PK: &str = "PK";
pub const SK: &str = "SK";

/// Generate primary key for a Quote.
///
/// Pattern: `QUOTE#<quote_id>`
pub fn quote_pk(quote_id: &str) -> String {
    format!("{QUOTE_PREFIX}{quote_id}")
}

/// Generate sort key for a Quote.
pub fn quote_sk() -> &'static str {
    METADATA_SK
}

/// Generate GSI1 partition key (genre lookup).
///
/// Pattern: `GENRE#<genre>`
pub fn genre_pk(genre: &str) -> String {
    format!("{GENRE_PREFIX}{genre}")
}

/// Generate GSI2 partition key (author lookup).
///
/// Pattern: `AUTHOR#<author>`
pub fn author_pk(author: &str) -> String {
    format!("{AUTHOR_PREFIX}{author}")
}

/// Generate the sort key shared by both indexes.
///
/// Pattern: `CREATED#<createdAt>`. The timestamp format is fixed-width so
/// lexicographic order is chronological order.
pub fn created_sk(created_at: DateTime<Utc>) -> String {
    format!("{CREATED_PREFIX}{}", format_timestamp(created_at))
}

/// Partition and sort key of `quote` in `index`.
pub fn index_keys(index: QuoteIndex, quote: &Quote) -> (String, String) {
    let partition = match index {
        QuoteIndex::Genre => genre_pk(&quote.genre),
        QuoteIndex::Author => author_pk(&quote.author),
    };
    (partition, created_sk(quote.created_at))
}

/// Every attribute of a stored quote item, key schema first.
///
/// All values are strings. Each writer of quote items builds them from this
/// list so the item layout is defined once.
pub fn quote_attributes(quote: &Quote) -> Vec<(&'static str, String)> {
    let (gsi1_pk, gsi1_sk) = index_keys(QuoteIndex::Genre, quote);
    let (gsi2_pk, gsi2_sk) = index_keys(QuoteIndex::Author, quote);

    vec![
        (PK, quote_pk(&quote.quote_id)),
        (SK, quote_sk().to_string()),
        (QuoteIndex::Genre.partition_key_attribute(), gsi1_pk),
        (QuoteIndex::Genre.sort_key_attribute(), gsi1_sk),
        (QuoteIndex::Author.partition_key_attribute(), gsi2_pk),
        (QuoteIndex::Author.sort_key_attribute(), gsi2_sk),
        ("quoteId", quote.quote_id.clone()),
        ("text", quote.text.clone()),
        ("author", quote.author.clone()),
        ("genre", quote.genre.clone()),
        ("source", quote.source.clone()),
        ("createdAt", format_timestamp(quote.created_at)),
    ]
}

/// Strips `GENRE#` from a GSI1 partition key. Values without the prefix are
/// returned unchanged.
pub fn strip_genre_prefix(value: &str) -> &str {
    value.strip_prefix(GENRE_PREFIX).unwrap_or(value)
}

/// Strips `AUTHOR#` from a GSI2 partition key. Values without the prefix are
/// returned unchanged.
pub fn strip_author_prefix(value: &str) -> &str {
    value.strip_prefix(AUTHOR_PREFIX).unwrap_or(value)
}
