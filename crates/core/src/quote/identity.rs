//! Deterministic quote identifiers.
//!
//! A quote's id is a pure function of its normalized text, so two creations
//! whose text differs only in case or whitespace land on the same primary key
//! and the conditional write rejects the second one.

/// Length of a quote id in hex characters.
pub const QUOTE_ID_LEN: usize = 8;

/// Lowercases, trims, and collapses internal whitespace runs to one space.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Derives the 8-character hex id for a quote text.
///
/// MD5 over the UTF-8 bytes of the normalized text, first eight hex digits.
/// A digest collision is indistinguishable from a duplicate.
pub fn derive_quote_id(text: &str) -> String {
    let digest = md5::compute(normalize_text(text).as_bytes());
    let mut id = format!("{:x}", digest);
    id.truncate(QUOTE_ID_LEN);
    id
}
