//! Transport encoding for store continuation tokens.
//!
//! A cursor is the canonical JSON form of a [`PageKey`] run through URL-safe
//! base64. Encoding pads; decoding accepts padded and unpadded input.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use thiserror::Error;

use crate::storage::PageKey;

const CURSOR_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors that can occur when decoding a cursor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("Malformed cursor: {0}")]
    Malformed(String),
}

/// Encodes a continuation token. `None` stays `None`.
pub fn encode_cursor(key: Option<&PageKey>) -> Option<String> {
    let key = key?;
    // A string-to-string map always serializes.
    let json = serde_json::to_vec(key).unwrap_or_default();
    Some(CURSOR_ENGINE.encode(json))
}

/// Decodes a cursor back into a continuation token.
///
/// `None` and the empty string both mean "start from the beginning".
pub fn decode_cursor(cursor: Option<&str>) -> Result<Option<PageKey>, CursorError> {
    let Some(cursor) = cursor.filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    let bytes = CURSOR_ENGINE
        .decode(cursor)
        .map_err(|e| CursorError::Malformed(e.to_string()))?;
    let key = serde_json::from_slice::<PageKey>(&bytes)
        .map_err(|e| CursorError::Malformed(e.to_string()))?;

    Ok(Some(key))
}
