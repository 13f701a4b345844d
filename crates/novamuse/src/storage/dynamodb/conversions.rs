//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use novamuse_core::quote::{parse_timestamp, Quote};
use novamuse_core::storage::{keys, PageKey, RepositoryError};

// ============================================================================
// Quote conversions
// ============================================================================

/// Convert a Quote to DynamoDB item, including both index key pairs.
pub fn quote_to_item(quote: &Quote) -> HashMap<String, AttributeValue> {
    keys::quote_attributes(quote)
        .into_iter()
        .map(|(name, value)| (name.to_string(), AttributeValue::S(value)))
        .collect()
}

/// Convert a DynamoDB item to Quote. Key-schema attributes are ignored.
pub fn item_to_quote(item: &HashMap<String, AttributeValue>) -> Result<Quote, RepositoryError> {
    Ok(Quote {
        quote_id: get_string(item, "quoteId")?,
        text: get_string(item, "text")?,
        author: get_string(item, "author")?,
        genre: get_string(item, "genre")?,
        source: get_string(item, "source")?,
        created_at: get_datetime(item, "createdAt")?,
    })
}

// ============================================================================
// Pagination keys
// ============================================================================

/// Convert a continuation token to an `ExclusiveStartKey`.
pub fn page_key_to_attributes(key: &PageKey) -> HashMap<String, AttributeValue> {
    key.iter()
        .map(|(name, value)| (name.to_string(), AttributeValue::S(value.to_string())))
        .collect()
}

/// Convert a `LastEvaluatedKey` to a continuation token.
///
/// Every key attribute of the table is a string; anything else is rejected.
pub fn attributes_to_page_key(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<PageKey, RepositoryError> {
    attributes
        .iter()
        .map(|(name, value)| {
            value
                .as_s()
                .map(|s| (name.clone(), s.clone()))
                .map_err(|_| {
                    RepositoryError::InvalidData(format!("Non-string key attribute: {}", name))
                })
        })
        .collect()
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
pub fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    parse_timestamp(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}
