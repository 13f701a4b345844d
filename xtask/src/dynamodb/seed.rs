//! Seed the quotes table with the sample collection.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use novamuse_core::quote::Quote;
use novamuse_core::storage::keys;

use super::error::{DynamodbError, Result};

/// Outcome of a seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    pub skipped: usize,
}

fn quote_to_item(quote: &Quote) -> HashMap<String, AttributeValue> {
    keys::quote_attributes(quote)
        .into_iter()
        .map(|(name, value)| (name.to_string(), AttributeValue::S(value)))
        .collect()
}

/// Insert quotes one by one, leaving any quote that is already stored untouched.
pub async fn seed_quotes(
    client: &Client,
    table_name: &str,
    quotes: &[Quote],
) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for quote in quotes {
        let result = client
            .put_item()
            .table_name(table_name)
            .set_item(Some(quote_to_item(quote)))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await;

        match result {
            Ok(_) => summary.inserted += 1,
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                summary.skipped += 1;
            }
            Err(err) => return Err(DynamodbError::sdk(err)),
        }
    }

    Ok(summary)
}
