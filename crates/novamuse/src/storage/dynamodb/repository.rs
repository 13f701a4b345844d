//! DynamoDB repository implementation.
//!
//! Implements `QuoteRepository` from `novamuse_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use novamuse_core::quote::Quote;
use novamuse_core::storage::{Page, PageKey, QuoteIndex, QuoteRepository, Result, SortOrder};

use super::conversions::{
    attributes_to_page_key, get_string, item_to_quote, page_key_to_attributes, quote_to_item,
};
use super::error::{map_put_item_error, map_sdk_error};

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a repository using the AWS SDK default credential chain.
    ///
    /// `AWS_ENDPOINT_URL` is honored by the SDK, which is how a local
    /// DynamoDB is targeted.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn to_limit(limit: Option<usize>) -> Option<i32> {
    limit.map(|l| i32::try_from(l).unwrap_or(i32::MAX))
}

fn to_start_key(key: Option<PageKey>) -> Option<HashMap<String, AttributeValue>> {
    key.map(|k| page_key_to_attributes(&k))
}

fn to_page_key(key: Option<HashMap<String, AttributeValue>>) -> Result<Option<PageKey>> {
    key.filter(|k| !k.is_empty())
        .map(|k| attributes_to_page_key(&k))
        .transpose()
}

#[async_trait]
impl QuoteRepository for DynamoDbRepository {
    async fn query(
        &self,
        index: QuoteIndex,
        partition_key: &str,
        limit: Option<usize>,
        exclusive_start_key: Option<PageKey>,
        order: SortOrder,
    ) -> Result<Page<Quote>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(index.name())
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", index.partition_key_attribute())
            .expression_attribute_values(":pk", AttributeValue::S(partition_key.to_string()))
            .scan_index_forward(order.scan_forward())
            .set_limit(to_limit(limit))
            .set_exclusive_start_key(to_start_key(exclusive_start_key))
            .send()
            .await
            .map_err(|e| map_sdk_error("Query", e))?;

        let items = result
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_quote)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(items, to_page_key(result.last_evaluated_key)?))
    }

    async fn scan(
        &self,
        limit: Option<usize>,
        exclusive_start_key: Option<PageKey>,
    ) -> Result<Page<Quote>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_limit(to_limit(limit))
            .set_exclusive_start_key(to_start_key(exclusive_start_key))
            .send()
            .await
            .map_err(|e| map_sdk_error("Scan", e))?;

        let items = result
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_quote)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(items, to_page_key(result.last_evaluated_key)?))
    }

    async fn scan_index_keys(
        &self,
        index: QuoteIndex,
        exclusive_start_key: Option<PageKey>,
    ) -> Result<Page<String>> {
        let attribute = index.partition_key_attribute();

        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .projection_expression(attribute)
            .set_exclusive_start_key(to_start_key(exclusive_start_key))
            .send()
            .await
            .map_err(|e| map_sdk_error("Scan", e))?;

        // Items without the index attribute are not quotes; skip them.
        let values = result
            .items
            .unwrap_or_default()
            .iter()
            .filter(|item| item.contains_key(attribute))
            .map(|item| get_string(item, attribute))
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(values, to_page_key(result.last_evaluated_key)?))
    }

    async fn put_if_absent(&self, quote: &Quote) -> Result<()> {
        let item = quote_to_item(quote);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "Quote", quote.quote_id.clone()))?;

        Ok(())
    }
}

impl std::fmt::Debug for DynamoDbRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoDbRepository")
            .field("table_name", &self.table_name)
            .finish_non_exhaustive()
    }
}
