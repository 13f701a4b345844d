//! Table schema for the quotes table (pure data).

use novamuse_core::storage::{keys, QuoteIndex};

/// Default name of the quotes table.
pub const DEFAULT_TABLE_NAME: &str = "NovaMuseQuotes";

/// Table schema configuration. Every key attribute is a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: String,
    pub sort_key: String,
    pub gsis: Vec<GsiConfig>,
}

/// Global Secondary Index configuration. Projection is always `ALL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiConfig {
    pub name: String,
    pub partition_key: String,
    pub sort_key: String,
}

impl From<QuoteIndex> for GsiConfig {
    fn from(index: QuoteIndex) -> Self {
        Self {
            name: index.name().to_string(),
            partition_key: index.partition_key_attribute().to_string(),
            sort_key: index.sort_key_attribute().to_string(),
        }
    }
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Every attribute that appears in a key schema, without duplicates.
    pub fn key_attributes(&self) -> Vec<&str> {
        let mut names = vec![self.partition_key.as_str(), self.sort_key.as_str()];
        for gsi in &self.gsis {
            for name in [gsi.partition_key.as_str(), gsi.sort_key.as_str()] {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// The quotes table: `PK`/`SK` primary key plus the genre and author indexes.
pub fn quotes_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TABLE_NAME.to_string(),
        partition_key: keys::PK.to_string(),
        sort_key: keys::SK.to_string(),
        gsis: vec![QuoteIndex::Genre.into(), QuoteIndex::Author.into()],
    }
}
