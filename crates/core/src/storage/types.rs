use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Opaque continuation token returned by a paged query or scan.
///
/// Maps key attribute names to their values. Every key attribute of the
/// quotes table is a string, and the ordered map gives the token a single
/// canonical serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageKey(BTreeMap<String, String>);

impl PageKey {
    /// Creates an empty key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute to the key.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Returns the value of an attribute, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PageKey {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One page of results plus the position to resume from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` when the store reports nothing left to read.
    pub last_evaluated_key: Option<PageKey>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, last_evaluated_key: Option<PageKey>) -> Self {
        Self {
            items,
            last_evaluated_key,
        }
    }

    /// A page with no items and no continuation.
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }
}

/// Secondary indexes of the quotes table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteIndex {
    /// `GSI1-Genre`: `GSI1PK = GENRE#<genre>`, `GSI1SK = CREATED#<createdAt>`.
    Genre,
    /// `GSI2-Author`: `GSI2PK = AUTHOR#<author>`, `GSI2SK = CREATED#<createdAt>`.
    Author,
}

impl QuoteIndex {
    pub fn name(&self) -> &'static str {
        match self {
            QuoteIndex::Genre => "GSI1-Genre",
            QuoteIndex::Author => "GSI2-Author",
        }
    }

    pub fn partition_key_attribute(&self) -> &'static str {
        match self {
            QuoteIndex::Genre => "GSI1PK",
            QuoteIndex::Author => "GSI2PK",
        }
    }

    pub fn sort_key_attribute(&self) -> &'static str {
        match self {
            QuoteIndex::Genre => "GSI1SK",
            QuoteIndex::Author => "GSI2SK",
        }
    }
}

/// Direction of an index query on the creation-time sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Ascending,
    /// Newest first.
    Descending,
}

impl SortOrder {
    /// Value for DynamoDB's `ScanIndexForward`.
    pub fn scan_forward(&self) -> bool {
        matches!(self, SortOrder::Ascending)
    }

    /// Parses `asc`/`ascending`/`desc`/`descending`, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Ascending),
            "desc" | "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}
