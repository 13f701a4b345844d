use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::identity::derive_quote_id;
use super::requests::NewQuote;

/// Timestamp layout for `createdAt`: ISO-8601 UTC, microseconds, trailing `Z`.
///
/// Fixed width, so the string form sorts chronologically.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Renders a timestamp in the `createdAt` layout.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses any RFC 3339 timestamp into UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

/// A quote record.
///
/// This is also the public projection: it carries exactly the attributes a
/// client may see, never the table's key-schema attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quote_id: String,
    pub text: String,
    pub author: String,
    pub genre: String,
    pub source: String,
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Builds a quote created at `now`, deriving its id from the text.
    pub fn new(new: NewQuote, now: DateTime<Utc>) -> Self {
        Self {
            quote_id: derive_quote_id(&new.text),
            text: new.text,
            author: new.author,
            genre: new.genre,
            source: new.source,
            created_at: now,
        }
    }
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(*ts))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).map_err(serde::de::Error::custom)
}
