//! API request types for quote operations.

use serde::{Deserialize, Serialize};

use super::error::QuoteError;

/// Request payload for creating a quote.
///
/// Every field is optional on the wire so that a missing field surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl CreateQuoteRequest {
    /// Create a request with all four fields set.
    pub fn new(
        text: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            text: Some(text.into()),
            author: Some(author.into()),
            genre: Some(genre.into()),
            source: Some(source.into()),
        }
    }

    /// Parses a JSON body. An empty body is an empty request.
    pub fn from_json(body: &[u8]) -> Result<Self, QuoteError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| QuoteError::InvalidBody(e.to_string()))
    }

    /// Checks that all four fields are present and non-blank.
    pub fn validate(self) -> Result<NewQuote, QuoteError> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        match (
            present(self.text),
            present(self.author),
            present(self.genre),
            present(self.source),
        ) {
            (Some(text), Some(author), Some(genre), Some(source)) => Ok(NewQuote {
                text,
                author,
                genre,
                source,
            }),
            _ => Err(QuoteError::MissingFields),
        }
    }
}

/// A validated creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub text: String,
    pub author: String,
    pub genre: String,
    pub source: String,
}
