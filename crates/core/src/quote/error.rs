use thiserror::Error;

/// Errors that can occur when validating a quote creation request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("text, author, genre, and source are required")]
    MissingFields,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}
