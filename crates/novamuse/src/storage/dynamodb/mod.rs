//! DynamoDB storage backend implementation.
//!
//! Implements `QuoteRepository` over the single-table layout using
//! `aws-sdk-dynamodb`.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
