//! In-memory storage backend.
//!
//! Emulates the quotes table with ordered maps: primary-key scans, both
//! secondary indexes, exclusive-start-key resumption and conditional puts.
//! Used for local development and by the router tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use novamuse::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
