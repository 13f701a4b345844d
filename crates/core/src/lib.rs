//! Functional core for the novamuse quotes service.
//!
//! Everything here is free of network and AWS code: key derivation, cursor
//! encoding, index selection and the storage contract the service backends
//! implement.

pub mod auth;
pub mod browse;
pub mod catalog;
pub mod pagination;
pub mod quote;
pub mod storage;
