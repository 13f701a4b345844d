pub mod browse;
pub mod catalog;
pub mod claims;
pub mod create;
pub mod error;
pub mod health;
pub mod random;

pub use error::{ApiError, AppError};
