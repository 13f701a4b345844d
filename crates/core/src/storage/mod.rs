mod error;
pub mod keys;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use traits::QuoteRepository;
pub use types::{Page, PageKey, QuoteIndex, SortOrder};
