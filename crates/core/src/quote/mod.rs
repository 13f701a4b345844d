mod error;
mod identity;
mod requests;
mod samples;
mod types;

pub use error::QuoteError;
pub use identity::{derive_quote_id, normalize_text, QUOTE_ID_LEN};
pub use requests::{CreateQuoteRequest, NewQuote};
pub use samples::{generate_sample_quotes, sample_quotes};
pub use types::{format_timestamp, parse_timestamp, Quote, TIMESTAMP_FORMAT};
