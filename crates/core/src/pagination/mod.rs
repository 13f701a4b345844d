mod cursor;
mod limit;

pub use cursor::{decode_cursor, encode_cursor, CursorError};
pub use limit::{PageLimit, DEFAULT_PAGE_LIMIT, LOOKUP_LIMIT, MAX_PAGE_LIMIT};
