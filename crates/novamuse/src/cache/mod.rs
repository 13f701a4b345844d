//! Process-lifetime caches shared across requests.

mod genres;

pub use genres::GenreCache;
