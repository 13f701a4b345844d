//! Access-path selection for browse requests.
//!
//! A fixed priority table, first match wins:
//!
//! | genre | author | path                                         |
//! |-------|--------|----------------------------------------------|
//! | set   | unset  | genre index                                  |
//! | set   | set    | genre index, then filter by author in memory |
//! | unset | set    | author index                                 |
//! | unset | unset  | full-table scan                              |

/// Optional filters of a browse request. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    pub genre: Option<String>,
    pub author: Option<String>,
}

impl BrowseFilter {
    pub fn new(genre: Option<String>, author: Option<String>) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            genre: present(genre),
            author: present(author),
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// How a browse request reads the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPath {
    /// Query the genre index. With `author_filter`, the page is filtered in
    /// memory afterwards.
    GenreIndex {
        genre: String,
        author_filter: Option<String>,
    },
    /// Query the author index.
    AuthorIndex { author: String },
    /// Scan the whole table.
    FullScan,
}

/// Picks the access path for a set of filters.
pub fn select_access_path(filter: &BrowseFilter) -> AccessPath {
    match (&filter.genre, &filter.author) {
        (Some(genre), author) => AccessPath::GenreIndex {
            genre: genre.clone(),
            author_filter: author.clone(),
        },
        (None, Some(author)) => AccessPath::AuthorIndex {
            author: author.clone(),
        },
        (None, None) => AccessPath::FullScan,
    }
}
