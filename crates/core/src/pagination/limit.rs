/// Page size used when the request gives none (or an unusable one).
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Largest page size a browse request may ask for.
pub const MAX_PAGE_LIMIT: usize = 50;

/// Number of items fetched by the random/lookup handler.
pub const LOOKUP_LIMIT: usize = 20;

/// An effective page size, always within `1..=MAX_PAGE_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit(usize);

impl PageLimit {
    /// Parses the raw `limit` query parameter.
    ///
    /// Missing, empty, non-numeric, and non-positive values fall back to the
    /// default; values above the maximum are clamped to it.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
            Some(n) if n >= 1 => Self((n as u64).min(MAX_PAGE_LIMIT as u64) as usize),
            _ => Self::default(),
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(DEFAULT_PAGE_LIMIT)
    }
}
