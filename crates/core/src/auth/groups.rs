//! Group membership carried by the caller's identity claims.

/// Group name that grants write access unless configured otherwise.
pub const DEFAULT_ADMIN_GROUP: &str = "admins";

/// Error text returned to callers outside the admin group.
pub const FORBIDDEN_MESSAGE: &str = "Forbidden: Admins only";

/// The set of groups a caller belongs to.
///
/// The claims provider emits the groups claim either as a JSON array
/// (`["admins","editors"]`) or as a flat string (`admins`,
/// `admins,editors`, `[admins editors]`). Both parse to the same groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerGroups(Vec<String>);

impl CallerGroups {
    /// Parses the raw groups claim. A missing claim means no groups.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        if let Ok(groups) = serde_json::from_str::<Vec<String>>(raw) {
            return Self::from_iter(groups);
        }

        let inner = raw
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(raw);

        inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(|group| group.trim_matches(|c| c == '"' || c == '\''))
            .map(str::to_string)
            .collect()
    }

    pub fn is_member(&self, group: &str) -> bool {
        self.0.iter().any(|g| g == group)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl FromIterator<String> for CallerGroups {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect(),
        )
    }
}
