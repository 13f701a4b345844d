use std::env;

use thiserror::Error;

use novamuse_core::auth::DEFAULT_ADMIN_GROUP;
use novamuse_core::storage::SortOrder;

/// Header the gateway uses to forward the caller's groups claim.
pub const DEFAULT_GROUPS_HEADER: &str = "x-auth-groups";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Application configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the quotes table.
    pub table_name: String,
    /// Group a caller must belong to in order to create quotes.
    pub admin_group: String,
    /// Request header carrying the groups claim.
    pub groups_header: String,
    /// Creation-time order of index queries.
    pub browse_order: SortOrder,
    /// Genre used by random selection instead of a random one.
    pub random_genre: Option<String>,
    /// Seed for random selection; unset draws from the OS.
    pub random_seed: Option<u64>,
}

impl Config {
    /// Configuration for `table_name` with every optional setting at its default.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            admin_group: DEFAULT_ADMIN_GROUP.to_string(),
            groups_header: DEFAULT_GROUPS_HEADER.to_string(),
            browse_order: SortOrder::default(),
            random_genre: None,
            random_seed: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `QUOTES_TABLE` - Quotes table name (required)
    /// - `ADMIN_GROUP` - Admin group marker (default: "admins")
    /// - `AUTH_GROUPS_HEADER` - Groups claim header (default: "x-auth-groups")
    /// - `BROWSE_ORDER` - `asc` or `desc` (default: "asc")
    /// - `RANDOM_GENRE` - Fixed genre for random selection (default: unset)
    /// - `RANDOM_SEED` - Seed for reproducible random selection (default: unset)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let table_name = get("QUOTES_TABLE")
            .ok_or(ConfigError::MissingVar("QUOTES_TABLE"))?;

        let browse_order = match get("BROWSE_ORDER") {
            Some(value) => {
                let order = SortOrder::parse(&value);
                order.ok_or_else(|| invalid("BROWSE_ORDER", value))?
            }
            None => SortOrder::default(),
        };

        let random_seed = match get("RANDOM_SEED") {
            Some(value) => {
                let seed = value.trim().parse::<u64>();
                Some(seed.map_err(|_| invalid("RANDOM_SEED", value))?)
            }
            None => None,
        };

        let mut config = Self::new(table_name);
        config.random_seed = random_seed;
        config.browse_order = browse_order;
        config.random_genre = get("RANDOM_GENRE");
        if let Some(group) = get("ADMIN_GROUP") {
            config.admin_group = group;
        }
        if let Some(header) = get("AUTH_GROUPS_HEADER") {
            config.groups_header = header.to_ascii_lowercase();
        }

        Ok(config)
    }
}

fn invalid(name: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidValue { name, value }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_missing_table_is_an_error() {
        assert_eq!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::MissingVar("QUOTES_TABLE"))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("QUOTES_TABLE", "")])),
            Err(ConfigError::MissingVar("QUOTES_TABLE"))
        );
    }

    #[test]
    fn test_default_values() {
        let vars = [("QUOTES_TABLE", "NovaMuseQuotes")];
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.table_name, "NovaMuseQuotes");
        assert_eq!(config.admin_group, "admins");
        assert_eq!(config.groups_header, "x-auth-groups");
        assert_eq!(config.browse_order, SortOrder::Ascending);
        assert_eq!(config.random_genre, None);
        assert_eq!(config.random_seed, None);
    }

    #[test]
    fn test_overrides() {
        let vars = [
            ("QUOTES_TABLE", "Quotes"),
            ("ADMIN_GROUP", "curators"),
            ("AUTH_GROUPS_HEADER", "X-Claims-Groups"),
            ("BROWSE_ORDER", "desc"),
            ("RANDOM_GENRE", "fantasy"),
            ("RANDOM_SEED", "42"),
        ];
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.admin_group, "curators");
        assert_eq!(config.groups_header, "x-claims-groups");
        assert_eq!(config.browse_order, SortOrder::Descending);
        assert_eq!(config.random_genre.as_deref(), Some("fantasy"));
        assert_eq!(config.random_seed, Some(42));
    }

    #[test]
    fn test_invalid_random_seed() {
        let vars = [("QUOTES_TABLE", "Quotes"), ("RANDOM_SEED", "-1")];
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "RANDOM_SEED",
                value: "-1".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_browse_order() {
        let vars = [("QUOTES_TABLE", "Quotes"), ("BROWSE_ORDER", "sideways")];
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "BROWSE_ORDER",
                value: "sideways".to_string(),
            }
        );
    }
}
