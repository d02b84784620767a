//! Service configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// SQLite file. `None` keeps records in memory for the process lifetime.
    pub db_path: Option<PathBuf>,
    pub log_filter: String,
    /// Raw `token=user` pairs for the static resolver.
    pub tokens: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            tokens: String::new(),
        }
    }
}

impl ServiceConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LOADOUT_DB_PATH` - SQLite database file (default: in-memory)
    /// - `LOADOUT_LOG` - tracing filter directive (default: info)
    /// - `LOADOUT_TOKENS` - comma-separated `token=user_id` pairs
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.db_path = lookup("LOADOUT_DB_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        if let Some(filter) = lookup("LOADOUT_LOG").filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        if let Some(tokens) = lookup("LOADOUT_TOKENS") {
            config.tokens = tokens;
        }

        config
    }
}
