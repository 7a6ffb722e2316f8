use std::env;
use std::path::Path;

/// Database configuration.
///
/// Reads from the `LIFTLOG_DATABASE_URL` environment variable, falling back
/// to `sqlite://liftlog.db` in the current directory when unset.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full SQLite connection URL (`sqlite://path/to/file.db` or
    /// `sqlite::memory:`).
    pub database_url: String,
}

impl DbConfig {
    /// The default connection URL used when no environment variable is set.
    pub const DEFAULT_URL: &str = "sqlite://liftlog.db";

    /// Build a config from the environment.
    ///
    /// Priority: `LIFTLOG_DATABASE_URL` env var, then the compile-time default.
    pub fn from_env() -> Self {
        let database_url =
            env::var("LIFTLOG_DATABASE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_owned());
        Self { database_url }
    }

    /// Build a config from an explicit URL (useful for tests and CLI flags).
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Build a config pointing at a database file path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite://{}", path.as_ref().display()),
        }
    }

    /// Whether this config targets an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:")
    }

    /// The filesystem path of the database file, if any.
    ///
    /// Returns `None` for in-memory databases or URLs without the
    /// `sqlite:` scheme.
    pub fn file_path(&self) -> Option<&str> {
        if self.is_in_memory() {
            return None;
        }
        let rest = self.database_url.strip_prefix("sqlite://").or_else(|| {
            self.database_url.strip_prefix("sqlite:")
        })?;
        if rest.is_empty() { None } else { Some(rest) }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url() {
        let cfg = DbConfig::new(DbConfig::DEFAULT_URL);
        assert_eq!(cfg.database_url, "sqlite://liftlog.db");
    }

    #[test]
    fn file_path_extraction() {
        let cfg = DbConfig::new("sqlite:///var/lib/liftlog/data.db");
        assert_eq!(cfg.file_path(), Some("/var/lib/liftlog/data.db"));
    }

    #[test]
    fn in_memory_has_no_path() {
        let cfg = DbConfig::new("sqlite::memory:");
        assert!(cfg.is_in_memory());
        assert_eq!(cfg.file_path(), None);
    }

    #[test]
    fn from_path_builds_url() {
        let cfg = DbConfig::from_path("data/liftlog.db");
        assert_eq!(cfg.database_url, "sqlite://data/liftlog.db");
        assert_eq!(cfg.file_path(), Some("data/liftlog.db"));
    }
}
