//! Configuration file management for liftlog.
//!
//! Provides a TOML-based config file at `~/.config/liftlog/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use liftlog_db::config::DbConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DefaultsSection {
    /// User to act as when `--user` is not given.
    pub user_id: Option<i64>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the liftlog config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/liftlog` or `~/.config/liftlog`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("liftlog");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("liftlog")
}

/// Return the path to the liftlog config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct LiftlogConfig {
    pub db_config: DbConfig,
    default_user: Option<i64>,
}

impl LiftlogConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - DB URL: `cli_db_url` > `LIFTLOG_DATABASE_URL` env > `config_file.database.url`
    ///   > `DbConfig::DEFAULT_URL`
    /// - Default user: resolved lazily by [`Self::acting_user`].
    pub fn resolve(cli_db_url: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let db_url = if let Some(url) = cli_db_url {
            url.to_string()
        } else if let Ok(url) = std::env::var("LIFTLOG_DATABASE_URL") {
            url
        } else if let Some(ref cfg) = file_config {
            cfg.database.url.clone()
        } else {
            DbConfig::DEFAULT_URL.to_string()
        };

        let default_user = file_config.and_then(|cfg| cfg.defaults.user_id);

        Ok(Self {
            db_config: DbConfig::new(db_url),
            default_user,
        })
    }

    /// Resolve the acting user: `--user` flag > `LIFTLOG_USER` env >
    /// `config_file.defaults.user_id` > error.
    pub fn acting_user(&self, cli_user: Option<i64>) -> Result<i64> {
        if let Some(id) = cli_user {
            return Ok(id);
        }
        if let Ok(raw) = std::env::var("LIFTLOG_USER") {
            return raw
                .parse()
                .with_context(|| format!("LIFTLOG_USER is not a valid user id: {raw}"));
        }
        if let Some(id) = self.default_user {
            return Ok(id);
        }
        bail!(
            "no acting user: pass --user <ID>, set LIFTLOG_USER, \
             or set defaults.user_id in {}",
            config_path().display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acting_user_prefers_the_flag() {
        let cfg = LiftlogConfig {
            db_config: DbConfig::new("sqlite::memory:"),
            default_user: Some(7),
        };
        assert_eq!(cfg.acting_user(Some(3)).unwrap(), 3);
    }

    #[test]
    fn acting_user_falls_back_to_config_default() {
        let cfg = LiftlogConfig {
            db_config: DbConfig::new("sqlite::memory:"),
            default_user: Some(7),
        };
        assert_eq!(cfg.acting_user(None).unwrap(), 7);
    }

    #[test]
    fn config_file_roundtrips_through_toml() {
        let file = ConfigFile {
            database: DatabaseSection {
                url: "sqlite://liftlog.db".into(),
            },
            defaults: DefaultsSection { user_id: Some(1) },
        };
        let text = toml::to_string_pretty(&file).unwrap();
        let parsed: ConfigFile = toml::from_str(&text).unwrap();
        assert_eq!(parsed.database.url, "sqlite://liftlog.db");
        assert_eq!(parsed.defaults.user_id, Some(1));
    }

    #[test]
    fn defaults_section_is_optional() {
        let parsed: ConfigFile =
            toml::from_str("[database]\nurl = \"sqlite::memory:\"\n").unwrap();
        assert_eq!(parsed.defaults.user_id, None);
    }
}
