//! Application configuration.
//!
//! Loaded from a TOML file, then overridden by `TALENTHUB_*` environment
//! variables. Every key is optional.
//!
//! ```toml
//! [database]
//! path = "/var/lib/talenthub/talenthub.db"
//!
//! [logging]
//! level = "info"
//! dir = "/var/log/talenthub"
//!
//! [session]
//! user_id = "2f6c0d1e-..."
//! ```

use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::store::{SqliteStore, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "TALENTHUB_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TALENTHUB_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TALENTHUB_LOG_DIR";
pub const ENV_USER_ID: &str = "TALENTHUB_USER_ID";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; absent means a private in-memory database.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Authenticated user; settings calls fail without one.
    pub user_id: Option<String>,
}

impl AppConfig {
    /// Reads `path` when given, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies `TALENTHUB_*` overrides; empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.database.path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = Some(level);
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.logging.dir = Some(PathBuf::from(dir));
        }
        if let Some(user) = lookup(ENV_USER_ID) {
            self.session.user_id = Some(user);
        }
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(default_log_level())
    }

    /// Configured log directory, else `<data_local_dir>/talenthub/logs`.
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging
            .dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|base| base.join("talenthub").join("logs")))
    }

    /// Starts file logging when a log directory can be resolved.
    ///
    /// Returns `Ok(false)` when there is nowhere to log to.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match self.log_dir() {
            Some(dir) => init_logging(self.log_level(), &dir).map(|()| true),
            None => Ok(false),
        }
    }

    /// Opens the configured store with the session user attached.
    pub fn open_store(&self) -> StoreResult<SqliteStore> {
        let mut store = match &self.database.path {
            Some(path) => SqliteStore::open(path)?,
            None => SqliteStore::open_in_memory()?,
        };
        store.set_session_user(self.session.user_id.clone());
        Ok(store)
    }
}
