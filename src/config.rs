//! Application configuration.
//!
//! Settings come from an optional YAML file, then environment variables
//! (after `.env` has been loaded) override individual values. Every field
//! has a default, so an empty file or no file at all yields a usable
//! in-memory configuration.

use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable selecting the storage backend.
pub const STORAGE_ENV: &str = "TASKDESK_STORAGE";
/// Environment variable holding a complete database URL.
pub const DATABASE_URL_ENV: &str = "TASKDESK_DATABASE_URL";
/// Environment variable overriding the default log filter.
pub const LOG_ENV: &str = "TASKDESK_LOG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`AppConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// An environment override holds an unusable value.
    #[error("invalid value {value:?} for {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The storage backend name is unknown.
    #[error("unknown storage backend: {0}")]
    UnknownStorage(String),

    /// The merged configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Storage backend used by the task repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Volatile in-process map.
    #[default]
    Memory,
    /// `PostgreSQL` via a connection pool.
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ConfigError::UnknownStorage(other.to_owned())),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        })
    }
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Complete connection URL; overrides the individual fields.
    pub url: Option<String>,
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub name: String,
    /// libpq `sslmode` value.
    pub sslmode: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_owned(),
            port: 5432,
            user: "postgres".to_owned(),
            password: String::new(),
            name: "taskdesk".to_owned(),
            sslmode: "disable".to_owned(),
            pool_size: 4,
        }
    }
}

impl DatabaseConfig {
    /// Returns the connection URL.
    ///
    /// Credentials and the database name are percent-encoded; an explicit
    /// `url` is returned unchanged.
    #[must_use]
    pub fn dsn(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let user = urlencoding::encode(&self.user);
        let credentials = if self.password.is_empty() {
            user.into_owned()
        } else {
            format!("{user}:{}", urlencoding::encode(&self.password))
        };
        format!(
            "postgres://{credentials}@{}:{}/{}?sslmode={}",
            self.host,
            self.port,
            urlencoding::encode(&self.name),
            urlencoding::encode(&self.sslmode)
        )
    }
}

/// Geometry of the UI shell window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Taskdesk".to_owned(),
            width: 1024,
            height: 768,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Repository backend.
    pub storage: StorageBackend,
    /// Database settings, used when `storage` is `postgres`.
    pub database: DatabaseConfig,
    /// UI window settings.
    pub window: WindowConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads configuration from `path` (when given) and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, an
    /// override is malformed, or the result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(file) => {
                let content = fs::read_to_string(file).map_err(|source| ConfigError::Read {
                    path: file.to_path_buf(),
                    source,
                })?;
                debug!(path = %file.display(), "loaded config file");
                Self::from_yaml_str(&content)?
            }
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        info!(storage = %config.storage, "configuration ready");
        Ok(config)
    }

    /// Parses configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown storage name or a non-numeric
    /// port.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(STORAGE_ENV) {
            self.storage = value.parse()?;
        }
        if let Some(value) = lookup(DATABASE_URL_ENV) {
            self.database.url = Some(value);
        }
        if let Some(value) = lookup("DB_HOST") {
            self.database.host = value;
        }
        if let Some(value) = lookup("DB_PORT") {
            self.database.port = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "DB_PORT",
                value,
            })?;
        }
        if let Some(value) = lookup("DB_USER") {
            self.database.user = value;
        }
        if let Some(value) = lookup("DB_PASSWORD") {
            self.database.password = value;
        }
        if let Some(value) = lookup("DB_NAME") {
            self.database.name = value;
        }
        if let Some(value) = lookup("DB_SSLMODE") {
            self.database.sslmode = value;
        }
        if let Some(value) = lookup(LOG_ENV) {
            self.log.filter = value;
        }
        Ok(())
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window geometry must be non-zero"));
        }
        if self.storage == StorageBackend::Postgres {
            if self.database.pool_size == 0 {
                return Err(ConfigError::Invalid("database pool size must be non-zero"));
            }
            if self.database.url.is_none() && self.database.name.trim().is_empty() {
                return Err(ConfigError::Invalid("database name must not be empty"));
            }
        }
        Ok(())
    }
}

/// Loads variables from a `.env` file in the working directory, if one
/// exists. Variables already set in the process win.
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) => debug!(error = %err, "no .env loaded"),
    }
}
