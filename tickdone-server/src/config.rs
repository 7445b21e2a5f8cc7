//! Startup configuration
//!
//! Read once from `~/.tickdone/config.toml` (or an explicit path), then
//! patched from the environment:
//!
//!   TICKDONE_DATABASE_PROVIDER   # "sqlite" | "postgres"
//!   TICKDONE_SQLITE_URL          # connection string for sqlite
//!   TICKDONE_POSTGRES_URL        # connection string for postgres
//!
//! Provider resolution happens in [`AppConfig::database_settings`]; an
//! unknown provider is an error the caller must treat as fatal.

use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;
use crate::http::ServerConfig;

pub const PROVIDER_ENV: &str = "TICKDONE_DATABASE_PROVIDER";
pub const SQLITE_URL_ENV: &str = "TICKDONE_SQLITE_URL";
pub const POSTGRES_URL_ENV: &str = "TICKDONE_POSTGRES_URL";

const DEFAULT_SQLITE_URL: &str = "sqlite://tickdone.db";

/// Configuration errors. All of them abort startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown database provider '{0}' (expected 'sqlite' or 'postgres')")]
    UnknownProvider(String),

    #[error("no connection string configured for provider '{0}'")]
    MissingConnectionString(DatabaseProvider),
}

/// Relational backend selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// Embedded, file based
    Sqlite,
    /// Client-server
    Postgres,
}

impl DatabaseProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }
}

impl FromStr for DatabaseProvider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigError::UnknownProvider(value.to_string())),
        }
    }
}

impl fmt::Display for DatabaseProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved database settings, ready for [`crate::db::connect`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub provider: DatabaseProvider,
    pub url: String,
    pub max_connections: u32,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub connection_strings: ConnectionStrings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        let defaults = ServerConfig::default();
        Self {
            bind: defaults.bind_addr,
            cors_permissive: defaults.cors_permissive,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Raw provider name, resolved by `AppConfig::database_settings`
    pub provider: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            provider: DatabaseProvider::Sqlite.as_str().to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionStrings {
    pub sqlite: Option<String>,
    pub postgres: Option<String>,
}

impl Default for ConnectionStrings {
    fn default() -> Self {
        Self {
            sqlite: Some(DEFAULT_SQLITE_URL.to_string()),
            postgres: None,
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// location is tried and missing files fall back to defaults. Environment
    /// overrides are applied in both cases.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = ?default_path, "No config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Get config file path: ~/.tickdone/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tickdone/config.toml")
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Patch values from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup(PROVIDER_ENV) {
            self.database.provider = provider;
        }
        if let Some(url) = lookup(SQLITE_URL_ENV) {
            self.connection_strings.sqlite = Some(url);
        }
        if let Some(url) = lookup(POSTGRES_URL_ENV) {
            self.connection_strings.postgres = Some(url);
        }
    }

    /// Resolve the provider and its connection string.
    pub fn database_settings(&self) -> Result<DatabaseSettings, ConfigError> {
        let provider: DatabaseProvider = self.database.provider.parse()?;

        let url = match provider {
            DatabaseProvider::Sqlite => self.connection_strings.sqlite.as_deref(),
            DatabaseProvider::Postgres => self.connection_strings.postgres.as_deref(),
        }
        .filter(|url| !url.trim().is_empty())
        .ok_or(ConfigError::MissingConnectionString(provider))?;

        Ok(DatabaseSettings {
            provider,
            url: url.to_string(),
            max_connections: self.database.max_connections.max(1),
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.server.bind,
            cors_permissive: self.server.cors_permissive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_to_sqlite() {
        let settings = AppConfig::default().database_settings().unwrap();
        assert_eq!(settings.provider, DatabaseProvider::Sqlite);
        assert_eq!(settings.url, "sqlite://tickdone.db");
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn parses_full_file() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            bind = "0.0.0.0:8080"
            cors_permissive = true

            [database]
            provider = "Postgres"
            max_connections = 12

            [connection_strings]
            sqlite = "sqlite://other.db"
            postgres = "postgres://db.internal/tickdone"
            "#,
        )
        .unwrap();

        let settings = config.database_settings().unwrap();
        assert_eq!(settings.provider, DatabaseProvider::Postgres);
        assert_eq!(settings.url, "postgres://db.internal/tickdone");
        assert_eq!(settings.max_connections, 12);

        let server = config.server_config();
        assert_eq!(server.bind_addr.port(), 8080);
        assert!(server.cors_permissive);
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let config = AppConfig::from_toml_str("[database]\nprovider = \"SqlServer\"\n").unwrap();
        let err = config.database_settings().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProvider(ref name) if name == "SqlServer"));
    }

    #[test]
    fn provider_aliases() {
        for name in ["sqlite", "SQLite", " sqlite "] {
            assert_eq!(name.parse::<DatabaseProvider>().unwrap(), DatabaseProvider::Sqlite);
        }
        for name in ["postgres", "PostgreSQL", "pg"] {
            assert_eq!(name.parse::<DatabaseProvider>().unwrap(), DatabaseProvider::Postgres);
        }
    }

    #[test]
    fn postgres_without_url_is_an_error() {
        let config = AppConfig::from_toml_str("[database]\nprovider = \"postgres\"\n").unwrap();
        let err = config.database_settings().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingConnectionString(DatabaseProvider::Postgres)
        ));
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = AppConfig::default();
        let env: HashMap<&str, &str> = [
            (PROVIDER_ENV, "postgres"),
            (POSTGRES_URL_ENV, "postgres://env/tickdone"),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        let settings = config.database_settings().unwrap();
        assert_eq!(settings.provider, DatabaseProvider::Postgres);
        assert_eq!(settings.url, "postgres://env/tickdone");
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = AppConfig::from_toml_str("[database\nprovider = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_explicit_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
