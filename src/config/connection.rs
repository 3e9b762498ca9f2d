//! Database connection configuration.
//!
//! Supports configuration via environment variables:
//! - `DBDOC_DB_TYPE`: Database type (1/mysql, 2/mssql, 3/postgres)
//! - `DBDOC_DB_HOST`: Database server hostname (default `127.0.0.1`)
//! - `DBDOC_DB_PORT`: Port (optional, uses dialect default)
//! - `DBDOC_DB_USER`: Username (optional, uses dialect default)
//! - `DBDOC_DB_PASSWORD`: Password (optional)
//! - `DBDOC_DB_NAME`: Database name

use std::env;

use crate::dialect::{CatalogDialect, Dialect, DialectError};

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Error type for connection configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Database connection configuration.
///
/// Port and user fall back to the dialect's defaults when unset
/// (3306/`root`, 1433/`sa`, 5432/`postgres`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Catalog dialect.
    pub dialect: Dialect,
    /// Server hostname.
    pub host: String,
    /// Port (optional).
    pub port: Option<u16>,
    /// Username (optional).
    pub user: Option<String>,
    /// Password (optional).
    pub password: Option<String>,
    /// Database name.
    pub database: String,
}

impl ConnectionConfig {
    /// Create a config for `database` on the local host with dialect defaults.
    pub fn new(dialect: Dialect, database: impl Into<String>) -> Self {
        Self {
            dialect,
            host: DEFAULT_HOST.to_string(),
            port: None,
            user: None,
            password: None,
            database: database.into(),
        }
    }

    /// Set the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set user and password.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Effective port.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.dialect.default_port())
    }

    /// Effective username.
    pub fn user(&self) -> &str {
        self.user
            .as_deref()
            .unwrap_or_else(|| self.dialect.default_user())
    }

    /// Effective password (empty when unset).
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }

    /// `host:port/database`, safe for logs.
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port(), self.database)
    }

    /// Check that the configuration can be used to connect.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "database name must not be empty".to_string(),
            ));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "host must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `DBDOC_DB_TYPE`: database type code or name
    /// - `DBDOC_DB_NAME`: database name
    ///
    /// Optional:
    /// - `DBDOC_DB_HOST`, `DBDOC_DB_PORT`, `DBDOC_DB_USER`, `DBDOC_DB_PASSWORD`
    pub fn from_env() -> Result<Self, ConfigError> {
        let dialect_str = env::var("DBDOC_DB_TYPE")
            .map_err(|_| ConfigError::MissingEnvVar("DBDOC_DB_TYPE".to_string()))?;
        let dialect: Dialect = dialect_str.parse()?;

        let database = env::var("DBDOC_DB_NAME")
            .map_err(|_| ConfigError::MissingEnvVar("DBDOC_DB_NAME".to_string()))?;

        let host = env::var("DBDOC_DB_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("DBDOC_DB_PORT") {
            Ok(p) => Some(p.parse().map_err(|_| {
                ConfigError::InvalidConfig(format!("DBDOC_DB_PORT is not a port number: {}", p))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            dialect,
            host,
            port,
            user: env::var("DBDOC_DB_USER").ok(),
            password: env::var("DBDOC_DB_PASSWORD").ok(),
            database,
        })
    }
}
