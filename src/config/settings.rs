//! TOML-based configuration for dbdoc.
//!
//! Supports a config file (dbdoc.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [connections.shop]
//! db_type = "mysql"
//! host = "db.internal"
//! user = "docs"
//! password = "${SHOP_DB_PASSWORD}"
//! database = "shop"
//!
//! [connections.warehouse]
//! db_type = 3
//! database = "warehouse"
//!
//! [output]
//! doc_type = "offline"
//! dir = "./docs"
//! strict = false
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::connection::{ConnectionConfig, DEFAULT_HOST};
use crate::dialect::Dialect;
use crate::document::DocType;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Unsupported database type in connection '{name}': {value}")]
    UnsupportedDialect { name: String, value: String },
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Named database connections.
    pub connections: BTreeMap<String, ConnectionSettings>,

    /// Document output configuration.
    pub output: OutputSettings,
}

/// Database type as written in the config file: a selector code or a name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DialectSetting {
    Code(i64),
    Name(String),
}

impl DialectSetting {
    fn resolve(&self) -> Option<Dialect> {
        match self {
            DialectSetting::Code(code) => Dialect::from_code(*code).ok(),
            DialectSetting::Name(name) => name.parse().ok(),
        }
    }

    fn describe(&self) -> String {
        match self {
            DialectSetting::Code(code) => code.to_string(),
            DialectSetting::Name(name) => name.clone(),
        }
    }
}

/// Connection configuration.
///
/// String fields support `${VAR}` / `$VAR` expansion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// Database type (1/mysql, 2/mssql, 3/postgres).
    pub db_type: DialectSetting,

    /// Server hostname.
    #[serde(default)]
    pub host: Option<String>,

    /// Server port.
    #[serde(default)]
    pub port: Option<u16>,

    /// Username.
    #[serde(default)]
    pub user: Option<String>,

    /// Password.
    #[serde(default)]
    pub password: Option<String>,

    /// Database name.
    pub database: String,
}

impl ConnectionSettings {
    /// Resolve into a [`ConnectionConfig`], expanding environment variables.
    pub fn to_config(&self, name: &str) -> Result<ConnectionConfig, SettingsError> {
        let dialect = self
            .db_type
            .resolve()
            .ok_or_else(|| SettingsError::UnsupportedDialect {
                name: name.to_string(),
                value: self.db_type.describe(),
            })?;

        let expand_opt = |v: &Option<String>| v.as_deref().map(expand_env_vars).transpose();

        Ok(ConnectionConfig {
            dialect,
            host: expand_opt(&self.host)?.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port,
            user: expand_opt(&self.user)?,
            password: expand_opt(&self.password)?,
            database: expand_env_vars(&self.database)?,
        })
    }
}

/// Document output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Document type to generate.
    pub doc_type: DocType,

    /// Directory documents are written to.
    pub dir: PathBuf,

    /// Abort on the first column listing failure instead of isolating it.
    pub strict: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            doc_type: DocType::Online,
            dir: PathBuf::from("."),
            strict: false,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `DBDOC_CONFIG`
    /// 2. `./dbdoc.toml`
    /// 3. `~/.config/dbdoc/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("DBDOC_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("dbdoc.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("dbdoc").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    /// Get a connection by name.
    pub fn get_connection(&self, name: &str) -> Result<&ConnectionSettings, SettingsError> {
        self.connections
            .get(name)
            .ok_or_else(|| SettingsError::ConnectionNotFound(name.to_string()))
    }

    /// Get the default connection ("default" if it exists, otherwise the first by name).
    pub fn default_connection(&self) -> Option<(&str, &ConnectionSettings)> {
        if let Some(conn) = self.connections.get("default") {
            return Some(("default", conn));
        }
        self.connections.iter().next().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve a named connection into a [`ConnectionConfig`].
    pub fn connection_config(&self, name: &str) -> Result<ConnectionConfig, SettingsError> {
        self.get_connection(name)?.to_config(name)
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let name: String = chars.by_ref().take_while(|&ch| ch != '}').collect();
            name
        } else {
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
