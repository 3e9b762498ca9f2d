//! Configuration module for dbdoc.
//!
//! Handles connection configuration, environment variables, and settings.

mod connection;
mod settings;

pub use connection::{ConfigError, ConnectionConfig, DEFAULT_HOST};
pub use settings::{
    expand_env_vars, ConnectionSettings, DialectSetting, OutputSettings, Settings, SettingsError,
};
