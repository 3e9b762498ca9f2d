//! Database connections used for catalog introspection.
//!
//! The introspector never talks to a driver directly. It sees a
//! [`CatalogConnection`]: something that can answer a liveness check and run
//! a catalog query, returning every row as positional text.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    SchemaIntrospector                        │
//! └──────────────────────────────────────────────────────────────┘
//!                              │ query(sql)
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  dyn CatalogConnection                       │
//! │  MySqlConnection   │  MssqlConnection   │  PostgresConnection │
//! │  (sqlx, raw_sql)   │  (tiberius)        │  (tokio-postgres)   │
//! │                    MemoryConnection (scripted)               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each driver is behind a cargo feature of the same name (`mysql`,
//! `mssql`, `postgres`). Result sets are drained inside
//! [`CatalogConnection::query`], so a driver's cursor is always released
//! before the call returns, whether it succeeded or not.

pub mod memory;
#[cfg(feature = "mssql")]
mod mssql;
#[cfg(feature = "mysql")]
mod mysql;
#[cfg(feature = "postgres")]
mod postgres;
mod row;

pub use memory::MemoryConnection;
#[cfg(feature = "mssql")]
pub use mssql::MssqlConnection;
#[cfg(feature = "mysql")]
pub use mysql::MySqlConnection;
#[cfg(feature = "postgres")]
pub use postgres::PostgresConnection;
pub use row::CatalogRow;

use async_trait::async_trait;
use tracing::info;

use crate::config::ConnectionConfig;
use crate::dialect::Dialect;

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Errors raised by database connections.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// The driver could not establish a session.
    #[error("failed to connect to {dialect} at {target}: {message}")]
    Connect {
        dialect: Dialect,
        target: String,
        message: String,
    },

    /// The liveness check on an established session failed.
    #[error("{dialect} liveness check failed: {message}")]
    Ping { dialect: Dialect, message: String },

    /// A query failed to execute or its result could not be read.
    #[error("{dialect} query failed: {message}")]
    Query { dialect: Dialect, message: String },

    /// The driver for this dialect was not compiled in.
    #[error("{0} support is not compiled in (enable the `{1}` feature)")]
    FeatureDisabled(Dialect, &'static str),
}

impl ConnectionError {
    /// Create a query error.
    pub fn query(dialect: Dialect, message: impl Into<String>) -> Self {
        Self::Query {
            dialect,
            message: message.into(),
        }
    }

    /// Create a liveness error.
    pub fn ping(dialect: Dialect, message: impl Into<String>) -> Self {
        Self::Ping {
            dialect,
            message: message.into(),
        }
    }

    /// Create a connect error for the given configuration.
    pub fn connect(config: &ConnectionConfig, message: impl Into<String>) -> Self {
        Self::Connect {
            dialect: config.dialect,
            target: config.target(),
            message: message.into(),
        }
    }
}

/// A live database session that can run catalog queries.
///
/// A connection is used by one introspection run at a time; queries are
/// issued strictly one after another.
#[async_trait]
pub trait CatalogConnection: Send + Sync {
    /// Catalog dialect spoken by this connection.
    fn dialect(&self) -> Dialect;

    /// Check that the session is usable.
    async fn ping(&self) -> ConnectionResult<()>;

    /// Execute `sql` and return every row, fully drained.
    async fn query(&self, sql: &str) -> ConnectionResult<Vec<CatalogRow>>;
}

#[async_trait]
impl<C: CatalogConnection + ?Sized> CatalogConnection for Box<C> {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    async fn ping(&self) -> ConnectionResult<()> {
        (**self).ping().await
    }

    async fn query(&self, sql: &str) -> ConnectionResult<Vec<CatalogRow>> {
        (**self).query(sql).await
    }
}

/// Open a connection for `config` and verify it with a liveness check.
///
/// The returned connection has already answered [`CatalogConnection::ping`].
pub async fn connect(config: &ConnectionConfig) -> ConnectionResult<Box<dyn CatalogConnection>> {
    let conn: Box<dyn CatalogConnection> = match config.dialect {
        Dialect::MySql => open_mysql(config).await?,
        Dialect::SqlServer => open_mssql(config).await?,
        Dialect::Postgres => open_postgres(config).await?,
    };

    conn.ping().await?;
    info!(dialect = %config.dialect, target = %config.target(), "connected");
    Ok(conn)
}

#[cfg(feature = "mysql")]
async fn open_mysql(config: &ConnectionConfig) -> ConnectionResult<Box<dyn CatalogConnection>> {
    Ok(Box::new(MySqlConnection::connect(config).await?))
}

#[cfg(not(feature = "mysql"))]
async fn open_mysql(_config: &ConnectionConfig) -> ConnectionResult<Box<dyn CatalogConnection>> {
    Err(ConnectionError::FeatureDisabled(Dialect::MySql, "mysql"))
}

#[cfg(feature = "mssql")]
async fn open_mssql(config: &ConnectionConfig) -> ConnectionResult<Box<dyn CatalogConnection>> {
    Ok(Box::new(MssqlConnection::connect(config).await?))
}

#[cfg(not(feature = "mssql"))]
async fn open_mssql(_config: &ConnectionConfig) -> ConnectionResult<Box<dyn CatalogConnection>> {
    Err(ConnectionError::FeatureDisabled(Dialect::SqlServer, "mssql"))
}

#[cfg(feature = "postgres")]
async fn open_postgres(config: &ConnectionConfig) -> ConnectionResult<Box<dyn CatalogConnection>> {
    Ok(Box::new(PostgresConnection::connect(config).await?))
}

#[cfg(not(feature = "postgres"))]
async fn open_postgres(_config: &ConnectionConfig) -> ConnectionResult<Box<dyn CatalogConnection>> {
    Err(ConnectionError::FeatureDisabled(Dialect::Postgres, "postgres"))
}
