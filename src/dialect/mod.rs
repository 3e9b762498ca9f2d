//! Catalog dialect definitions.
//!
//! Every supported database keeps its own catalog layout. This module hides
//! those differences behind one trait: each dialect knows how to list the
//! tables of a database and the columns of a table, and returns rows of the
//! same shape regardless of where the catalog keeps them.
//!
//! | Dialect | Tables from | Columns from | Column order |
//! |---------|-------------|--------------|--------------|
//! | MySQL / MariaDB | `information_schema.tables` | `information_schema.columns` | ordinal ASC |
//! | SQL Server | `sysobjects` + `sys.extended_properties` | `syscolumns` + `systypes` | column id ASC |
//! | PostgreSQL | `pg_class` + `pg_description` | `information_schema.columns` | ordinal DESC |
//!
//! Table rows are `(name, comment)`; column rows are
//! `(name, type, key, nullable, comment, default)`.
//!
//! # Usage
//!
//! ```
//! use dbdoc::dialect::{CatalogDialect, Dialect};
//!
//! let dialect: Dialect = "postgres".parse().unwrap();
//! let sql = dialect.column_query("shop", "events");
//! assert!(sql.contains("ORDER BY ordinal_position DESC"));
//! ```

pub mod helpers;
mod mysql;
mod postgres;
mod tsql;

pub use mysql::MySql;
pub use postgres::Postgres;
pub use tsql::SqlServer;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error raised when a dialect selector does not name a supported catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    #[error("unsupported database type: {0} (supported: 1 = MySQL/MariaDB, 2 = SQL Server, 3 = PostgreSQL)")]
    Unsupported(String),
}

/// Direction in which a dialect's column query returns columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOrder {
    /// Lowest ordinal position first.
    Ascending,
    /// Highest ordinal position first.
    Descending,
}

/// A single-value catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoQuery {
    /// Query text.
    pub sql: &'static str,
    /// Zero-based index of the result column holding the value.
    pub value_column: usize,
}

/// The lookups behind [`crate::metadata::DatabaseInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoQueries {
    pub version: InfoQuery,
    pub charset: InfoQuery,
    pub collation: InfoQuery,
}

/// Catalog dialect trait - builds the introspection queries for one database family.
///
/// All methods are pure: they never touch a database, and the same
/// arguments always produce the same text.
pub trait CatalogDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Query listing every documented table, as `(name, comment)` rows.
    fn table_query(&self, database: &str) -> String;

    /// Query listing the columns of `table`, as
    /// `(name, type, key, nullable, comment, default)` rows.
    fn column_query(&self, database: &str, table: &str) -> String;

    /// Order in which [`CatalogDialect::column_query`] returns columns.
    fn column_order(&self) -> ColumnOrder {
        ColumnOrder::Ascending
    }

    /// Version, character set and collation lookups.
    fn info_queries(&self) -> InfoQueries;

    /// Quote a string literal for embedding in catalog queries.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Port the server listens on unless told otherwise.
    fn default_port(&self) -> u16;

    /// Administrative login used when none is configured.
    fn default_user(&self) -> &'static str;
}

/// Supported catalog dialects.
///
/// Exactly one dialect is active for an introspection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL and MariaDB.
    #[default]
    MySql,
    /// Microsoft SQL Server.
    SqlServer,
    /// PostgreSQL.
    Postgres,
}

impl Dialect {
    /// All supported dialects, in selector-code order.
    pub const ALL: [Dialect; 3] = [Dialect::MySql, Dialect::SqlServer, Dialect::Postgres];

    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn CatalogDialect {
        match self {
            Dialect::MySql => &MySql,
            Dialect::SqlServer => &SqlServer,
            Dialect::Postgres => &Postgres,
        }
    }

    /// Resolve a numeric database-type selector (`1`, `2` or `3`).
    pub fn from_code(code: i64) -> Result<Self, DialectError> {
        match code {
            1 => Ok(Dialect::MySql),
            2 => Ok(Dialect::SqlServer),
            3 => Ok(Dialect::Postgres),
            other => Err(DialectError::Unsupported(other.to_string())),
        }
    }

    /// Numeric selector for this dialect.
    pub fn code(&self) -> i64 {
        match self {
            Dialect::MySql => 1,
            Dialect::SqlServer => 2,
            Dialect::Postgres => 3,
        }
    }
}

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code);
        }
        match trimmed.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "mssql" | "sqlserver" | "sql_server" | "tsql" => Ok(Dialect::SqlServer),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            _ => Err(DialectError::Unsupported(trimmed.to_string())),
        }
    }
}

impl TryFrom<i64> for Dialect {
    type Error = DialectError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl TryFrom<&str> for Dialect {
    type Error = DialectError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// Implement CatalogDialect for Dialect enum by delegating to concrete types
impl CatalogDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn table_query(&self, database: &str) -> String {
        self.dialect().table_query(database)
    }

    fn column_query(&self, database: &str, table: &str) -> String {
        self.dialect().column_query(database, table)
    }

    fn column_order(&self) -> ColumnOrder {
        self.dialect().column_order()
    }

    fn info_queries(&self) -> InfoQueries {
        self.dialect().info_queries()
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn default_port(&self) -> u16 {
        self.dialect().default_port()
    }

    fn default_user(&self) -> &'static str {
        self.dialect().default_user()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
