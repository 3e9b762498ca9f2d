//! Introspection error types.

use std::fmt;

use thiserror::Error;

use crate::connection::ConnectionError;
use crate::dialect::{Dialect, DialectError};

/// Result type for introspection operations.
pub type IntrospectResult<T> = Result<T, IntrospectError>;

/// Which database-info lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoStage {
    Version,
    Charset,
    Collation,
}

impl fmt::Display for InfoStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InfoStage::Version => "version",
            InfoStage::Charset => "charset",
            InfoStage::Collation => "collation",
        })
    }
}

/// Failure while running a catalog query and mapping its rows.
#[derive(Error, Debug)]
pub enum RowMapError {
    /// The query could not be executed or its rows could not be read.
    #[error(transparent)]
    Query(#[from] ConnectionError),

    /// A row did not have the shape the record needs.
    #[error("row {row}: expected at least {expected} values, got {actual}")]
    Decode {
        /// Zero-based row index within the result.
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised by the schema introspector.
#[derive(Error, Debug)]
pub enum IntrospectError {
    /// The dialect selector is not supported.
    #[error("configuration error: {0}")]
    Configuration(#[from] DialectError),

    /// The connection speaks a different dialect than the run was set up for.
    #[error("configuration error: introspecting as {expected} over a {actual} connection")]
    DialectMismatch { expected: Dialect, actual: Dialect },

    /// The connection failed its liveness check.
    #[error("connection error: {0}")]
    Connection(#[source] ConnectionError),

    /// Listing tables failed; nothing can be documented.
    #[error("{dialect}: listing tables of '{database}' failed: {source}")]
    TableQuery {
        dialect: Dialect,
        database: String,
        #[source]
        source: RowMapError,
    },

    /// Listing the columns of one table failed.
    #[error("{dialect}: listing columns of table '{table}' failed: {source}")]
    ColumnQuery {
        dialect: Dialect,
        table: String,
        #[source]
        source: RowMapError,
    },

    /// A database-info lookup failed.
    #[error("{dialect}: {stage} lookup failed: {source}")]
    InfoQuery {
        dialect: Dialect,
        stage: InfoStage,
        #[source]
        source: RowMapError,
    },

    /// A database-info lookup returned more than one row.
    #[error("{dialect}: {stage} lookup returned {rows} rows, expected at most one")]
    UnexpectedRows {
        dialect: Dialect,
        stage: InfoStage,
        rows: usize,
    },
}

impl IntrospectError {
    /// Whether the error concerns one table only.
    pub fn is_isolated(&self) -> bool {
        matches!(self, Self::ColumnQuery { .. })
    }

    /// Whether the error comes from configuration rather than the database.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::DialectMismatch { .. })
    }
}
