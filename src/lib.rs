//! # dbdoc
//!
//! Schema documentation for MySQL/MariaDB, SQL Server and PostgreSQL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        ConnectionConfig (flags / env / dbdoc.toml)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [connection::connect + ping]
//! ┌─────────────────────────────────────────────────────────┐
//! │               dyn CatalogConnection                      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metadata::SchemaIntrospector]
//! ┌─────────────────────────────────────────────────────────┐
//! │   dialect::Dialect → table / column catalog queries      │
//! │   row mapper      → TableSet (+ DatabaseInfo)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [document::generate]
//! ┌─────────────────────────────────────────────────────────┐
//! │     online (docsify site)  │  offline (single .md)       │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod connection;
pub mod dialect;
pub mod document;
pub mod metadata;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{ConnectionConfig, Settings};
    pub use crate::connection::{connect, CatalogConnection, CatalogRow, MemoryConnection};
    pub use crate::dialect::{CatalogDialect, ColumnOrder, Dialect};
    pub use crate::document::{generate, DocType, Document};
    pub use crate::metadata::{
        introspect, Column, DatabaseInfo, IntrospectError, SchemaIntrospector, Table, TableSet,
    };
}

pub use dialect::Dialect;
pub use metadata::{introspect, SchemaIntrospector, TableSet};
