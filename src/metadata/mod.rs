//! Schema introspection.
//!
//! This module turns a live [`CatalogConnection`](crate::connection::CatalogConnection)
//! and a [`Dialect`](crate::dialect::Dialect) into a dialect-neutral
//! [`TableSet`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     SchemaIntrospector                          │
//! │  introspect()                   │  database_info()              │
//! │   1. table_query  → Vec<Table>  │   version / charset /         │
//! │   2. column_query → Vec<Column> │   collation lookups           │
//! │      (per table, isolated)      │                               │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │ fetch_all::<T>(conn, sql)
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              Row mapper (FromCatalogRow)                        │
//! │   positional decode, NULL → "", empty table comment → name      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tables are visited in the order the catalog lists them, one query at a
//! time. Column order within a table is whatever the dialect's query
//! produces; see [`crate::dialect::ColumnOrder`].

mod error;
mod introspector;
mod row;
mod types;

pub use error::{InfoStage, IntrospectError, IntrospectResult, RowMapError};
pub use introspector::{introspect, SchemaIntrospector};
pub use row::{fetch_all, map_rows, FromCatalogRow};
pub use types::*;
