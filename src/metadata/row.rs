//! Decoding catalog rows into schema records.
//!
//! Every dialect's catalog query returns rows in the same positional shape,
//! so decoding is dialect-independent. SQL NULL decodes as an empty string.

use tracing::debug;

use super::error::RowMapError;
use super::types::{Column, Table};
use crate::connection::{CatalogConnection, CatalogRow};

/// A record decoded positionally from one catalog row.
pub trait FromCatalogRow: Sized {
    /// Number of leading values the record reads.
    const WIDTH: usize;

    /// Decode a row already known to hold at least [`Self::WIDTH`] values.
    fn from_row(row: &CatalogRow) -> Self;

    /// Decode a row, rejecting rows that are too short.
    fn decode(index: usize, row: &CatalogRow) -> Result<Self, RowMapError> {
        if row.len() < Self::WIDTH {
            return Err(RowMapError::Decode {
                row: index,
                expected: Self::WIDTH,
                actual: row.len(),
            });
        }
        Ok(Self::from_row(row))
    }
}

/// `(name, comment)`
impl FromCatalogRow for Table {
    const WIDTH: usize = 2;

    fn from_row(row: &CatalogRow) -> Self {
        Table::new(row.get_or_empty(0), row.get_or_empty(1))
    }
}

/// `(name, type, key, nullable, comment, default)`
impl FromCatalogRow for Column {
    const WIDTH: usize = 6;

    fn from_row(row: &CatalogRow) -> Self {
        Column {
            name: row.get_or_empty(0),
            data_type: row.get_or_empty(1),
            key: row.get_or_empty(2),
            nullable: row.get_or_empty(3),
            comment: row.get_or_empty(4),
            default: row.get_or_empty(5),
        }
    }
}

/// Decode a fully fetched result set.
pub fn map_rows<T: FromCatalogRow>(rows: &[CatalogRow]) -> Result<Vec<T>, RowMapError> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| T::decode(idx, row))
        .collect()
}

/// Run `sql` on `conn` and decode every returned row.
///
/// The connection drains the result before returning, so no cursor
/// outlives this call on either path.
pub async fn fetch_all<T, C>(conn: &C, sql: &str) -> Result<Vec<T>, RowMapError>
where
    T: FromCatalogRow,
    C: CatalogConnection + ?Sized,
{
    debug!(dialect = %conn.dialect(), sql = %sql, "running catalog query");
    let rows = conn.query(sql).await?;
    debug!(rows = rows.len(), "catalog query returned");
    map_rows(&rows)
}
