//! Schema introspection across catalog dialects.

use tracing::{debug, info, warn};

use super::error::{InfoStage, IntrospectError, IntrospectResult, RowMapError};
use super::row::fetch_all;
use super::types::{Column, ColumnFailure, DatabaseInfo, Table, TableSet};
use crate::connection::CatalogConnection;
use crate::dialect::{CatalogDialect, Dialect, DialectError, InfoQuery};

/// Builds a [`TableSet`] for one database.
///
/// The introspector carries only its dialect, database name and strictness.
/// It can be reused across connections as long as each speaks the same
/// dialect.
///
/// # Example
///
/// ```
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// use dbdoc::connection::{CatalogRow, MemoryConnection};
/// use dbdoc::dialect::Dialect;
/// use dbdoc::metadata::SchemaIntrospector;
///
/// let conn = MemoryConnection::new(Dialect::MySql)
///     .on("information_schema.tables", vec![CatalogRow::text(["users", ""])]);
///
/// let tables = SchemaIntrospector::new(Dialect::MySql, "shop")
///     .introspect(&conn)
///     .await
///     .unwrap();
/// assert_eq!(tables.tables[0].comment, "users");
/// # });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIntrospector {
    dialect: Dialect,
    database: String,
    strict: bool,
}

impl SchemaIntrospector {
    pub fn new(dialect: Dialect, database: impl Into<String>) -> Self {
        Self {
            dialect,
            database: database.into(),
            strict: false,
        }
    }

    /// Create an introspector from a raw dialect selector (code or name).
    ///
    /// An unsupported selector is rejected here, before any connection is
    /// touched.
    pub fn try_new<D>(dialect: D, database: impl Into<String>) -> IntrospectResult<Self>
    where
        D: TryInto<Dialect, Error = DialectError>,
    {
        Ok(Self::new(dialect.try_into()?, database))
    }

    /// Fail the whole run on the first column listing failure.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// List every table and its columns.
    ///
    /// A failing table listing aborts the run. A failing column listing
    /// aborts only in strict mode; otherwise the table keeps an empty column
    /// list and the failure is recorded in [`TableSet::failures`].
    pub async fn introspect<C>(&self, conn: &C) -> IntrospectResult<TableSet>
    where
        C: CatalogConnection + ?Sized,
    {
        self.check(conn).await?;

        let sql = self.dialect.table_query(&self.database);
        let tables: Vec<Table> =
            fetch_all(conn, &sql)
                .await
                .map_err(|source| IntrospectError::TableQuery {
                    dialect: self.dialect,
                    database: self.database.clone(),
                    source,
                })?;
        debug!(tables = tables.len(), "listed tables");

        let mut set = TableSet::default();
        for table in tables {
            let columns = match self.columns(conn, &table.name).await {
                Ok(columns) => columns,
                Err(err) if self.strict => return Err(err),
                Err(err) => {
                    warn!(table = %table.name, error = %err, "column listing failed, leaving table empty");
                    set.failures.push(ColumnFailure {
                        table: table.name.clone(),
                        message: err.to_string(),
                    });
                    Vec::new()
                }
            };
            set.tables.push(table.with_columns(columns));
        }

        info!(
            dialect = %self.dialect,
            database = %self.database,
            tables = set.len(),
            failures = set.failures.len(),
            "introspection complete"
        );
        Ok(set)
    }

    /// List the columns of one table, in the dialect's catalog order.
    pub async fn columns<C>(&self, conn: &C, table: &str) -> IntrospectResult<Vec<Column>>
    where
        C: CatalogConnection + ?Sized,
    {
        let sql = self.dialect.column_query(&self.database, table);
        let columns: Vec<Column> =
            fetch_all(conn, &sql)
                .await
                .map_err(|source| IntrospectError::ColumnQuery {
                    dialect: self.dialect,
                    table: table.to_string(),
                    source,
                })?;
        debug!(table, columns = columns.len(), "listed columns");
        Ok(columns)
    }

    /// Read server version, character set and collation.
    ///
    /// A lookup returning no rows yields an empty value; one returning more
    /// than one row is an error.
    pub async fn database_info<C>(&self, conn: &C) -> IntrospectResult<DatabaseInfo>
    where
        C: CatalogConnection + ?Sized,
    {
        self.check(conn).await?;

        let queries = self.dialect.info_queries();
        Ok(DatabaseInfo {
            version: self.info_value(conn, InfoStage::Version, queries.version).await?,
            charset: self.info_value(conn, InfoStage::Charset, queries.charset).await?,
            collation: self
                .info_value(conn, InfoStage::Collation, queries.collation)
                .await?,
        })
    }

    async fn info_value<C>(
        &self,
        conn: &C,
        stage: InfoStage,
        query: InfoQuery,
    ) -> IntrospectResult<String>
    where
        C: CatalogConnection + ?Sized,
    {
        let info_err = |source: RowMapError| IntrospectError::InfoQuery {
            dialect: self.dialect,
            stage,
            source,
        };

        debug!(dialect = %self.dialect, %stage, sql = query.sql, "running info query");
        let rows = conn
            .query(query.sql)
            .await
            .map_err(|e| info_err(RowMapError::Query(e)))?;

        match rows.as_slice() {
            [] => Ok(String::new()),
            [row] if row.len() > query.value_column => Ok(row.get_or_empty(query.value_column)),
            [row] => Err(info_err(RowMapError::Decode {
                row: 0,
                expected: query.value_column + 1,
                actual: row.len(),
            })),
            _ => Err(IntrospectError::UnexpectedRows {
                dialect: self.dialect,
                stage,
                rows: rows.len(),
            }),
        }
    }

    async fn check<C>(&self, conn: &C) -> IntrospectResult<()>
    where
        C: CatalogConnection + ?Sized,
    {
        let actual = conn.dialect();
        if actual != self.dialect {
            return Err(IntrospectError::DialectMismatch {
                expected: self.dialect,
                actual,
            });
        }
        conn.ping().await.map_err(IntrospectError::Connection)
    }
}

/// Introspect `database` on `conn` with default (non-strict) settings.
pub async fn introspect<C>(conn: &C, dialect: Dialect, database: &str) -> IntrospectResult<TableSet>
where
    C: CatalogConnection + ?Sized,
{
    SchemaIntrospector::new(dialect, database)
        .introspect(conn)
        .await
}
