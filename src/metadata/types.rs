//! Dialect-neutral schema model.

use serde::{Deserialize, Serialize};

/// Key marker for primary key columns.
pub const PRIMARY_KEY: &str = "PRI";

/// A table (or, for SQL Server, a view) and its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Table comment; the table name when the catalog has none.
    pub comment: String,
    /// Columns in the order the dialect's catalog query returned them.
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table with no columns, normalizing an empty comment to the name.
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            columns: Vec::new(),
        }
        .normalized()
    }

    /// Replace an empty comment with the table name. Idempotent.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.comment.is_empty() {
            self.comment = self.name.clone();
        }
        self
    }

    /// Attach the column list.
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Columns marked as primary key.
    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A column as described by the catalog. Values are copied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Declared type, e.g. `varchar(255)` or `integer`.
    #[serde(rename = "type")]
    pub data_type: String,
    /// `PRI` for primary key members, empty otherwise.
    pub key: String,
    /// `YES` or `NO`.
    pub nullable: String,
    pub comment: String,
    pub default: String,
}

impl Column {
    pub fn is_primary_key(&self) -> bool {
        self.key == PRIMARY_KEY
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable.eq_ignore_ascii_case("YES")
    }
}

/// A table whose column listing failed and was left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFailure {
    /// Table whose columns could not be read.
    pub table: String,
    /// Rendered error, including dialect and failing stage.
    pub message: String,
}

/// The introspected tables of one database.
///
/// Tables keep the order of the catalog's table listing. A table whose
/// column query failed stays in the set with no columns and a matching
/// entry in [`TableSet::failures`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSet {
    pub tables: Vec<Table>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ColumnFailure>,
}

impl TableSet {
    pub fn new(tables: Vec<Table>) -> Self {
        Self {
            tables,
            failures: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Whether every table's columns were read.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Whether `name` is missing columns because its listing failed.
    pub fn is_failed(&self, name: &str) -> bool {
        self.failures.iter().any(|f| f.table == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Table> {
        self.tables.iter()
    }
}

impl<'a> IntoIterator for &'a TableSet {
    type Item = &'a Table;
    type IntoIter = std::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

/// Server-level information shown at the top of generated documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub version: String,
    pub charset: String,
    pub collation: String,
}
