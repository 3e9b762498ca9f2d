//! Positional catalog rows.

/// One row returned by a catalog query.
///
/// Catalog queries are executed over each driver's text protocol, so every
/// value arrives as text; SQL `NULL` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    values: Vec<Option<String>>,
}

impl CatalogRow {
    /// Create a row from positional values.
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Create a row where every value is non-null.
    pub fn text<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(|v| Some(v.into())).collect(),
        }
    }

    /// Number of values in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `idx`; `None` when the index is out of range or the value is NULL.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).and_then(|v| v.as_deref())
    }

    /// Value at `idx` with NULL read as the empty string.
    pub fn get_or_empty(&self, idx: usize) -> String {
        self.get(idx).unwrap_or_default().to_string()
    }
}

impl From<Vec<Option<String>>> for CatalogRow {
    fn from(values: Vec<Option<String>>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Option<String>> for CatalogRow {
    fn from_iter<T: IntoIterator<Item = Option<String>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
