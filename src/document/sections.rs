//! Markdown sections shared by the generators.

use super::markdown::MarkdownWriter;
use super::Document;
use crate::metadata::Table;

const COLUMN_HEADERS: [&str; 7] = ["No", "Name", "Type", "Key", "Nullable", "Default", "Comment"];

/// Database summary grid.
pub(super) fn overview(w: &mut MarkdownWriter, doc: &Document) {
    let mut rows = vec![
        vec!["Database".to_string(), doc.database.clone()],
        vec!["Dialect".to_string(), doc.dialect.to_string()],
    ];
    if let Some(info) = &doc.info {
        rows.push(vec!["Version".to_string(), info.version.clone()]);
        rows.push(vec!["Charset".to_string(), info.charset.clone()]);
        rows.push(vec!["Collation".to_string(), info.collation.clone()]);
    }
    rows.push(vec!["Tables".to_string(), doc.tables.len().to_string()]);
    w.table(&["Item", "Value"], rows);
}

/// Comment line and column grid of one table.
pub(super) fn table_body(w: &mut MarkdownWriter, doc: &Document, table: &Table) {
    if table.comment != table.name {
        w.line(&format!("> {}", super::markdown::single_line(&table.comment)));
        w.blank();
    }

    if doc.tables.is_failed(&table.name) {
        w.line("_Columns could not be read._");
        w.blank();
        return;
    }
    if table.columns.is_empty() {
        w.line("_No columns._");
        w.blank();
        return;
    }

    let rows = table.columns.iter().enumerate().map(|(idx, c)| {
        vec![
            (idx + 1).to_string(),
            c.name.clone(),
            c.data_type.clone(),
            c.key.clone(),
            c.nullable.clone(),
            c.default.clone(),
            c.comment.clone(),
        ]
    });
    w.table(&COLUMN_HEADERS, rows);
}

/// Failure list, written only when some table's columns are missing.
pub(super) fn failures(w: &mut MarkdownWriter, doc: &Document, level: usize) {
    if doc.tables.is_complete() {
        return;
    }
    w.heading(level, "Unreadable tables");
    let rows = doc
        .tables
        .failures
        .iter()
        .map(|f| vec![f.table.clone(), f.message.clone()]);
    w.table(&["Table", "Error"], rows);
}
