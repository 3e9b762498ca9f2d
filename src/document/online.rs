//! docsify site.
//!
//! The site lives in `<database>/` and needs no build step: `index.html`
//! loads docsify from a CDN, which renders `README.md` as the landing page
//! and `_sidebar.md` as navigation. Each table gets its own page under
//! `tables/`, see [`page_paths`].

use std::path::PathBuf;

use super::markdown::{page_paths, MarkdownWriter};
use super::{sections, Document, DocumentGenerator, RenderedFile};
use crate::metadata::Table;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <link rel="stylesheet" href="//cdn.jsdelivr.net/npm/docsify@4/lib/themes/vue.css">
</head>
<body>
  <div id="app"></div>
  <script>
    window.$docsify = {
      name: '{name}',
      loadSidebar: true,
      subMaxLevel: 2,
      search: 'auto'
    }
  </script>
  <script src="//cdn.jsdelivr.net/npm/docsify@4"></script>
  <script src="//cdn.jsdelivr.net/npm/docsify@4/lib/plugins/search.min.js"></script>
</body>
</html>
"#;

/// Writes a docsify site for the database.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnlineGenerator;

impl OnlineGenerator {
    fn index_html(&self, doc: &Document) -> String {
        INDEX_TEMPLATE
            .replace("{title}", &html_escape(&doc.title()))
            .replace("{name}", &doc.database.replace('\\', "\\\\").replace('\'', "\\'"))
    }

    fn readme(&self, doc: &Document, pages: &[String]) -> String {
        let mut w = MarkdownWriter::new();
        w.heading(1, &doc.title());
        sections::overview(&mut w, doc);

        w.heading(2, "Tables");
        let rows = doc.tables.iter().zip(pages).enumerate().map(|(idx, (t, page))| {
            vec![
                (idx + 1).to_string(),
                format!("[{}]({})", t.name, page),
                t.comment.clone(),
                t.columns.len().to_string(),
            ]
        });
        w.table(&["No", "Table", "Comment", "Columns"], rows);

        sections::failures(&mut w, doc, 2);
        w.finish()
    }

    fn sidebar(&self, doc: &Document, pages: &[String]) -> String {
        let mut w = MarkdownWriter::new();
        w.link_item("Overview", "README.md");
        w.item("Tables");
        w.indent();
        for (table, page) in doc.tables.iter().zip(pages) {
            w.link_item(&table.name, page);
        }
        w.dedent();
        w.finish()
    }

    fn table_page(&self, doc: &Document, table: &Table) -> String {
        let mut w = MarkdownWriter::new();
        w.heading(1, &table.name);
        sections::table_body(&mut w, doc, table);
        w.finish()
    }
}

impl DocumentGenerator for OnlineGenerator {
    fn render(&self, doc: &Document) -> Vec<RenderedFile> {
        let root = PathBuf::from(&doc.database);
        let pages = page_paths(doc.tables.iter().map(|t| t.name.as_str()));
        let mut files = vec![
            RenderedFile::new(root.join("index.html"), self.index_html(doc)),
            RenderedFile::new(root.join("README.md"), self.readme(doc, &pages)),
            RenderedFile::new(root.join("_sidebar.md"), self.sidebar(doc, &pages)),
        ];
        files.extend(doc.tables.iter().zip(&pages).map(|(table, page)| {
            RenderedFile::new(root.join(page), self.table_page(doc, table))
        }));
        files
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
