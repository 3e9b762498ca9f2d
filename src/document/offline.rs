//! Single-file Markdown document.

use super::markdown::{anchor, MarkdownWriter};
use super::{sections, Document, DocumentGenerator, RenderedFile};

/// Writes `<database>.md` with a table of contents and one section per table.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

impl OfflineGenerator {
    pub fn render_markdown(&self, doc: &Document) -> String {
        let mut w = MarkdownWriter::new();
        w.heading(1, &doc.title());
        sections::overview(&mut w, doc);

        w.heading(2, "Tables");
        for table in &doc.tables {
            w.link_item(&table.name, &format!("#{}", anchor(&table.name)));
        }
        w.blank();

        for table in &doc.tables {
            w.line(&format!("<a id=\"{}\"></a>", anchor(&table.name)));
            w.blank();
            w.heading(2, &table.name);
            sections::table_body(&mut w, doc, table);
        }

        sections::failures(&mut w, doc, 2);
        w.finish()
    }
}

impl DocumentGenerator for OfflineGenerator {
    fn render(&self, doc: &Document) -> Vec<RenderedFile> {
        vec![RenderedFile::new(
            format!("{}.md", doc.database),
            self.render_markdown(doc),
        )]
    }
}
