//! Markdown output helpers.

/// Escape text for a Markdown table cell.
///
/// Pipes would split the cell and raw newlines would end the row.
#[must_use]
pub fn escape_cell(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '|' => result.push_str("\\|"),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    result.push_str("<br>");
                }
            }
            '\n' => result.push_str("<br>"),
            c => result.push(c),
        }
    }
    result
}

/// Collapse text onto one line for headings and list items.
#[must_use]
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Anchor id used to link to a table's section.
#[must_use]
pub fn anchor(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("table-{}", slug)
}

/// Directory that holds one page per table, relative to the site root.
pub const PAGES_DIR: &str = "tables";

/// Relative page paths for the given table names, in the same order.
///
/// Pages live under [`PAGES_DIR`] so they never replace the site's own
/// files. Path separators are replaced, and names that end up equal
/// (ignoring case, for case-insensitive filesystems) get a `-2`, `-3`, ...
/// suffix in order of appearance.
#[must_use]
pub fn page_paths<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken = std::collections::HashSet::new();
    names
        .into_iter()
        .map(|name| {
            let stem = page_stem(name);
            let mut candidate = stem.clone();
            let mut n = 2;
            while !taken.insert(candidate.to_lowercase()) {
                candidate = format!("{}-{}", stem, n);
                n += 1;
            }
            format!("{}/{}.md", PAGES_DIR, candidate)
        })
        .collect()
}

fn page_stem(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '#' | '?' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match safe.as_str() {
        "" | "." | ".." => format!("_{}", safe),
        _ => safe,
    }
}

/// Builds a Markdown document line by line.
///
/// Nested lists are written with [`MarkdownWriter::indent`] and
/// [`MarkdownWriter::dedent`]; each level is two spaces.
#[derive(Debug, Default)]
pub struct MarkdownWriter {
    buffer: String,
    depth: usize,
}

impl MarkdownWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write a line at the current list depth.
    pub fn line(&mut self, s: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Write a heading followed by a blank line.
    pub fn heading(&mut self, level: usize, text: &str) {
        let hashes = "#".repeat(level.clamp(1, 6));
        self.line(&format!("{} {}", hashes, single_line(text)));
        self.blank();
    }

    /// Write a bullet item.
    pub fn item(&mut self, text: &str) {
        self.line(&format!("- {}", text));
    }

    /// Write a bullet item linking to `target`.
    pub fn link_item(&mut self, label: &str, target: &str) {
        self.item(&format!("[{}]({})", single_line(label), target));
    }

    /// Write a table. Cells are escaped; short rows are padded.
    pub fn table<R, C>(&mut self, headers: &[&str], rows: R)
    where
        R: IntoIterator<Item = Vec<C>>,
        C: AsRef<str>,
    {
        self.line(&format!("| {} |", headers.join(" | ")));
        let rule: Vec<&str> = headers.iter().map(|_| "---").collect();
        self.line(&format!("| {} |", rule.join(" | ")));
        for row in rows {
            let mut cells: Vec<String> = row.iter().map(|c| escape_cell(c.as_ref())).collect();
            cells.resize(headers.len(), String::new());
            self.line(&format!("| {} |", cells.join(" | ")));
        }
        self.blank();
    }

    /// Consume the writer and return the document.
    #[must_use]
    pub fn finish(self) -> String {
        self.buffer
    }
}
