//! Documentation output.
//!
//! A [`Document`] bundles everything known about one database: the
//! introspected [`TableSet`] and, when it could be read, the server's
//! [`DatabaseInfo`]. Generators render it into files:
//!
//! | DocType | Code | Output |
//! |---------|------|--------|
//! | [`DocType::Online`] | 1 | docsify site in `<out>/<database>/` |
//! | [`DocType::Offline`] | 2 | single `<out>/<database>.md` |
//!
//! Rendering is pure ([`DocumentGenerator::render`]); only
//! [`generate`] touches the filesystem.

pub mod markdown;
mod offline;
mod online;
mod sections;

pub use offline::OfflineGenerator;
pub use online::OnlineGenerator;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dialect::Dialect;
use crate::metadata::{DatabaseInfo, TableSet};

/// Errors raised while producing documents.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("unsupported document type: {0} (supported: 1 = online, 2 = offline)")]
    UnsupportedDocType(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Kind of document to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// Browsable docsify site.
    #[default]
    Online,
    /// One self-contained Markdown file.
    Offline,
}

impl DocType {
    /// Resolve a numeric document-type selector (`1` or `2`).
    pub fn from_code(code: i64) -> Result<Self, DocumentError> {
        match code {
            1 => Ok(DocType::Online),
            2 => Ok(DocType::Offline),
            other => Err(DocumentError::UnsupportedDocType(other.to_string())),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            DocType::Online => 1,
            DocType::Offline => 2,
        }
    }

    fn generator(&self) -> &'static dyn DocumentGenerator {
        match self {
            DocType::Online => &OnlineGenerator,
            DocType::Offline => &OfflineGenerator,
        }
    }
}

impl FromStr for DocType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code);
        }
        match trimmed.to_lowercase().as_str() {
            "online" | "site" | "docsify" => Ok(DocType::Online),
            "offline" | "markdown" | "md" => Ok(DocType::Offline),
            _ => Err(DocumentError::UnsupportedDocType(trimmed.to_string())),
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocType::Online => "online",
            DocType::Offline => "offline",
        })
    }
}

/// Everything rendered for one database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub database: String,
    pub dialect: Dialect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<DatabaseInfo>,
    #[serde(flatten)]
    pub tables: TableSet,
}

impl Document {
    pub fn new(database: impl Into<String>, dialect: Dialect, tables: TableSet) -> Self {
        Self {
            database: database.into(),
            dialect,
            info: None,
            tables,
        }
    }

    #[must_use]
    pub fn with_info(mut self, info: DatabaseInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Pretty-printed JSON of the whole document.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Document title.
    pub fn title(&self) -> String {
        format!("{} database documentation", self.database)
    }
}

/// One rendered output file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl RenderedFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Renders a [`Document`] into files.
pub trait DocumentGenerator: fmt::Debug {
    /// Files to write, with paths relative to the output directory.
    fn render(&self, doc: &Document) -> Vec<RenderedFile>;
}

/// Render `doc` as `doc_type` and write it under `out_dir`.
///
/// Returns the paths written, in render order.
pub fn generate(
    doc_type: DocType,
    doc: &Document,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, DocumentError> {
    let files = doc_type.generator().render(doc);
    let written = write_files(&files, out_dir)?;
    info!(
        doc_type = %doc_type,
        files = written.len(),
        out = %out_dir.display(),
        "document written"
    );
    Ok(written)
}

/// Write `doc` as JSON to `path`.
pub fn write_json(doc: &Document, path: &Path) -> Result<(), DocumentError> {
    let json = doc.to_json()?;
    write_file(path, &json)?;
    info!(path = %path.display(), "json written");
    Ok(())
}

/// Write rendered files below `out_dir`, creating directories as needed.
pub fn write_files(files: &[RenderedFile], out_dir: &Path) -> Result<Vec<PathBuf>, DocumentError> {
    files
        .iter()
        .map(|file| {
            let path = out_dir.join(&file.path);
            write_file(&path, &file.contents)?;
            Ok(path)
        })
        .collect()
}

fn write_file(path: &Path, contents: &str) -> Result<(), DocumentError> {
    let io_err = |source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
