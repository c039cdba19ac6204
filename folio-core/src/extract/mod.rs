//! Extractors that read book documents into typed values
//!
//! Each extractor is a parser built from [`crate::parser`] combinators and
//! [`crate::pattern`] patterns, applied to a parsed [`Document`].

mod content;
mod metadata;
mod toc;

pub use content::{extract_chapter, extract_content, ContentExtractor};
pub use metadata::{extract_metadata, MetadataExtractor};
pub use toc::{extract_toc, TocExtractor};

use crate::error::{ParseError, Result};
use crate::node::Document;
use crate::types::{Chapter, Metadata, TocEntry};
use crate::xml::{parse_document, ReadOptions};
use serde::Serialize;
use std::path::Path;

/// What an extractor produced
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Extracted {
    Chapter(Chapter),
    Toc(Vec<TocEntry>),
    Metadata(Metadata),
}

/// Trait for reading one kind of book document
pub trait Extractor: Send + Sync {
    /// Extract from a parsed document
    fn extract(&self, doc: &Document) -> Result<Extracted>;

    /// File extensions this extractor supports
    fn supported_extensions(&self) -> &[&str];
}

/// Get the appropriate extractor for a file extension
pub fn extractor_for_extension(ext: &str) -> Option<Box<dyn Extractor>> {
    match ext.to_lowercase().as_str() {
        "xhtml" | "html" | "htm" => Some(Box::new(ContentExtractor::new())),
        "ncx" => Some(Box::new(TocExtractor::new())),
        "opf" => Some(Box::new(MetadataExtractor::new())),
        _ => None,
    }
}

/// Read, parse and extract a file, choosing the extractor by extension
pub fn extract_file(path: &Path, options: &ReadOptions) -> Result<Extracted> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ParseError::UnsupportedFormat(format!("no extension: {}", path.display())))?;
    let extractor = extractor_for_extension(ext)
        .ok_or_else(|| ParseError::UnsupportedFormat(ext.to_string()))?;

    let text = std::fs::read_to_string(path)?;
    let doc = parse_document(&text, options)?;
    tracing::debug!("Parsed {:?} into {} nodes", path, doc.len());
    extractor.extract(&doc)
}
