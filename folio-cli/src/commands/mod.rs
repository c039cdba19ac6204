//! CLI command implementations

mod batch;
mod content;
mod metadata;
mod toc;

pub use batch::batch;
pub use content::content;
pub use metadata::metadata;
pub use toc::toc;

use anyhow::{Context, Result};
use folio_core::{parse_document, Document, ReadOptions};
use std::fs;

/// Read and parse a markup file
fn read_document(input: &str, options: &ReadOptions) -> Result<Document> {
    let text =
        fs::read_to_string(input).with_context(|| format!("Failed to open input file: {}", input))?;
    let doc =
        parse_document(&text, options).with_context(|| format!("Failed to parse {}", input))?;
    tracing::debug!("Read {} nodes from {}", doc.len(), input);
    Ok(doc)
}
