//! Table of contents command implementation

use super::read_document;
use anyhow::{Context, Result};
use folio_core::extract::extract_toc;
use folio_core::{ReadOptions, TocEntry};

/// Print the navigation tree of an NCX file
pub fn toc(input: &str, options: &ReadOptions, json: bool) -> Result<()> {
    let doc = read_document(input, options)?;
    let entries = extract_toc(&doc)
        .with_context(|| format!("Failed to extract table of contents of {}", input))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in entries.iter().flat_map(TocEntry::flatten) {
            let indent = "  ".repeat(entry.level as usize);
            println!("{}{} ({})", indent, entry.title, entry.href);
        }
    }

    Ok(())
}
