//! Content command implementation

use super::read_document;
use anyhow::{Context, Result};
use folio_core::extract::extract_chapter;
use folio_core::{BookNode, ReadOptions};

/// Print the content nodes of an XHTML chapter
pub fn content(input: &str, options: &ReadOptions, json: bool) -> Result<()> {
    let doc = read_document(input, options)?;
    let chapter =
        extract_chapter(&doc).with_context(|| format!("Failed to extract content of {}", input))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chapter)?);
        return Ok(());
    }

    if let Some(title) = &chapter.title {
        println!("Title: {}", title);
        println!();
    }
    for node in &chapter.content {
        match node {
            BookNode::BookTitle(text) => println!("# {}", text),
            BookNode::PartTitle(text) => println!("## {}", text),
            BookNode::ChapterTitle(text) => println!("### {}", text),
            BookNode::SubpartTitle(text) => println!("#### {}", text),
            BookNode::TextBlock(text) => println!("{}", text),
        }
    }

    Ok(())
}
