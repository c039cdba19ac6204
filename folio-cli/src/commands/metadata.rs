//! Metadata command implementation

use super::read_document;
use anyhow::{Context, Result};
use folio_core::extract::extract_metadata;
use folio_core::ReadOptions;

/// Print the package metadata of an OPF file
pub fn metadata(input: &str, options: &ReadOptions, json: bool) -> Result<()> {
    let doc = read_document(input, options)?;
    let metadata = extract_metadata(&doc)
        .with_context(|| format!("Failed to extract metadata of {}", input))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    println!("Title:       {}", metadata.title);
    if !metadata.creators.is_empty() {
        println!("Authors:     {}", metadata.creators.join(", "));
    }
    if let Some(language) = &metadata.language {
        println!("Language:    {}", language);
    }
    if let Some(identifier) = &metadata.identifier {
        println!("Identifier:  {}", identifier);
    }
    if let Some(publisher) = &metadata.publisher {
        println!("Publisher:   {}", publisher);
    }
    if let Some(desc) = &metadata.description {
        println!("Description: {}", desc);
    }
    if !metadata.subjects.is_empty() {
        println!("Subjects:    {}", metadata.subjects.join(", "));
    }

    Ok(())
}
