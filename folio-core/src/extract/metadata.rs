//! Package metadata from OPF documents

use super::{Extracted, Extractor};
use crate::error::{ParseError, Result};
use crate::node::{Document, NodeRef};
use crate::parser::{choice, descend_path, first_node, node_any, zero_or_more, Parser};
use crate::types::Metadata;

/// Extracts the Dublin Core metadata of an `.opf` package file
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataExtractor;

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for MetadataExtractor {
    fn extract(&self, doc: &Document) -> Result<Extracted> {
        extract_metadata(doc).map(Extracted::Metadata)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["opf"]
    }
}

/// Dublin Core elements this extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DcField {
    Title,
    Creator,
    Language,
    Identifier,
    Publisher,
    Description,
    Subject,
}

impl DcField {
    fn from_local_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "creator" => Some(Self::Creator),
            "language" => Some(Self::Language),
            "identifier" => Some(Self::Identifier),
            "publisher" => Some(Self::Publisher),
            "description" => Some(Self::Description),
            "subject" => Some(Self::Subject),
            _ => None,
        }
    }
}

fn dc_element(node: NodeRef<'_>) -> Option<(DcField, String)> {
    let field = DcField::from_local_name(node.local_name()?)?;
    let value = node.text_content().trim().to_string();
    Some((field, value))
}

/// Extract metadata from an OPF document
///
/// Reads the Dublin Core children of `package/metadata`, with or without the
/// `dc:` prefix. Single-valued fields keep their first non-empty occurrence;
/// creators and subjects accumulate in document order. A package without a
/// title fails with [`ParseError::MissingField`].
pub fn extract_metadata(doc: &Document) -> Result<Metadata> {
    let fields = zero_or_more(choice((
        first_node(dc_element).map(Some),
        node_any().map(|_| None),
    )));
    let found = descend_path(["package", "metadata"], fields)
        .parse(doc.roots())?
        .value;

    let mut metadata = Metadata::default();
    let mut title = None;
    for (field, value) in found.into_iter().flatten() {
        if value.is_empty() {
            continue;
        }
        match field {
            DcField::Title => {
                title.get_or_insert(value);
            }
            DcField::Creator => metadata.creators.push(value),
            DcField::Subject => metadata.subjects.push(value),
            DcField::Language => {
                metadata.language.get_or_insert(value);
            }
            DcField::Identifier => {
                metadata.identifier.get_or_insert(value);
            }
            DcField::Publisher => {
                metadata.publisher.get_or_insert(value);
            }
            DcField::Description => {
                metadata.description.get_or_insert(value);
            }
        }
    }

    metadata.title = title.ok_or_else(|| ParseError::MissingField("title".to_string()))?;
    tracing::debug!(
        "Extracted metadata for {:?} ({} creators)",
        metadata.title,
        metadata.creators.len()
    );
    Ok(metadata)
}
