//! Chapter content from XHTML documents

use super::{Extracted, Extractor};
use crate::error::Result;
use crate::node::{Document, NodeRef};
use crate::parser::{
    and, choice, descend_path, element_named, first_node, into_children, names_match, node_any,
    report, skip_to_first, zero_or_more, Cursor, ParseResult, Parser,
};
use crate::types::{BookNode, Chapter};

/// Extracts a chapter from an XHTML content document
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentExtractor;

impl ContentExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ContentExtractor {
    fn extract(&self, doc: &Document) -> Result<Extracted> {
        extract_chapter(doc).map(Extracted::Chapter)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["xhtml", "html", "htm"]
    }
}

/// Wrapper elements whose children are read as if they were siblings
const CONTAINERS: &[&str] = &["div", "section", "article", "main", "blockquote"];

/// Extract the content nodes of an XHTML chapter
///
/// Walks `html/body` in document order. Headings become title nodes by level
/// unless a `class` such as `chapter-title` says otherwise, paragraphs become
/// text blocks, wrapper containers are entered and everything else is
/// skipped. Elements whose text is blank produce nothing, so an empty or
/// whitespace-only body yields no nodes. A document without `html/body`
/// fails with [`FolioError::NoMatch`].
///
/// [`FolioError::NoMatch`]: crate::error::FolioError::NoMatch
pub fn extract_content(doc: &Document) -> Result<Vec<BookNode>> {
    // <body/> has no children to enter but is still a body
    let body = and((
        element_named("body"),
        choice((into_children(Blocks), node_any().map(|_| Vec::new()))),
    ))
    .map(|(_, nodes)| nodes);
    let nodes = descend_path(["html"], report("path element 'body'", skip_to_first(body)))
        .parse(doc.roots())?
        .value;
    tracing::debug!("Extracted {} content nodes", nodes.len());
    Ok(nodes)
}

/// Extract a chapter, falling back to `html/head/title` when the body has no
/// title node of its own
pub fn extract_chapter(doc: &Document) -> Result<Chapter> {
    let content = extract_content(doc)?;
    let head_title = descend_path(
        ["html", "head"],
        skip_to_first(element_named("title")).map(normalized_text),
    )
    .parse(doc.roots())
    .ok()
    .map(|success| success.value)
    .filter(|title| !title.is_empty());

    let chapter = Chapter::from_content(content, head_title);
    tracing::debug!(
        "Chapter {:?}: {} paragraphs",
        chapter.title,
        chapter.paragraph_count()
    );
    Ok(chapter)
}

/// Every sibling at one level, entering containers recursively
#[derive(Debug, Clone, Copy, Default)]
struct Blocks;

impl<'a> Parser<'a> for Blocks {
    type Output = Vec<BookNode>;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let nested = and((first_node(container), into_children(Blocks))).map(|(_, nodes)| nodes);
        let block = choice((
            first_node(heading),
            first_node(paragraph),
            nested,
            node_any().map(|_| Vec::new()),
        ));
        zero_or_more(block)
            .parse(input)
            .map(|success| success.map(|groups| groups.into_iter().flatten().collect()))
    }
}

fn heading(node: NodeRef<'_>) -> Option<Vec<BookNode>> {
    let level = heading_level(node.name()?)?;
    Some(titled(node, |text| BookNode::heading(level, text)))
}

fn paragraph(node: NodeRef<'_>) -> Option<Vec<BookNode>> {
    node.name().filter(|name| names_match(name, "p"))?;
    Some(titled(node, BookNode::text))
}

fn container(node: NodeRef<'_>) -> Option<()> {
    let name = node.name()?;
    CONTAINERS
        .iter()
        .any(|container| names_match(name, container))
        .then_some(())
}

/// The node for `node`'s text, honouring a title class; empty if blank
fn titled(node: NodeRef<'_>, default: impl FnOnce(String) -> BookNode) -> Vec<BookNode> {
    let text = normalized_text(node);
    if text.is_empty() {
        return Vec::new();
    }
    let by_class = node
        .attribute("class")
        .and_then(|class| BookNode::from_class(class, text.as_str()));
    vec![by_class.unwrap_or_else(|| default(text))]
}

fn heading_level(name: &str) -> Option<u8> {
    let digit = name.strip_prefix(['h', 'H'])?;
    digit.parse::<u8>().ok().filter(|level| (1..=6).contains(level))
}

/// Text content with runs of whitespace collapsed to single spaces
fn normalized_text(node: NodeRef<'_>) -> String {
    node.text_content()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
