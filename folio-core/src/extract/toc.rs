//! Navigation tree from NCX documents

use super::{Extracted, Extractor};
use crate::error::{PatternError, Result};
use crate::node::Document;
use crate::parser::{
    and, choice, descend_path, element_named, into_children, negate, seq, skip_to_first,
    zero_or_more, Cursor, FailReason, ParseResult, Parser, Success,
};
use crate::pattern::{attribute, capture, element_text, sequence, Typed};
use crate::types::TocEntry;
use serde::Deserialize;

/// Extracts the navigation map of an `.ncx` file
#[derive(Debug, Clone, Copy, Default)]
pub struct TocExtractor;

impl TocExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for TocExtractor {
    fn extract(&self, doc: &Document) -> Result<Extracted> {
        extract_toc(doc).map(Extracted::Toc)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["ncx"]
    }
}

/// Label and target at the start of every `navPoint`
#[derive(Debug, Deserialize)]
struct NavHead {
    title: String,
    href: String,
}

fn nav_head() -> std::result::Result<Typed<NavHead>, PatternError> {
    let head = sequence(
        capture("title", element_text("navLabel")),
        capture("href", attribute("content", "src")),
    )?;
    Ok(head.typed())
}

/// Extract the table of contents from an NCX document
///
/// Reads `ncx/navMap`; each `navPoint` must hold a `navLabel` immediately
/// followed by a `content` element with a `src`, and may nest further nav
/// points after them.
pub fn extract_toc(doc: &Document) -> Result<Vec<TocEntry>> {
    let head = nav_head()?;
    let points = NavPoints {
        head: &head,
        level: 0,
    };
    let entries = descend_path(["ncx", "navMap"], points)
        .parse(doc.roots())?
        .value;
    tracing::debug!("Extracted {} top-level TOC entries", entries.len());
    Ok(entries)
}

/// All nav points among a run of siblings
struct NavPoints<'h> {
    head: &'h Typed<NavHead>,
    level: u32,
}

impl<'a> Parser<'a> for NavPoints<'_> {
    type Output = Vec<TocEntry>;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let body = NavPointBody {
            head: self.head,
            level: self.level,
        };
        let point = and((element_named("navPoint"), into_children(body))).map(|(_, entry)| entry);
        let item = choice((
            (&point).map(Some),
            negate(element_named("navPoint")).map(|_| None),
        ));

        let Success { value, next } = zero_or_more(item).parse(input)?;
        // The scan only stops early on a nav point that failed to parse
        if !next.is_empty() {
            let reason = match point.parse(next) {
                Err(reason) => reason,
                Ok(_) => FailReason::single("nav point scan stopped early"),
            };
            return Err(FailReason::tagged(
                format!("navPoint at level {}", self.level),
                reason,
            ));
        }
        Ok(Success::new(value.into_iter().flatten().collect(), next))
    }
}

/// Children of one `navPoint`: its head, then nested points
struct NavPointBody<'h> {
    head: &'h Typed<NavHead>,
    level: u32,
}

impl<'a> Parser<'a> for NavPointBody<'_> {
    type Output = TocEntry;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let nested = NavPoints {
            head: self.head,
            level: self.level + 1,
        };
        seq((skip_to_first(self.head), nested))
            .parse(input)
            .map(|success| {
                success.map(|(head, children)| {
                    TocEntry::new(head.title, head.href)
                        .with_level(self.level)
                        .with_children(children)
                })
            })
    }
}
