//! Content nodes extracted from chapter markup

use serde::{Deserialize, Serialize};

/// One renderable piece of chapter content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum BookNode {
    /// Title of the whole book
    BookTitle(String),

    /// Title of a part grouping several chapters
    PartTitle(String),

    /// Chapter heading
    ChapterTitle(String),

    /// Heading inside a chapter
    SubpartTitle(String),

    /// Paragraph of running text
    TextBlock(String),
}

impl BookNode {
    /// Create a text block
    pub fn text(s: impl Into<String>) -> Self {
        BookNode::TextBlock(s.into())
    }

    /// Title node for a heading level (1 = book title, 6 = innermost)
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let text = text.into();
        match level.clamp(1, 6) {
            1 => BookNode::BookTitle(text),
            2 => BookNode::PartTitle(text),
            3 => BookNode::ChapterTitle(text),
            _ => BookNode::SubpartTitle(text),
        }
    }

    /// Title node for a `class` attribute value such as `chapter-title`
    pub fn from_class(class: &str, text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        class
            .split_whitespace()
            .find_map(|token| match token {
                "book-title" => Some(BookNode::BookTitle(text.clone())),
                "part-title" => Some(BookNode::PartTitle(text.clone())),
                "chapter-title" => Some(BookNode::ChapterTitle(text.clone())),
                "subpart-title" => Some(BookNode::SubpartTitle(text.clone())),
                _ => None,
            })
    }

    /// The text carried by this node
    pub fn as_text(&self) -> &str {
        match self {
            BookNode::BookTitle(s)
            | BookNode::PartTitle(s)
            | BookNode::ChapterTitle(s)
            | BookNode::SubpartTitle(s)
            | BookNode::TextBlock(s) => s,
        }
    }

    pub fn is_title(&self) -> bool {
        !matches!(self, BookNode::TextBlock(_))
    }
}
