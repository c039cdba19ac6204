//! Chapter type representing a single content document of a book

use super::BookNode;
use serde::{Deserialize, Serialize};

/// A single chapter of a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
    /// Chapter title
    pub title: Option<String>,

    /// The content nodes, in document order
    pub content: Vec<BookNode>,
}

impl Chapter {
    /// Create a chapter from its content, taking the title from the first
    /// title node, or from `fallback` when there is none
    pub fn from_content(content: Vec<BookNode>, fallback: Option<String>) -> Self {
        let title = content
            .iter()
            .find(|node| node.is_title())
            .map(|node| node.as_text().to_string())
            .or(fallback);
        Self { title, content }
    }

    /// Number of text blocks
    pub fn paragraph_count(&self) -> usize {
        self.content.iter().filter(|node| !node.is_title()).count()
    }
}
