//! Book metadata types (Dublin Core subset)

use serde::{Deserialize, Serialize};

/// Package metadata following the Dublin Core elements of an OPF file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    /// Book title
    pub title: String,

    /// Authors/creators
    pub creators: Vec<String>,

    /// Subject/genre tags
    pub subjects: Vec<String>,

    /// Book description/summary
    pub description: Option<String>,

    /// Publisher name
    pub publisher: Option<String>,

    /// Language code
    pub language: Option<String>,

    /// ISBN, UUID or other identifier
    pub identifier: Option<String>,
}

impl Metadata {
    /// Create new metadata with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Add an author/creator
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creators.push(creator.into());
        self
    }

    /// Set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}
