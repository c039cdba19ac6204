//! Folio Core Library
//!
//! Parser combinators and capture patterns over document trees, and the
//! ebook extractors built from them. Markup is read into an owned
//! [`node::Document`]; [`parser`] combinators walk its sibling sequences and
//! [`pattern`]s bind named captures into typed records.

pub mod error;
pub mod extract;
pub mod node;
pub mod parser;
pub mod pattern;
pub mod types;
pub mod xml;

pub use error::{FolioError, ParseError, PatternError, Result};
pub use extract::{extract_file, Extracted, Extractor};
pub use node::Document;
pub use parser::{FailReason, Parser};
pub use types::{BookNode, Chapter, Metadata, TocEntry};
pub use xml::{parse_document, ReadOptions};
