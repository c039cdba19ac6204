//! Typed values produced by the book extractors

mod book_node;
mod chapter;
mod metadata;
mod toc;

pub use book_node::BookNode;
pub use chapter::Chapter;
pub use metadata::Metadata;
pub use toc::TocEntry;
