//! The immutable node tree consumed by parsers and patterns
//!
//! Nodes live in an arena owned by a [`Document`]. Children are stored in
//! order as arena indices; the parent link is an index as well, so the tree is
//! owned top-down and the back-reference never affects lifetime.

mod build;
mod document;

pub use build::{comment, element, text, Markup};
pub use document::{Attributes, Document, NodeId, NodeKind, NodeRef, NodeType};
