//! The sibling sequence a parser consumes

use crate::node::{Document, NodeId, NodeRef};
use std::fmt;

/// The nodes remaining to be matched at the current tree level
///
/// A cursor is a borrowed window onto the children of one node (or the
/// top-level nodes of a document). Parsers only ever shrink it from the front.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    doc: &'a Document,
    ids: &'a [NodeId],
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(doc: &'a Document, ids: &'a [NodeId]) -> Self {
        Self { doc, ids }
    }

    /// An empty cursor over `doc`
    pub fn empty(doc: &'a Document) -> Self {
        Self { doc, ids: &[] }
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn head(&self) -> Option<NodeRef<'a>> {
        self.ids.first().map(|id| NodeRef::new(self.doc, *id))
    }

    /// Everything after the head (empty if the cursor is empty)
    pub fn tail(&self) -> Cursor<'a> {
        Cursor::new(self.doc, self.ids.get(1..).unwrap_or(&[]))
    }

    pub fn split_first(&self) -> Option<(NodeRef<'a>, Cursor<'a>)> {
        self.head().map(|head| (head, self.tail()))
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.ids.iter().map(move |id| NodeRef::new(doc, *id))
    }

    /// The prefix of `self` that lies before `rest`
    ///
    /// `rest` must be a suffix of `self`, which holds for any `next` cursor a
    /// parser returned when run on `self`.
    pub fn consumed_until(&self, rest: Cursor<'a>) -> Cursor<'a> {
        debug_assert!(rest.len() <= self.len(), "rest is not a suffix");
        let split = self.ids.len().saturating_sub(rest.ids.len());
        Cursor::new(self.doc, &self.ids[..split])
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.ids == other.ids
    }
}

impl Eq for Cursor<'_> {}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
