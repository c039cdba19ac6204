//! Arena-backed document and node handles

use crate::parser::Cursor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Element attributes, keyed by attribute name
pub type Attributes = BTreeMap<String, String>;

/// Index of a node inside its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Variant tag of a node
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Element,
    Text,
    Comment,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Element => "element",
            NodeType::Text => "text",
            NodeType::Comment => "comment",
        };
        f.write_str(name)
    }
}

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element { name: String, attributes: Attributes },
    Text { text: String },
    Comment { content: String },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Element { .. } => NodeType::Element,
            NodeKind::Text { .. } => NodeType::Text,
            NodeKind::Comment { .. } => NodeType::Comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An owned node tree (or forest of top-level siblings)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent`, or as a new top-level node
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not refer to an element of this document.
    pub fn push_element(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        attributes: Attributes,
    ) -> NodeId {
        self.push(
            parent,
            NodeKind::Element {
                name: name.into(),
                attributes,
            },
        )
    }

    /// Append a text node
    pub fn push_text(&mut self, parent: Option<NodeId>, text: impl Into<String>) -> NodeId {
        self.push(parent, NodeKind::Text { text: text.into() })
    }

    /// Append a comment node
    pub fn push_comment(&mut self, parent: Option<NodeId>, content: impl Into<String>) -> NodeId {
        self.push(
            parent,
            NodeKind::Comment {
                content: content.into(),
            },
        )
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        match parent {
            Some(parent_id) => {
                let parent_data = &mut self.nodes[parent_id.0];
                assert!(
                    matches!(parent_data.kind, NodeKind::Element { .. }),
                    "only elements can have children"
                );
                parent_data.children.push(id);
            }
            None => self.roots.push(id),
        }
        self.nodes.push(NodeData {
            kind,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Cursor over the top-level nodes
    pub fn roots(&self) -> Cursor<'_> {
        Cursor::new(self, &self.roots)
    }

    /// First top-level node, if any
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.roots().head()
    }

    /// Look up a node by id
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { doc: self, id })
    }

    /// Total number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// A borrowed handle to one node of a [`Document`]
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.doc.data(self.id).kind
    }

    pub fn node_type(&self) -> NodeType {
        self.kind().node_type()
    }

    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Element name, `None` for text and comments
    pub fn name(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Element name without a namespace prefix (`dc:title` gives `title`)
    pub fn local_name(&self) -> Option<&'a str> {
        self.name()
            .map(|name| name.rsplit_once(':').map_or(name, |(_, local)| local))
    }

    pub fn attributes(&self) -> Option<&'a Attributes> {
        match self.kind() {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.attributes()
            .and_then(|attrs| attrs.get(key))
            .map(String::as_str)
    }

    /// Text of a text node
    pub fn text(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Content of a comment node
    pub fn comment(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Comment { content } => Some(content),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.doc
            .data(self.id)
            .parent
            .map(|id| NodeRef::new(self.doc, id))
    }

    /// The parent as a one-node cursor
    pub(crate) fn parent_cursor(&self) -> Option<Cursor<'a>> {
        self.doc
            .data(self.id)
            .parent
            .as_ref()
            .map(|id| Cursor::new(self.doc, std::slice::from_ref(id)))
    }

    pub fn children(&self) -> Cursor<'a> {
        Cursor::new(self.doc, &self.doc.data(self.id).children)
    }

    pub fn has_children(&self) -> bool {
        !self.doc.data(self.id).children.is_empty()
    }

    /// Concatenated text of this node and all its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self.kind() {
            NodeKind::Text { text } => out.push_str(text),
            NodeKind::Element { .. } => {
                for child in self.children().iter() {
                    child.collect_text(out);
                }
            }
            NodeKind::Comment { .. } => {}
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Element { name, .. } => write!(f, "<{}>#{}", name, self.id.index()),
            NodeKind::Text { text } => write!(f, "{:?}#{}", text, self.id.index()),
            NodeKind::Comment { content } => write!(f, "<!--{}-->#{}", content, self.id.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_links_and_order() {
        let mut doc = Document::new();
        let root = doc.push_element(None, "a", Attributes::new());
        let first = doc.push_element(Some(root), "b", Attributes::new());
        let second = doc.push_text(Some(root), "hello");

        let root_ref = doc.get(root).unwrap();
        let children: Vec<_> = root_ref.children().iter().map(|n| n.id()).collect();
        assert_eq!(children, vec![first, second]);
        assert_eq!(doc.get(second).unwrap().parent(), Some(root_ref));
        assert!(root_ref.parent().is_none());
        assert_eq!(root_ref.text_content(), "hello");
    }

    #[test]
    fn test_debug_shows_arena_index() {
        let mut doc = Document::new();
        let root = doc.push_element(None, "a", Attributes::new());
        let leaf = doc.push_text(Some(root), "hi");
        let note = doc.push_comment(Some(root), "c");

        assert_eq!(leaf.index(), 1);
        assert_eq!(format!("{:?}", doc.get(root).unwrap()), "<a>#0");
        assert_eq!(format!("{:?}", doc.get(leaf).unwrap()), "\"hi\"#1");
        assert_eq!(format!("{:?}", doc.get(note).unwrap()), "<!--c-->#2");
    }

    #[test]
    #[should_panic(expected = "only elements can have children")]
    fn test_text_cannot_have_children() {
        let mut doc = Document::new();
        let text = doc.push_text(None, "leaf");
        doc.push_comment(Some(text), "nope");
    }
}
