//! Declarative construction of node trees
//!
//! Mostly used by tests and by callers that assemble small fragments by hand:
//!
//! ```
//! use folio_core::node::{element, text, Document};
//!
//! let doc = Document::from_markup([element("p").attr("class", "note").child(text("Hi"))]);
//! assert_eq!(doc.root().unwrap().text_content(), "Hi");
//! ```

use super::{Attributes, Document, NodeId};

/// A node tree description that can be loaded into a [`Document`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Element {
        name: String,
        attributes: Attributes,
        children: Vec<Markup>,
    },
    Text(String),
    Comment(String),
}

/// Start an element description
pub fn element(name: impl Into<String>) -> Markup {
    Markup::Element {
        name: name.into(),
        attributes: Attributes::new(),
        children: Vec::new(),
    }
}

pub fn text(text: impl Into<String>) -> Markup {
    Markup::Text(text.into())
}

pub fn comment(content: impl Into<String>) -> Markup {
    Markup::Comment(content.into())
}

impl Markup {
    /// Set an attribute (ignored on text and comments)
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Markup::Element { attributes, .. } = &mut self {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Append a child (ignored on text and comments)
    pub fn child(mut self, child: Markup) -> Self {
        if let Markup::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Append several children
    pub fn children(self, children: impl IntoIterator<Item = Markup>) -> Self {
        children.into_iter().fold(self, Markup::child)
    }
}

impl Document {
    /// Build a document whose top-level siblings are `roots`
    pub fn from_markup(roots: impl IntoIterator<Item = Markup>) -> Self {
        let mut doc = Document::new();
        for markup in roots {
            doc.append_markup(None, markup);
        }
        doc
    }

    /// Append a markup subtree under `parent`, returning the id of its top node
    pub fn append_markup(&mut self, parent: Option<NodeId>, markup: Markup) -> NodeId {
        match markup {
            Markup::Element {
                name,
                attributes,
                children,
            } => {
                let id = self.push_element(parent, name, attributes);
                for child in children {
                    self.append_markup(Some(id), child);
                }
                id
            }
            Markup::Text(value) => self.push_text(parent, value),
            Markup::Comment(content) => self.push_comment(parent, content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    #[test]
    fn test_from_markup_preserves_structure() {
        let doc = Document::from_markup([
            text("lead"),
            element("a")
                .attr("id", "x")
                .children([element("b"), comment("note")]),
        ]);

        assert_eq!(doc.len(), 4);
        assert_eq!(doc.roots().len(), 2);

        let a = doc.roots().iter().nth(1).unwrap();
        assert_eq!(a.name(), Some("a"));
        assert_eq!(a.attribute("id"), Some("x"));
        let kinds: Vec<_> = a.children().iter().map(|n| n.node_type()).collect();
        assert_eq!(kinds, vec![NodeType::Element, NodeType::Comment]);
    }

    #[test]
    fn test_attr_on_text_is_ignored() {
        assert_eq!(text("t").attr("k", "v"), text("t"));
    }
}
