//! Parser combinators over node trees
//!
//! A parser takes a [`Cursor`] (the siblings still to be matched at one tree
//! level) and either produces a value plus the unconsumed suffix, or a
//! [`FailReason`]. Parsers are plain immutable values: build them once and
//! run them against as many documents as needed.
//!
//! ```
//! use folio_core::node::{element, text, Document};
//! use folio_core::parser::{element_with_children, text_satisfying, Parser};
//!
//! let doc = Document::from_markup([element("title").child(text("Persuasion"))]);
//! let title = element_with_children("TITLE", text_satisfying(|t| Some(t.to_string())));
//!
//! let parsed = title.parse(doc.roots()).unwrap();
//! assert_eq!(parsed.value, "Persuasion");
//! assert!(parsed.next.is_empty());
//! ```

mod combinator;
mod cursor;
mod navigate;
mod path;
mod primitive;
mod result;

pub use combinator::{
    and, choice, from_fn, map, negate, one_or_more, report, seq, transform, zero_or_more, And,
    Choice, FromFn, Map, Negate, OneOrMore, Report, Seq, Transform, ZeroOrMore,
};
pub use cursor::Cursor;
pub use navigate::{
    between, element_with_children, into_children, skip_to_first, to_parent, Between,
    ElementWithChildren, IntoChildren, SkipToFirst, ToParent,
};
pub use path::{descend_path, DescendPath};
pub use primitive::{
    comment_equals, element_named, element_with_attributes, first_node, node_any, node_of_type,
    text_satisfying, CommentEquals, ElementNamed, ElementWithAttributes, FirstNode, NodeAny,
    NodeOfType, TextSatisfying,
};
pub use result::{success, FailReason, FailTree, ParseResult, Success};

pub(crate) use primitive::names_match;

use std::sync::Arc;

/// Boxed parser for dynamic composition within one input lifetime
pub type BoxedParser<'p, 'a, T> = Box<dyn Parser<'a, Output = T> + Send + Sync + 'p>;

/// A parser over sibling sequences borrowed from a document with lifetime `'a`
pub trait Parser<'a> {
    /// Value produced on success
    type Output;

    /// Run against `input`
    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output>;

    /// Infallibly project the output
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        map(self, f)
    }

    /// Project the output, failing when `f` returns `None`
    fn transform<F, U>(self, f: F) -> Transform<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Option<U>,
    {
        transform(self, f)
    }

    /// Label failures of this parser with `tag`
    fn report(self, tag: impl Into<String>) -> Report<Self>
    where
        Self: Sized,
    {
        report(tag, self)
    }

    fn boxed<'p>(self) -> BoxedParser<'p, 'a, Self::Output>
    where
        Self: Sized + Send + Sync + 'p,
    {
        Box::new(self)
    }
}

impl<'a, P: Parser<'a> + ?Sized> Parser<'a> for &P {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        (**self).parse(input)
    }
}

impl<'a, P: Parser<'a> + ?Sized> Parser<'a> for Box<P> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        (**self).parse(input)
    }
}

impl<'a, P: Parser<'a> + ?Sized> Parser<'a> for Arc<P> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        (**self).parse(input)
    }
}
