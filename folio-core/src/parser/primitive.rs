//! Single-node matchers
//!
//! Every matcher here looks at the head of the cursor only and, on success,
//! consumes exactly that one node.

use super::{Cursor, FailReason, ParseResult, Parser, Success};
use crate::node::{Attributes, NodeRef, NodeType};

fn match_head<'a, T>(
    input: Cursor<'a>,
    check: impl FnOnce(NodeRef<'a>) -> Result<T, FailReason>,
) -> ParseResult<'a, T> {
    let (head, tail) = input.split_first().ok_or_else(FailReason::empty_input)?;
    check(head).map(|value| Success::new(value, tail))
}

/// Case-insensitive element name comparison
pub(crate) fn names_match(actual: &str, expected: &str) -> bool {
    actual.eq_ignore_ascii_case(expected) || actual.to_lowercase() == expected.to_lowercase()
}

/// Matches any node
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeAny;

pub fn node_any() -> NodeAny {
    NodeAny
}

impl<'a> Parser<'a> for NodeAny {
    type Output = NodeRef<'a>;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        match_head(input, Ok)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NodeOfType {
    node_type: NodeType,
}

/// Matches a node whose variant is `node_type`
pub fn node_of_type(node_type: NodeType) -> NodeOfType {
    NodeOfType { node_type }
}

impl<'a> Parser<'a> for NodeOfType {
    type Output = NodeRef<'a>;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        match_head(input, |node| {
            if node.node_type() == self.node_type {
                Ok(node)
            } else {
                Err(FailReason::single(format!(
                    "expected {} node, found {:?}",
                    self.node_type, node
                )))
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct ElementNamed {
    name: String,
}

/// Matches an element by name, ignoring case
pub fn element_named(name: impl Into<String>) -> ElementNamed {
    ElementNamed { name: name.into() }
}

impl ElementNamed {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, node: &NodeRef<'_>) -> bool {
        node.name()
            .map(|actual| names_match(actual, &self.name))
            .unwrap_or(false)
    }
}

impl<'a> Parser<'a> for ElementNamed {
    type Output = NodeRef<'a>;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        match_head(input, |node| {
            if self.matches(&node) {
                Ok(node)
            } else {
                Err(FailReason::single(format!(
                    "expected <{}>, found {:?}",
                    self.name, node
                )))
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct ElementWithAttributes {
    expected: Attributes,
}

/// Matches an element carrying the given attribute values
///
/// Keys whose expected value is empty are wildcards: they match any value,
/// and also an element that lacks the attribute altogether.
pub fn element_with_attributes<I, K, V>(attrs: I) -> ElementWithAttributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    ElementWithAttributes {
        expected: attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
    }
}

impl ElementWithAttributes {
    pub fn matches(&self, node: &NodeRef<'_>) -> bool {
        let Some(actual) = node.attributes() else {
            return false;
        };
        self.expected
            .iter()
            .all(|(key, value)| value.is_empty() || actual.get(key) == Some(value))
    }
}

impl<'a> Parser<'a> for ElementWithAttributes {
    type Output = NodeRef<'a>;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        match_head(input, |node| {
            if self.matches(&node) {
                Ok(node)
            } else {
                Err(FailReason::single(format!(
                    "attributes {:?} not satisfied by {:?}",
                    self.expected, node
                )))
            }
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextSatisfying<F> {
    f: F,
}

/// Matches a text node for which `f` yields a value
pub fn text_satisfying<F, T>(f: F) -> TextSatisfying<F>
where
    F: Fn(&str) -> Option<T>,
{
    TextSatisfying { f }
}

impl<'a, F, T> Parser<'a> for TextSatisfying<F>
where
    F: Fn(&str) -> Option<T>,
{
    type Output = T;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        match_head(input, |node| match node.text() {
            Some(text) => {
                (self.f)(text).ok_or_else(|| FailReason::single("predicate rejected value"))
            }
            None => Err(FailReason::single(format!(
                "expected text node, found {:?}",
                node
            ))),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CommentEquals {
    content: String,
}

/// Matches a comment whose content is exactly `content`
pub fn comment_equals(content: impl Into<String>) -> CommentEquals {
    CommentEquals {
        content: content.into(),
    }
}

impl<'a> Parser<'a> for CommentEquals {
    type Output = NodeRef<'a>;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        match_head(input, |node| match node.comment() {
            Some(content) if content == self.content => Ok(node),
            _ => Err(FailReason::single(format!(
                "expected comment {:?}, found {:?}",
                self.content, node
            ))),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FirstNode<F> {
    f: F,
}

/// General single-node matcher: succeeds when `f` returns `Some`
pub fn first_node<F, T>(f: F) -> FirstNode<F>
where
    F: for<'n> Fn(NodeRef<'n>) -> Option<T>,
{
    FirstNode { f }
}

impl<'a, F, T> Parser<'a> for FirstNode<F>
where
    F: Fn(NodeRef<'a>) -> Option<T>,
{
    type Output = T;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        match_head(input, |node| {
            (self.f)(node).ok_or_else(|| FailReason::single("predicate rejected value"))
        })
    }
}
