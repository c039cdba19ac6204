//! Declarative patterns with named captures
//!
//! A [`Pattern`] is a tree of three kinds of node:
//!
//! * [`node_fn`] matches one node and yields a value,
//! * [`capture`] binds the value of an inner pattern to a field name,
//! * [`sequence`] matches two patterns one after another and merges their
//!   captured fields into a single record.
//!
//! An uncaptured [`node_fn`] inside a sequence is still required to match,
//! but its value is not part of the merged record: it acts as a structural
//! guard. Every pattern knows which field names it contributes, so binding
//! the same name twice in one sequence is rejected when the pattern is built.
//!
//! Matched records are `serde_json` values; [`Pattern::typed`] turns them
//! into any `Deserialize` type.
//!
//! ```
//! use folio_core::node::{element, text, Document};
//! use folio_core::parser::Parser;
//! use folio_core::pattern::{attribute, capture, element_text, sequence};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Link {
//!     label: String,
//!     href: String,
//! }
//!
//! let doc = Document::from_markup([
//!     element("label").child(text("Chapter 1")),
//!     element("content").attr("src", "ch1.xhtml"),
//! ]);
//! let link = sequence(
//!     capture("label", element_text("label")),
//!     capture("href", attribute("content", "src")),
//! )
//! .unwrap()
//! .typed::<Link>();
//!
//! let parsed = link.parse(doc.roots()).unwrap().value;
//! assert_eq!(parsed.label, "Chapter 1");
//! assert_eq!(parsed.href, "ch1.xhtml");
//! ```

use crate::error::PatternError;
use crate::node::NodeRef;
use crate::parser::{names_match, Cursor, FailReason, ParseResult, Parser, Success};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Field name to captured value
pub type Record = serde_json::Map<String, Value>;

type NodeFn = dyn for<'n> Fn(NodeRef<'n>) -> Result<Option<Value>, String> + Send + Sync;

/// A composable, reusable pattern over sibling nodes
#[derive(Clone)]
pub struct Pattern {
    kind: PatternKind,
    captures: BTreeSet<String>,
}

#[derive(Clone)]
enum PatternKind {
    Node(Arc<NodeFn>),
    Capture { name: String, inner: Box<Pattern> },
    Sequence { first: Box<Pattern>, second: Box<Pattern> },
}

/// Result of one match before it is exposed as a plain value
enum Matched {
    Value(Value),
    Record(Record),
}

impl Matched {
    fn into_value(self) -> Value {
        match self {
            Matched::Value(value) => value,
            Matched::Record(record) => Value::Object(record),
        }
    }

    /// What this match adds to an enclosing sequence
    fn into_contribution(self) -> Record {
        match self {
            Matched::Value(_) => Record::new(),
            Matched::Record(record) => record,
        }
    }
}

/// Match one node with `f`; `None` means no match
pub fn node_fn<F, T>(f: F) -> Pattern
where
    F: for<'n> Fn(NodeRef<'n>) -> Option<T> + Send + Sync + 'static,
    T: Serialize,
{
    let f = move |node: NodeRef<'_>| match f(node) {
        Some(value) => serde_json::to_value(value)
            .map(Some)
            .map_err(|e| format!("matched value is not representable: {}", e)),
        None => Ok(None),
    };
    Pattern {
        kind: PatternKind::Node(Arc::new(f)),
        captures: BTreeSet::new(),
    }
}

/// Bind the match of `inner` to the field `name`
pub fn capture(name: impl Into<String>, inner: Pattern) -> Pattern {
    let name = name.into();
    Pattern {
        captures: BTreeSet::from([name.clone()]),
        kind: PatternKind::Capture {
            name,
            inner: Box::new(inner),
        },
    }
}

/// Match `first`, then `second` on the remainder, merging their captures
///
/// Fails with [`PatternError::DuplicateCapture`] if both halves bind the
/// same field name.
pub fn sequence(first: Pattern, second: Pattern) -> Result<Pattern, PatternError> {
    if let Some(name) = first.captures.intersection(&second.captures).next() {
        return Err(PatternError::DuplicateCapture(name.clone()));
    }
    Ok(sequence_overriding(first, second))
}

/// Like [`sequence`], but a field bound by both halves takes the value from
/// `second`
pub fn sequence_overriding(first: Pattern, second: Pattern) -> Pattern {
    let captures = first.captures.union(&second.captures).cloned().collect();
    Pattern {
        kind: PatternKind::Sequence {
            first: Box::new(first),
            second: Box::new(second),
        },
        captures,
    }
}

/// Chain several patterns with [`sequence`], nesting to the right
pub fn sequence_all(patterns: impl IntoIterator<Item = Pattern>) -> Result<Pattern, PatternError> {
    let mut patterns: Vec<Pattern> = patterns.into_iter().collect();
    let mut acc = patterns.pop().ok_or(PatternError::EmptySequence)?;
    while let Some(pattern) = patterns.pop() {
        acc = sequence(pattern, acc)?;
    }
    Ok(acc)
}

/// An element with the given name (case-insensitive); yields the name
pub fn element(name: impl Into<String>) -> Pattern {
    let expected = name.into();
    node_fn(move |node| {
        node.name()
            .filter(|actual| names_match(actual, &expected))
            .map(str::to_string)
    })
}

/// Any text node; yields its text
pub fn text() -> Pattern {
    node_fn(|node| node.text().map(str::to_string))
}

/// An element with the given name; yields its trimmed text content
pub fn element_text(name: impl Into<String>) -> Pattern {
    let expected = name.into();
    node_fn(move |node| {
        node.name()
            .filter(|actual| names_match(actual, &expected))
            .map(|_| node.text_content().trim().to_string())
    })
}

/// An element with the given name carrying `attr`; yields the attribute value
pub fn attribute(name: impl Into<String>, attr: impl Into<String>) -> Pattern {
    let expected = name.into();
    let attr = attr.into();
    node_fn(move |node| {
        node.name()
            .filter(|actual| names_match(actual, &expected))
            .and_then(|_| node.attribute(&attr))
            .map(str::to_string)
    })
}

impl Pattern {
    /// Field names this pattern contributes to an enclosing sequence
    pub fn captures(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(String::as_str)
    }

    /// Match against `input`, yielding the plain value of a bare node
    /// function or the record of captured fields
    pub fn match_nodes<'a>(&self, input: Cursor<'a>) -> ParseResult<'a, Value> {
        self.run(input).map(|success| success.map(Matched::into_value))
    }

    fn run<'a>(&self, input: Cursor<'a>) -> ParseResult<'a, Matched> {
        match &self.kind {
            PatternKind::Node(f) => {
                let (head, tail) = input.split_first().ok_or_else(FailReason::empty_input)?;
                match (**f)(head) {
                    Ok(Some(value)) => Ok(Success::new(Matched::Value(value), tail)),
                    Ok(None) => Err(FailReason::single("predicate rejected value")),
                    Err(message) => Err(FailReason::single(message)),
                }
            }
            PatternKind::Capture { name, inner } => {
                let Success { value, next } = inner.run(input)?;
                let mut record = Record::new();
                record.insert(name.clone(), value.into_value());
                Ok(Success::new(Matched::Record(record), next))
            }
            PatternKind::Sequence { first, second } => {
                let first = first.run(input)?;
                let second = second.run(first.next)?;
                let mut merged = first.value.into_contribution();
                merged.extend(second.value.into_contribution());
                Ok(Success::new(Matched::Record(merged), second.next))
            }
        }
    }

    /// Deserialize matched records into `T`
    pub fn typed<T: DeserializeOwned>(self) -> Typed<T> {
        Typed {
            pattern: self,
            _marker: PhantomData,
        }
    }
}

impl<'a> Parser<'a> for Pattern {
    type Output = Value;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        self.match_nodes(input)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PatternKind::Node(_) => f.write_str("NodeFn"),
            PatternKind::Capture { name, inner } => {
                f.debug_tuple("Capture").field(name).field(inner).finish()
            }
            PatternKind::Sequence { first, second } => {
                f.debug_tuple("Sequence").field(first).field(second).finish()
            }
        }
    }
}

/// A pattern whose record is deserialized into `T`
pub struct Typed<T> {
    pattern: Pattern,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Typed").field(&self.pattern).finish()
    }
}

impl<'a, T: DeserializeOwned> Parser<'a> for Typed<T> {
    type Output = T;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let Success { value, next } = self.pattern.match_nodes(input)?;
        serde_json::from_value(value)
            .map(|typed| Success::new(typed, next))
            .map_err(|e| {
                FailReason::single(format!(
                    "captured record does not fit {}: {}",
                    std::any::type_name::<T>(),
                    e
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{comment, element as el, text as txt, Document};
    use crate::parser::choice;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_bare_node_fn_yields_raw_value() {
        let doc = Document::from_markup([txt("hello")]);
        let result = text().match_nodes(doc.roots()).unwrap();
        assert_eq!(result.value, json!("hello"));
        assert!(result.next.is_empty());
    }

    #[test]
    fn test_capture_wraps_value() {
        let doc = Document::from_markup([txt("hello")]);
        let result = capture("greeting", text()).match_nodes(doc.roots()).unwrap();
        assert_eq!(result.value, json!({ "greeting": "hello" }));
    }

    #[test]
    fn test_uncaptured_nodes_are_guards() {
        let doc = Document::from_markup([el("h1"), txt("Title"), el("hr")]);
        let pattern = sequence_all([
            element("h1"),
            capture("title", text()),
            node_fn(|n| n.name().map(|_| 42)),
        ])
        .unwrap();

        let result = pattern.match_nodes(doc.roots()).unwrap();
        assert_eq!(result.value, json!({ "title": "Title" }));

        let doc = Document::from_markup([el("h2"), txt("Title"), el("hr")]);
        assert!(pattern.match_nodes(doc.roots()).is_err());
    }

    #[test]
    fn test_nested_sequences_merge_flat() {
        let doc = Document::from_markup([txt("a"), txt("b"), txt("c")]);
        let inner = sequence(capture("second", text()), capture("third", text())).unwrap();
        let pattern = sequence(capture("first", text()), inner).unwrap();

        let result = pattern.match_nodes(doc.roots()).unwrap();
        assert_eq!(
            result.value,
            json!({ "first": "a", "second": "b", "third": "c" })
        );
        let names: Vec<_> = pattern.captures().collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_captured_sequence_nests() {
        let doc = Document::from_markup([txt("a"), txt("b")]);
        let pair = sequence(capture("x", text()), capture("y", text())).unwrap();
        let pattern = capture("pair", pair);

        let result = pattern.match_nodes(doc.roots()).unwrap();
        assert_eq!(result.value, json!({ "pair": { "x": "a", "y": "b" } }));
        assert_eq!(pattern.captures().collect::<Vec<_>>(), vec!["pair"]);
    }

    #[test]
    fn test_duplicate_capture_is_rejected() {
        let err = sequence(capture("x", text()), capture("x", text())).unwrap_err();
        assert_eq!(err, PatternError::DuplicateCapture("x".to_string()));

        let deep = sequence(capture("y", text()), capture("x", text())).unwrap();
        let err = sequence(capture("x", text()), deep).unwrap_err();
        assert_eq!(err, PatternError::DuplicateCapture("x".to_string()));
    }

    #[test]
    fn test_overriding_sequence_second_wins() {
        let doc = Document::from_markup([txt("A"), txt("B")]);
        let pattern = sequence_overriding(capture("x", text()), capture("x", text()));
        let result = pattern.match_nodes(doc.roots()).unwrap();
        assert_eq!(result.value, json!({ "x": "B" }));
    }

    #[test]
    fn test_failure_propagates() {
        let doc = Document::from_markup([txt("a")]);
        let pattern = sequence(capture("x", text()), capture("y", text())).unwrap();
        assert_eq!(
            pattern.match_nodes(doc.roots()).unwrap_err(),
            FailReason::empty_input()
        );
    }

    #[test]
    fn test_alternation_through_choice() {
        let doc = Document::from_markup([comment("marker")]);
        let as_text = capture("text", text());
        let as_comment = capture("comment", node_fn(|n| n.comment().map(str::to_string)));

        let result = choice((as_text, as_comment)).parse(doc.roots()).unwrap();
        assert_eq!(result.value, json!({ "comment": "marker" }));
    }

    #[test]
    fn test_typed_deserialization() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Entry {
            label: String,
            order: u32,
        }

        let doc = Document::from_markup([
            el("navLabel").child(txt(" Preface ")),
            el("meta").attr("playOrder", "3"),
        ]);
        let entry = sequence(
            capture("label", element_text("navlabel")),
            capture(
                "order",
                node_fn(|n| n.attribute("playOrder").and_then(|v| v.parse::<u32>().ok())),
            ),
        )
        .unwrap()
        .typed::<Entry>();

        let result = entry.parse(doc.roots()).unwrap();
        assert_eq!(
            result.value,
            Entry {
                label: "Preface".to_string(),
                order: 3
            }
        );

        let wrong = capture("label", text()).typed::<Entry>();
        let doc = Document::from_markup([txt("x")]);
        let err = wrong.parse(doc.roots()).unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }
}
