//! Moving between tree levels and scanning across siblings

use super::{
    and, element_named, negate, report, seq, zero_or_more, Cursor, ElementNamed, FailReason,
    ParseResult, Parser, Success,
};

#[derive(Debug, Clone, Copy)]
pub struct IntoChildren<P> {
    parser: P,
}

/// Run `parser` on the children of the head element
///
/// The inner run starts from a fresh cursor over all the children. On success
/// the outer cursor advances past the element itself.
pub fn into_children<P>(parser: P) -> IntoChildren<P> {
    IntoChildren { parser }
}

impl<'a, P: Parser<'a>> Parser<'a> for IntoChildren<P> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let (head, tail) = input.split_first().ok_or_else(FailReason::empty_input)?;
        if !head.is_element() || !head.has_children() {
            return Err(FailReason::single(format!(
                "expected element with children, found {:?}",
                head
            )));
        }
        let inner = self.parser.parse(head.children())?;
        Ok(Success::new(inner.value, tail))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToParent<P> {
    parser: P,
}

/// Run `parser` on a one-node cursor holding the head's parent
pub fn to_parent<P>(parser: P) -> ToParent<P> {
    ToParent { parser }
}

impl<'a, P: Parser<'a>> Parser<'a> for ToParent<P> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let (head, tail) = input.split_first().ok_or_else(FailReason::empty_input)?;
        let parent = head
            .parent_cursor()
            .ok_or_else(|| FailReason::single(format!("{:?} has no parent", head)))?;
        let inner = self.parser.parse(parent)?;
        Ok(Success::new(inner.value, tail))
    }
}

#[derive(Debug, Clone)]
pub struct ElementWithChildren<P> {
    name: ElementNamed,
    parser: P,
}

/// Match an element by name and run `parser` on its children
pub fn element_with_children<P>(name: impl Into<String>, parser: P) -> ElementWithChildren<P> {
    ElementWithChildren {
        name: element_named(name),
        parser,
    }
}

impl<'a, P: Parser<'a>> Parser<'a> for ElementWithChildren<P> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        and((&self.name, into_children(&self.parser)))
            .parse(input)
            .map(|success| success.map(|(_, value)| value))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SkipToFirst<P> {
    parser: P,
}

/// Skip siblings until `parser` matches, yielding its value and position
pub fn skip_to_first<P>(parser: P) -> SkipToFirst<P> {
    SkipToFirst { parser }
}

impl<'a, P: Parser<'a>> Parser<'a> for SkipToFirst<P> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        seq((zero_or_more(negate(&self.parser)), &self.parser))
            .parse(input)
            .map(|success| success.map(|(_, value)| value))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Between<L, R, I> {
    left: L,
    right: R,
    inside: I,
}

/// Run `inside` on exactly the siblings strictly between two delimiters
///
/// Scans forward to the first `left`, then to the first `right` after it.
/// The outer cursor resumes after `right`.
pub fn between<L, R, I>(left: L, right: R, inside: I) -> Between<L, R, I> {
    Between {
        left,
        right,
        inside,
    }
}

impl<'a, L, R, I> Parser<'a> for Between<L, R, I>
where
    L: Parser<'a>,
    R: Parser<'a>,
    I: Parser<'a>,
{
    type Output = I::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let opened = report("opening delimiter", skip_to_first(&self.left)).parse(input)?;
        let scanned = zero_or_more(negate(&self.right)).parse(opened.next)?;
        let closed = report("closing delimiter", &self.right).parse(scanned.next)?;

        let span = opened.next.consumed_until(scanned.next);
        let inner = self.inside.parse(span)?;
        Ok(Success::new(inner.value, closed.next))
    }
}
