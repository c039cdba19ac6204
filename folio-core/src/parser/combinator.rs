//! Combinators that build parsers out of parsers

use super::result::describe_head;
use super::{Cursor, FailReason, ParseResult, Parser, Success};
use std::borrow::Cow;

/// Run every parser against the same input; see [`and`]
#[derive(Debug, Clone, Copy)]
pub struct And<T> {
    parsers: T,
}

/// All parsers must succeed on the *same* starting cursor
///
/// Produces the tuple of their values; the remainder is the one returned by
/// the last parser. The first failure is returned as is.
pub fn and<T>(parsers: T) -> And<T> {
    And { parsers }
}

/// Run parsers one after another; see [`seq`]
#[derive(Debug, Clone, Copy)]
pub struct Seq<T> {
    parsers: T,
}

/// Each parser continues from where the previous one stopped
pub fn seq<T>(parsers: T) -> Seq<T> {
    Seq { parsers }
}

/// Ordered choice; see [`choice`]
#[derive(Debug, Clone)]
pub struct Choice<T> {
    parsers: T,
}

/// Try each alternative on the same input and commit to the first success
///
/// Accepts a tuple of parsers with a common output type, or a `Vec` of one
/// parser type. When every alternative fails the result is a
/// [`FailReason::Compound`] holding all their reasons in order.
pub fn choice<T>(parsers: T) -> Choice<T> {
    Choice { parsers }
}

macro_rules! impl_tuple_combinators {
    ($($p:ident $v:ident),+) => {
        impl<'a, $($p: Parser<'a>),+> Parser<'a> for And<($($p,)+)> {
            type Output = ($($p::Output,)+);

            fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
                let ($($v,)+) = &self.parsers;
                $(let $v = $v.parse(input)?;)+
                let remainders = [$($v.next),+];
                let next = remainders[remainders.len() - 1];
                Ok(Success::new(($($v.value,)+), next))
            }
        }

        impl<'a, $($p: Parser<'a>),+> Parser<'a> for Seq<($($p,)+)> {
            type Output = ($($p::Output,)+);

            fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
                let ($($v,)+) = &self.parsers;
                let next = input;
                $(let Success { value: $v, next } = $v.parse(next)?;)+
                Ok(Success::new(($($v,)+), next))
            }
        }

        impl<'a, Out, $($p: Parser<'a, Output = Out>),+> Parser<'a> for Choice<($($p,)+)> {
            type Output = Out;

            fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
                let ($($v,)+) = &self.parsers;
                let mut reasons = Vec::new();
                $(
                    match $v.parse(input) {
                        Ok(success) => return Ok(success),
                        Err(reason) => reasons.push(reason),
                    }
                )+
                Err(FailReason::compound(reasons))
            }
        }
    };
}

impl_tuple_combinators!(P1 p1);
impl_tuple_combinators!(P1 p1, P2 p2);
impl_tuple_combinators!(P1 p1, P2 p2, P3 p3);
impl_tuple_combinators!(P1 p1, P2 p2, P3 p3, P4 p4);
impl_tuple_combinators!(P1 p1, P2 p2, P3 p3, P4 p4, P5 p5);
impl_tuple_combinators!(P1 p1, P2 p2, P3 p3, P4 p4, P5 p5, P6 p6);

impl<'a, P: Parser<'a>> Parser<'a> for Choice<Vec<P>> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let mut reasons = Vec::with_capacity(self.parsers.len());
        for parser in &self.parsers {
            match parser.parse(input) {
                Ok(success) => return Ok(success),
                Err(reason) => reasons.push(reason),
            }
        }
        Err(FailReason::compound(reasons))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Negate<P> {
    parser: P,
}

/// Consume the head node if and only if `parser` fails at this position
///
/// Fails on empty input. Paired with [`zero_or_more`] this gives "scan until".
pub fn negate<P>(parser: P) -> Negate<P> {
    Negate { parser }
}

impl<'a, P: Parser<'a>> Parser<'a> for Negate<P> {
    type Output = crate::node::NodeRef<'a>;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let (head, tail) = input.split_first().ok_or_else(FailReason::empty_input)?;
        match self.parser.parse(input) {
            Ok(_) => Err(FailReason::single(format!(
                "negated parser matched {}",
                describe_head(&input)
            ))),
            Err(_) => Ok(Success::new(head, tail)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ZeroOrMore<P> {
    parser: P,
}

/// Apply `parser` repeatedly until it fails; never fails itself
///
/// `parser` must consume input whenever it succeeds. A success that consumes
/// nothing trips a debug assertion; release builds end the repetition there
/// and drop that value.
pub fn zero_or_more<P>(parser: P) -> ZeroOrMore<P> {
    ZeroOrMore { parser }
}

impl<'a, P: Parser<'a>> Parser<'a> for ZeroOrMore<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let mut values = Vec::new();
        let mut next = input;
        while let Ok(step) = self.parser.parse(next) {
            debug_assert!(
                step.next.len() < next.len(),
                "zero_or_more: parser succeeded without consuming input"
            );
            if step.next.len() >= next.len() {
                tracing::warn!("zero_or_more stopped on a zero-width match");
                break;
            }
            values.push(step.value);
            next = step.next;
        }
        Ok(Success::new(values, next))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OneOrMore<P> {
    inner: ZeroOrMore<P>,
}

/// Like [`zero_or_more`], but an empty result is a failure
pub fn one_or_more<P>(parser: P) -> OneOrMore<P> {
    OneOrMore {
        inner: zero_or_more(parser),
    }
}

impl<'a, P: Parser<'a>> Parser<'a> for OneOrMore<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        transform(&self.inner, |values: Vec<P::Output>| {
            (!values.is_empty()).then_some(values)
        })
        .with_reason("expected at least one match")
        .parse(input)
    }
}

#[derive(Debug, Clone)]
pub struct Transform<P, F> {
    parser: P,
    f: F,
    reason: Cow<'static, str>,
}

/// Project the value of `parser` through `f`, failing when `f` returns `None`
///
/// This lets one step act as both projection and validation.
pub fn transform<'a, P, F, U>(parser: P, f: F) -> Transform<P, F>
where
    P: Parser<'a>,
    F: Fn(P::Output) -> Option<U>,
{
    Transform {
        parser,
        f,
        reason: Cow::Borrowed("rejected by transform"),
    }
}

impl<P, F> Transform<P, F> {
    /// Use a custom failure message for rejected values
    pub fn with_reason(mut self, reason: impl Into<Cow<'static, str>>) -> Self {
        self.reason = reason.into();
        self
    }
}

impl<'a, P, F, U> Parser<'a> for Transform<P, F>
where
    P: Parser<'a>,
    F: Fn(P::Output) -> Option<U>,
{
    type Output = U;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let Success { value, next } = self.parser.parse(input)?;
        match (self.f)(value) {
            Some(value) => Ok(Success::new(value, next)),
            None => Err(FailReason::single(self.reason.clone())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Map<P, F> {
    parser: P,
    f: F,
}

/// Infallible projection of the value of `parser`
pub fn map<'a, P, F, U>(parser: P, f: F) -> Map<P, F>
where
    P: Parser<'a>,
    F: Fn(P::Output) -> U,
{
    Map { parser, f }
}

impl<'a, P, F, U> Parser<'a> for Map<P, F>
where
    P: Parser<'a>,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        self.parser
            .parse(input)
            .map(|success| success.map(&self.f))
    }
}

#[derive(Debug, Clone)]
pub struct Report<P> {
    label: String,
    parser: P,
}

/// Wrap failures of `parser` as [`FailReason::Tagged`] with `label`
///
/// Matching behaviour is unchanged; successes pass through untouched.
pub fn report<P>(label: impl Into<String>, parser: P) -> Report<P> {
    Report {
        label: label.into(),
        parser,
    }
}

impl<'a, P: Parser<'a>> Parser<'a> for Report<P> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        self.parser.parse(input).map_err(|reason| {
            tracing::trace!(label = %self.label, %reason, "tagged parser failed");
            FailReason::tagged(self.label.clone(), reason)
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FromFn<F> {
    f: F,
}

/// Wrap a plain function as a parser
pub fn from_fn<F, T>(f: F) -> FromFn<F>
where
    F: for<'a> Fn(Cursor<'a>) -> ParseResult<'a, T>,
{
    FromFn { f }
}

impl<'a, F, T> Parser<'a> for FromFn<F>
where
    F: Fn(Cursor<'a>) -> ParseResult<'a, T>,
{
    type Output = T;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        (self.f)(input)
    }
}
