//! Addressing nested markup by a path of element names

use super::{
    and, element_named, into_children, negate, report, seq, skip_to_first, zero_or_more, Cursor,
    ElementNamed, ParseResult, Parser,
};

#[derive(Debug, Clone)]
pub struct DescendPath<P> {
    levels: Vec<ElementNamed>,
    terminal: P,
}

/// Descend one level per name, then run `terminal` on the children reached
///
/// At each level the cursor is scanned for the first element with that name
/// (case-insensitive) whose children the rest of the path accepts. A sibling
/// of the right name whose subtree fails is passed over in favour of a later
/// one. When no sibling works the level fails with a reason tagged
/// `path element '<name>'`, wrapping the failure of the first sibling with
/// that name, and `terminal` is never run.
///
/// `descend_path(["a", "b"], t)` on `<a><b><c/></b></a>` runs `t` on `[<c/>]`.
pub fn descend_path<I, S, P>(names: I, terminal: P) -> DescendPath<P>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    DescendPath {
        levels: names.into_iter().map(element_named).collect(),
        terminal,
    }
}

impl<P> DescendPath<P> {
    fn descend<'a>(&self, levels: &[ElementNamed], input: Cursor<'a>) -> ParseResult<'a, P::Output>
    where
        P: Parser<'a>,
    {
        let Some((level, deeper)) = levels.split_first() else {
            return self.terminal.parse(input);
        };
        let step = PathStep {
            level,
            rest: PathRest { path: self, deeper },
        };
        report(format!("path element '{}'", level.name()), step).parse(input)
    }
}

impl<'a, P: Parser<'a>> Parser<'a> for DescendPath<P> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        self.descend(&self.levels, input)
    }
}

/// The remainder of a path, run on the children of the level just matched
struct PathRest<'p, P> {
    path: &'p DescendPath<P>,
    deeper: &'p [ElementNamed],
}

impl<'a, P: Parser<'a>> Parser<'a> for PathRest<'_, P> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        self.path.descend(self.deeper, input)
    }
}

/// One level of a path: the first sibling named `level` that `rest` accepts
struct PathStep<'p, P> {
    level: &'p ElementNamed,
    rest: PathRest<'p, P>,
}

impl<'a, P: Parser<'a>> Parser<'a> for PathStep<'_, P> {
    type Output = P::Output;

    fn parse(&self, input: Cursor<'a>) -> ParseResult<'a, Self::Output> {
        let enter = and((self.level, into_children(&self.rest)));
        skip_to_first(&enter)
            .parse(input)
            .or_else(|_| {
                // Explain the failure through the first sibling with this name
                seq((zero_or_more(negate(self.level)), &enter))
                    .parse(input)
                    .map(|success| success.map(|(_, entered)| entered))
            })
            .map(|success| success.map(|(_, value)| value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{element, text, Document};
    use crate::parser::{node_any, text_satisfying, zero_or_more};

    #[test]
    fn test_descends_by_name() {
        let doc = Document::from_markup([element("a").child(element("b").child(element("c")))]);
        let parser = descend_path(["a", "b"], zero_or_more(node_any()));

        let result = parser.parse(doc.roots()).unwrap();
        let names: Vec<_> = result.value.iter().filter_map(|n| n.name()).collect();
        assert_eq!(names, vec!["c"]);
        assert!(result.next.is_empty());
    }

    #[test]
    fn test_skips_unrelated_siblings_at_each_level() {
        let doc = Document::from_markup([
            text("\n"),
            element("HTML").children([
                element("head"),
                element("Body").child(text("content")),
            ]),
        ]);
        let parser = descend_path(["html", "body"], text_satisfying(|t| Some(t.to_string())));
        assert_eq!(parser.parse(doc.roots()).unwrap().value, "content");
    }

    #[test]
    fn test_missing_level_names_it() {
        let doc = Document::from_markup([element("a").child(element("x"))]);
        let parser = descend_path(["a", "b"], node_any());

        let err = parser.parse(doc.roots()).unwrap_err();
        assert_eq!(
            err.breadcrumbs(),
            vec!["path element 'a'", "path element 'b'"]
        );
    }

    #[test]
    fn test_backtracks_to_later_sibling_with_same_name() {
        let doc = Document::from_markup([
            element("a").child(element("x")),
            element("a").child(element("b").child(element("c"))),
        ]);
        let parser = descend_path(["a", "b"], zero_or_more(node_any()));

        let result = parser.parse(doc.roots()).unwrap();
        let names: Vec<_> = result.value.iter().filter_map(|n| n.name()).collect();
        assert_eq!(names, vec!["c"]);
    }

    #[test]
    fn test_failure_follows_first_sibling_with_name() {
        let doc = Document::from_markup([
            element("a").child(element("x")),
            element("a").child(element("y")),
        ]);
        let parser = descend_path(["a", "b"], node_any());

        let err = parser.parse(doc.roots()).unwrap_err();
        assert_eq!(
            err.breadcrumbs(),
            vec!["path element 'a'", "path element 'b'"]
        );
    }

    #[test]
    fn test_empty_path_runs_terminal_directly() {
        let doc = Document::from_markup([element("a")]);
        let parser = descend_path(Vec::<String>::new(), node_any());
        assert_eq!(parser.parse(doc.roots()).unwrap().value.name(), Some("a"));
    }
}
