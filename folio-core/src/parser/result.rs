//! Parse outcomes and structured failure reasons

use super::Cursor;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Outcome of running a parser against a cursor
pub type ParseResult<'a, T> = Result<Success<'a, T>, FailReason>;

/// A matched value and the unconsumed remainder of the input
#[derive(Debug, Clone, PartialEq)]
pub struct Success<'a, T> {
    pub value: T,
    pub next: Cursor<'a>,
}

impl<'a, T> Success<'a, T> {
    pub fn new(value: T, next: Cursor<'a>) -> Self {
        Self { value, next }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Success<'a, U> {
        Success {
            value: f(self.value),
            next: self.next,
        }
    }
}

/// Convenience constructor for a successful parse
pub fn success<T>(value: T, next: Cursor<'_>) -> ParseResult<'_, T> {
    Ok(Success::new(value, next))
}

/// Why a parser did not match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailReason {
    /// Leaf diagnostic
    #[error("{message}")]
    Single { message: String },

    /// Every alternative of a failed ordered choice, in order
    #[error("{}", display_compound(.reasons))]
    Compound { reasons: Vec<FailReason> },

    /// A caller-assigned label around an inner failure
    #[error("{label}: {reason}")]
    Tagged {
        label: String,
        reason: Box<FailReason>,
    },
}

fn display_compound(reasons: &[FailReason]) -> String {
    let parts: Vec<String> = reasons.iter().map(|r| format!("({})", r)).collect();
    format!("no alternative matched: {}", parts.join(" | "))
}

impl FailReason {
    pub fn single(message: impl Into<String>) -> Self {
        FailReason::Single {
            message: message.into(),
        }
    }

    pub fn compound(reasons: Vec<FailReason>) -> Self {
        FailReason::Compound { reasons }
    }

    pub fn tagged(label: impl Into<String>, reason: FailReason) -> Self {
        FailReason::Tagged {
            label: label.into(),
            reason: Box::new(reason),
        }
    }

    pub fn empty_input() -> Self {
        FailReason::single("empty input")
    }

    /// Labels from the outermost `Tagged` wrapper inwards, following the
    /// first branch through `Tagged` chains only
    pub fn breadcrumbs(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        let mut current = self;
        while let FailReason::Tagged { label, reason } = current {
            labels.push(label.as_str());
            current = reason;
        }
        labels
    }

    /// Whether `label` appears anywhere in this reason tree
    pub fn mentions(&self, label: &str) -> bool {
        match self {
            FailReason::Single { message } => message.contains(label),
            FailReason::Compound { reasons } => reasons.iter().any(|r| r.mentions(label)),
            FailReason::Tagged { label: tag, reason } => {
                tag.contains(label) || reason.mentions(label)
            }
        }
    }
}

/// Render a short human-readable description of what a cursor head was
pub(crate) fn describe_head(cursor: &Cursor<'_>) -> String {
    match cursor.head() {
        Some(node) => format!("{:?}", node),
        None => "end of input".to_string(),
    }
}

impl From<&str> for FailReason {
    fn from(message: &str) -> Self {
        FailReason::single(message)
    }
}

/// Wrapper that renders a reason as an indented tree, one reason per line
pub struct FailTree<'r>(pub &'r FailReason);

impl fmt::Display for FailTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_level(
            f: &mut fmt::Formatter<'_>,
            reason: &FailReason,
            depth: usize,
        ) -> fmt::Result {
            let indent = "  ".repeat(depth);
            match reason {
                FailReason::Single { message } => writeln!(f, "{}{}", indent, message),
                FailReason::Compound { reasons } => {
                    writeln!(f, "{}one of:", indent)?;
                    for r in reasons {
                        write_level(f, r, depth + 1)?;
                    }
                    Ok(())
                }
                FailReason::Tagged { label, reason } => {
                    writeln!(f, "{}in {}:", indent, label)?;
                    write_level(f, reason, depth + 1)
                }
            }
        }
        write_level(f, self.0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nests_labels() {
        let reason = FailReason::tagged(
            "outer",
            FailReason::compound(vec!["a".into(), FailReason::tagged("inner", "b".into())]),
        );
        assert_eq!(
            reason.to_string(),
            "outer: no alternative matched: (a) | (inner: b)"
        );
        assert_eq!(reason.breadcrumbs(), vec!["outer"]);
        assert!(reason.mentions("inner"));
        assert!(!reason.mentions("missing"));
    }

    #[test]
    fn test_fail_tree_rendering() {
        let reason = FailReason::tagged("path", FailReason::compound(vec!["x".into(), "y".into()]));
        assert_eq!(
            FailTree(&reason).to_string(),
            "in path:\n  one of:\n    x\n    y\n"
        );
    }
}
