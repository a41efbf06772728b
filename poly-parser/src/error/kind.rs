use ariadne::Fmt;
use poly_attrs::ErrorKind;
use poly_error::{ErrorKind, EXPR};

/// A parenthesis was not closed, or a closing parenthesis has no matching opening parenthesis.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = [if *opening {
        "this parenthesis is not closed"
    } else {
        "this parenthesis was never opened"
    }],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = [format!("add an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyParenthesis;

/// Parentheses were nested deeper than the configured limit.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "parentheses are nested too deeply",
    labels = [format!("this group is nested more than {} levels deep", limit)],
    help = "simplify the expression, or raise `max_depth` in the parse options",
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth that was allowed.
    pub limit: usize,
}
