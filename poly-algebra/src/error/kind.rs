use ariadne::Fmt;
use poly_attrs::ErrorKind;
use poly_error::{ErrorKind, EXPR};

/// A monomial contained something other than an optional sign, a coefficient, and variables
/// with optional exponents.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "malformed term",
    labels = [format!("I could not understand `{}` here", found)],
    help = format!(
        "terms look like {}, {} or {}: a coefficient followed by single-letter variables",
        "4".fg(EXPR),
        "-3a".fg(EXPR),
        "2a2b".fg(EXPR),
    ),
)]
pub struct MalformedTerm {
    /// The text that could not be understood.
    pub found: String,
}

/// An operator is missing one of its operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing operand for `{}`", operator),
    labels = [format!("I expected to see a {} next to this", "term".fg(EXPR))],
)]
pub struct MissingOperand {
    /// The operator that is missing an operand.
    pub operator: char,
}

/// Two values appear next to each other with no operator between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operator",
    labels = ["this value", "is followed by this value"],
    help = format!("implicit multiplication is not supported; add a {} between them", "`*`".fg(EXPR)),
)]
pub struct MissingOperator;

/// A binding was not of the form `name=integer`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "malformed binding",
    labels = [format!("I could not understand `{}` as a binding", entry)],
    help = format!(
        "bindings are comma-separated pairs of a single-letter name and an integer, like {}",
        "a=5,b=-3".fg(EXPR),
    ),
)]
pub struct MalformedBinding {
    /// The text of the entry that could not be understood.
    pub entry: String,
}

/// The same variable was bound more than once.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is bound more than once", name),
    labels = ["first bound here", "bound again here"],
    help = "remove one of the bindings",
)]
pub struct DuplicateBinding {
    /// The name of the variable.
    pub name: char,
}

/// A variable's exponent is larger than the supported maximum, either as written or after
/// multiplying terms together.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "exponent is too large",
    labels = [format!("this exponent is larger than {}", limit)],
    help = format!("exponents may be at most {}", limit.fg(EXPR)),
)]
pub struct ExponentTooLarge {
    /// The largest exponent allowed.
    pub limit: u32,
}
