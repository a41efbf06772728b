//! Canonical polynomial algebra over integer expressions.
//!
//! Expressions are written with integer constants, single-letter variables, `+`, `-`, `*` and
//! parentheses. Parsing an expression builds its parenthesis tree with `poly-parser`, then
//! resolves the tree bottom-up into a [`Polynomial`] in canonical form: terms sorted by a fixed
//! [ordering](order), like terms merged, zero terms removed. Any subset of the variables can then
//! be bound to integers to evaluate the polynomial; unbound variables remain symbolic.
//!
//! ```
//! use poly_algebra::parse;
//!
//! let expr = parse("4-x+y-(3+x-y)").unwrap();
//! assert_eq!(expr.render(), "-2x+2y+1");
//!
//! let value = expr.evaluate("x=2").unwrap();
//! assert_eq!(value.to_string(), "2y-3");
//! ```
//!
//! All integers are arbitrary precision. Exponents are at most [`term::MAX_EXPONENT`].

pub mod binding;
pub mod error;
pub mod expression;
mod flat;
pub mod order;
pub mod polynomial;
pub mod primitive;
pub mod resolve;
pub mod term;

pub use binding::Bindings;
pub use error::Error;
pub use expression::Expression;
pub use polynomial::Polynomial;
pub use term::Term;

/// Parses and resolves the given expression with the default options.
pub fn parse(text: &str) -> Result<Expression, Error> {
    Expression::parse(text)
}
