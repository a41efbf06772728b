//! Parsed and resolved expressions.

use crate::{
    binding::Bindings,
    error::Error,
    polynomial::Polynomial,
    resolve::resolve,
};
use log::debug;
use poly_parser::{options::ParseOptions, tree::ExpressionTree};
use std::{fmt, str::FromStr};

/// An expression that has been parsed and resolved into canonical form.
///
/// The parenthesis tree is only needed while resolving; afterwards, an [`Expression`] holds just
/// the resulting [`Polynomial`], and evaluation works on the polynomial alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    polynomial: Polynomial,
}

impl Expression {
    /// Parses and resolves the given expression with the default [`ParseOptions`].
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, ParseOptions::default())
    }

    /// Parses and resolves the given expression.
    pub fn parse_with(text: &str, options: ParseOptions) -> Result<Self, Error> {
        let tree = ExpressionTree::with_options(text, options)?;
        let polynomial = resolve(&tree)?;
        debug!("resolved `{}` ({} nodes) to `{}`", text, tree.len(), polynomial);
        Ok(Self { polynomial })
    }

    /// Returns the canonical polynomial of the expression.
    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// Consumes the expression, returning its polynomial.
    pub fn into_polynomial(self) -> Polynomial {
        self.polynomial
    }

    /// Returns the canonical text of the expression.
    pub fn render(&self) -> String {
        self.polynomial.to_string()
    }

    /// Parses the given bindings, such as `a=5,b=3`, and evaluates the expression with them.
    pub fn evaluate(&self, bindings: &str) -> Result<Polynomial, Error> {
        let bindings = bindings.parse::<Bindings>()?;
        Ok(self.evaluate_with(&bindings))
    }

    /// Evaluates the expression with the given bindings. Unbound variables remain symbolic.
    pub fn evaluate_with(&self, bindings: &Bindings) -> Polynomial {
        let value = self.polynomial.evaluate(bindings);
        debug!("evaluated `{}` with {} binding(s) to `{}`", self.polynomial, bindings.len(), value);
        value
    }
}

impl From<Polynomial> for Expression {
    fn from(polynomial: Polynomial) -> Self {
        Self { polynomial: polynomial.reduced() }
    }
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.polynomial)
    }
}
