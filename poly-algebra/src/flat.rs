//! Parsing of flat expressions, with no parentheses, into a raw sum of terms.
//!
//! A flat expression is a run of monomials separated by `+`, `-` and `*`. Multiplication is
//! resolved here: the terms on either side of each `*` are multiplied into a single term. Signs
//! are attached to the term that follows them, and `+` only separates terms. Nothing is added or
//! subtracted at this level; the result is a list of signed terms for [`Polynomial::reduce`] (or
//! the caller) to combine.

use crate::{
    error::{kind, Error},
    polynomial::Polynomial,
    term::{exponent_too_large, Term},
};
use poly_parser::tokenizer::{Token, TokenKind};

/// A piece of a flat expression.
#[derive(Debug)]
pub(crate) enum Piece<'a, 'source> {
    /// One of `+`, `-` or `*`.
    Operator(&'a Token<'source>),

    /// The tokens making up a single monomial, such as `4`, `a`, `2` for `4a2`.
    Monomial(Vec<&'a Token<'source>>),
}

/// Splits the given non-whitespace tokens on operators, grouping the tokens in between into
/// monomials.
pub(crate) fn split_pieces<'a, 'source>(tokens: &[&'a Token<'source>]) -> Vec<Piece<'a, 'source>> {
    let mut pieces = Vec::new();
    let mut current = Vec::new();

    for &token in tokens {
        if token.is_operator() {
            if !current.is_empty() {
                pieces.push(Piece::Monomial(std::mem::take(&mut current)));
            }
            pieces.push(Piece::Operator(token));
        } else {
            current.push(token);
        }
    }

    if !current.is_empty() {
        pieces.push(Piece::Monomial(current));
    }

    pieces
}

/// Returns the character of the given operator token.
pub(crate) fn operator_char(token: &Token) -> char {
    match token.kind {
        TokenKind::Add => '+',
        TokenKind::Sub => '-',
        _ => '*',
    }
}

/// Creates a [`kind::MissingOperand`] error pointing at the given operator.
pub(crate) fn missing_operand(token: &Token) -> Error {
    Error::new(
        vec![token.span.clone()],
        kind::MissingOperand { operator: operator_char(token) },
    )
}

/// Parses the given non-whitespace tokens, which must not contain parentheses, into a raw
/// [`Polynomial`]: one signed term per summand, products already multiplied out, not sorted and
/// not reduced.
///
/// A `+` or `-` at the start, or directly after another operator, is a sign on the next term. An
/// empty token list is the zero polynomial.
pub(crate) fn parse_flat(tokens: &[&Token]) -> Result<Polynomial, Error> {
    let mut terms: Vec<Term> = Vec::new();

    // whether the next piece must be a term
    let mut expect_term = true;
    let mut negative = false;
    let mut pending: Option<&Token> = None;

    for piece in split_pieces(tokens) {
        match piece {
            Piece::Monomial(monomial) => {
                let mut term = Term::from_tokens(&monomial)?;
                if negative {
                    term = -term;
                }

                match pending.take() {
                    Some(op) if op.kind == TokenKind::Mul => {
                        let lhs = terms.pop().ok_or_else(|| missing_operand(op))?;
                        let product = lhs
                            .checked_mul(&term)
                            .ok_or_else(|| exponent_too_large(op.span.clone()))?;
                        terms.push(product);
                    },
                    _ => terms.push(term),
                }

                expect_term = false;
                negative = false;
            },
            Piece::Operator(op) => match op.kind {
                TokenKind::Mul => {
                    if expect_term {
                        return Err(missing_operand(op));
                    }
                    pending = Some(op);
                    expect_term = true;
                },
                _ => {
                    if op.kind == TokenKind::Sub {
                        negative = !negative;
                    }
                    if !expect_term {
                        pending = Some(op);
                        expect_term = true;
                    }
                },
            },
        }
    }

    if expect_term {
        if let Some(op) = pending.or_else(|| tokens.last().copied().filter(|token| token.is_operator())) {
            return Err(missing_operand(op));
        }
    }

    if terms.is_empty() {
        terms.push(Term::zero());
    }

    Ok(Polynomial::raw(terms))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use poly_parser::tokenizer::tokenize_significant;
    use super::*;

    fn flat(s: &str) -> Result<Vec<String>, Error> {
        let tokens = tokenize_significant(s);
        let tokens = tokens.iter().collect::<Vec<_>>();
        let poly = parse_flat(&tokens)?;
        Ok(poly.terms().iter().map(ToString::to_string).collect())
    }

    #[test]
    fn signs_stay_on_terms() {
        assert_eq!(flat("a+4-b+10+c").unwrap(), vec!["a", "4", "-b", "10", "c"]);
        assert_eq!(flat("z+x-x+y+y").unwrap(), vec!["z", "x", "-x", "y", "y"]);
    }

    #[test]
    fn multiplication_binds_first() {
        assert_eq!(flat("a*b*x+a*b*y").unwrap(), vec!["abx", "aby"]);
        assert_eq!(flat("2-3*a*a").unwrap(), vec!["2", "-3a2"]);
        assert_eq!(flat("-x*-1").unwrap(), vec!["x"]);
    }

    #[test]
    fn unary_signs() {
        assert_eq!(flat("-5").unwrap(), vec!["-5"]);
        assert_eq!(flat("+a").unwrap(), vec!["a"]);
        assert_eq!(flat("a--b").unwrap(), vec!["a", "b"]);
        assert_eq!(flat("a*-b").unwrap(), vec!["-ab"]);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(flat("").unwrap(), vec!["0"]);
    }

    #[test]
    fn missing_operands() {
        let err = flat("a+").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::MissingOperand>(),
            Some(&kind::MissingOperand { operator: '+' }),
        );
        assert_eq!(err.spans, vec![1..2]);

        let err = flat("*a").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::MissingOperand>(),
            Some(&kind::MissingOperand { operator: '*' }),
        );

        assert!(flat("a+*b").unwrap_err().is::<kind::MissingOperand>());
        assert!(flat("a*").unwrap_err().is::<kind::MissingOperand>());
        assert!(flat("-").unwrap_err().is::<kind::MissingOperand>());
    }

    #[test]
    fn malformed_terms() {
        let err = flat("a+2/3").unwrap_err();
        assert!(err.is::<kind::MalformedTerm>());
        assert_eq!(err.spans, vec![3..4]);
    }

    #[test]
    fn products_past_the_exponent_limit() {
        let err = flat("a4294967295*a").unwrap_err();
        assert!(err.is::<kind::ExponentTooLarge>());
        assert_eq!(err.spans, vec![1..11]);

        let err = flat("2+a1000*a").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::ExponentTooLarge>(),
            Some(&kind::ExponentTooLarge { limit: 1000 }),
        );
        assert_eq!(err.spans, vec![7..8]);

        assert_eq!(flat("a999*a").unwrap(), vec!["a1000"]);
    }

    #[test]
    fn spaces_inside_a_monomial() {
        let err = flat("a 2").unwrap_err();
        assert!(err.is::<kind::MissingOperator>());
        assert_eq!(err.spans, vec![0..1, 2..3]);

        assert_eq!(flat("2a + 3 * b").unwrap(), vec!["2a", "3b"]);
    }
}
