//! Canonical sums of terms.

use crate::{
    binding::Bindings,
    error::Error,
    flat::parse_flat,
    order::sort_descending,
    term::{Term, MAX_EXPONENT},
};
use poly_parser::tokenizer::tokenize_significant;
use rug::Integer;
use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};

/// A sum of [`Term`]s.
///
/// Every operation on a [`Polynomial`] returns it in **canonical form**: terms sorted in
/// descending [canonical order](crate::order), no two terms with the same variables, no zero
/// terms, and at most one constant term, which comes last. The zero polynomial is a single zero
/// constant term.
///
/// The only non-canonical polynomials are the raw ones produced by [`Polynomial::raw`], by adding
/// or subtracting two [`Term`]s, and by [`FromStr`]; pass them through [`Polynomial::reduce`] to
/// make them canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polynomial {
    terms: Vec<Term>,
}

impl Polynomial {
    /// Creates a polynomial holding the given terms as-is, without sorting or reducing them.
    pub fn raw(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Creates the zero polynomial.
    pub fn zero() -> Self {
        Self { terms: vec![Term::zero()] }
    }

    /// Creates a constant polynomial.
    pub fn constant(value: impl Into<Integer>) -> Self {
        Self::from(Term::constant(value))
    }

    /// Brings the given terms into canonical form.
    ///
    /// The terms are sorted in descending canonical order, then scanned left to right, merging
    /// each pair of neighbors with the same variables. After a merge, the merged term is compared
    /// against its new right neighbor, so runs of any length collapse into one term. Finally,
    /// zero terms are removed; if nothing is left, the result is the zero polynomial.
    pub fn reduce(mut terms: Vec<Term>) -> Self {
        sort_descending(&mut terms);

        let mut idx = 0;
        while idx + 1 < terms.len() {
            match terms[idx].merge(&terms[idx + 1]) {
                Some(merged) => {
                    terms[idx] = merged;
                    terms.remove(idx + 1);
                },
                None => idx += 1,
            }
        }

        terms.retain(|term| !term.is_zero());
        if terms.is_empty() {
            Self::zero()
        } else {
            Self { terms }
        }
    }

    /// Returns this polynomial in canonical form.
    pub fn reduced(self) -> Self {
        Self::reduce(self.terms)
    }

    /// Returns the terms of this polynomial.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Consumes the polynomial, returning its terms.
    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    /// Returns the value of this polynomial if it is a single constant term.
    pub fn as_constant(&self) -> Option<&Integer> {
        match self.terms.as_slice() {
            [term] if term.is_constant() => Some(term.constant_value()),
            _ => None,
        }
    }

    /// Returns true if this polynomial is a single constant term.
    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }

    /// Returns true if this polynomial is zero.
    pub fn is_zero(&self) -> bool {
        self.terms.iter().all(Term::is_zero)
    }

    /// Substitutes the bound variables in every term, then brings the result into canonical
    /// form. Unbound variables remain symbolic.
    ///
    /// Substitution can make distinct terms share variables (`ab` and `ac` both become `2a` once
    /// `b` and `c` are bound to `2`), so the result is reduced again.
    pub fn evaluate(&self, bindings: &Bindings) -> Self {
        let terms = self.terms
            .iter()
            .map(|term| term.evaluate(bindings))
            .collect();
        Self::reduce(terms)
    }
}

impl From<Term> for Polynomial {
    fn from(term: Term) -> Self {
        Self::reduce(vec![term])
    }
}

/// Parses a flat expression (no parentheses) into a **raw** polynomial: one signed term per
/// summand, with products multiplied out. Use [`Polynomial::reduce`] or
/// [`Polynomial::reduced`] to make it canonical.
impl FromStr for Polynomial {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize_significant(s);
        let tokens = tokens.iter().collect::<Vec<_>>();
        parse_flat(&tokens)
    }
}

/// Formats the polynomial by joining its terms, with a `+` in front of every term after the
/// first that is not negative.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.terms.iter();
        match iter.next() {
            Some(term) => write!(f, "{}", term)?,
            None => return write!(f, "0"),
        }

        for term in iter {
            if *term.factor() < 0 {
                write!(f, "{}", term)?;
            } else {
                write!(f, "+{}", term)?;
            }
        }

        Ok(())
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        Polynomial::reduce(self.terms.iter().map(Neg::neg).collect())
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Self::Output {
        let terms = self.terms
            .iter()
            .chain(rhs.terms.iter())
            .cloned()
            .collect();
        Polynomial::reduce(terms)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.terms.extend(rhs.terms);
        Polynomial::reduce(self.terms)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Self::Output {
        let terms = self.terms
            .iter()
            .cloned()
            .chain(rhs.terms.iter().map(Neg::neg))
            .collect();
        Polynomial::reduce(terms)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

/// Multiplies every term of the left-hand side by every term of the right-hand side.
impl Polynomial {
    /// Multiplies two polynomials, distributing every term of `self` over every term of `rhs`.
    /// Returns [`None`] if a product has an exponent above [`MAX_EXPONENT`].
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        let terms = self.terms
            .iter()
            .flat_map(|lhs| rhs.terms.iter().map(move |rhs| lhs.checked_mul(rhs)))
            .collect::<Option<Vec<_>>>()?;
        Some(Polynomial::reduce(terms))
    }
}

/// Multiplies two polynomials. See [`Polynomial::checked_mul`].
///
/// # Panics
///
/// Panics if a product has an exponent above [`MAX_EXPONENT`].
impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.checked_mul(rhs) {
            Some(product) => product,
            None => panic!("exponent exceeds the maximum of {}", MAX_EXPONENT),
        }
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parses a flat expression and brings it into canonical form.
    fn poly(s: &str) -> Polynomial {
        s.parse::<Polynomial>().unwrap().reduced()
    }

    fn term(s: &str) -> Term {
        s.parse().unwrap()
    }

    #[test]
    fn raw_parse_keeps_terms() {
        let raw = "-99b3-2".parse::<Polynomial>().unwrap();
        assert_eq!(raw.terms(), &[term("-99b3"), term("-2")]);
        assert_eq!(raw.to_string(), "-99b3-2");
    }

    #[test]
    fn display() {
        assert_eq!(poly("4a").to_string(), "4a");
        assert_eq!(poly("a2b2").to_string(), "a2b2");
        assert_eq!(poly("0").to_string(), "0");
        assert_eq!(poly("-1").to_string(), "-1");
        assert_eq!(poly("101a3").to_string(), "101a3");
        assert_eq!(poly("-99b3+2").to_string(), "-99b3+2");
        assert_eq!(poly("a+b-c+1").to_string(), "a+b-c+1");
    }

    #[test]
    fn reduce_sorts_and_merges() {
        assert_eq!(poly("a+4-b+10+c").to_string(), "a-b+c+14");
        assert_eq!(poly("4a+b-6a").to_string(), "-2a+b");
        assert_eq!(poly("2ab+3ba").to_string(), "5ab");
    }

    #[test]
    fn reduce_cascades_merges() {
        let reduced = Polynomial::reduce(vec![term("x"), term("2x"), term("3x"), term("-x")]);
        assert_eq!(reduced.terms(), &[term("5x")]);

        let reduced = Polynomial::reduce(vec![term("2x"), term("-x"), term("-x"), term("-x")]);
        assert_eq!(reduced.terms(), &[term("-x")]);
    }

    #[test]
    fn reduce_to_zero() {
        assert_eq!(Polynomial::reduce(vec![]), Polynomial::zero());
        assert_eq!(poly("x-x").terms(), &[Term::zero()]);
        assert_eq!(poly("x-x+3-3").to_string(), "0");
        assert_eq!(Polynomial::reduce(vec![Term::monomial(0, [('q', 2)])]), Polynomial::zero());
    }

    #[test]
    fn zero_collapse() {
        let diff = term("a") - term("a");
        assert_eq!(diff.to_string(), "0");
        assert!(diff.is_zero());
    }

    #[test]
    fn reduce_is_idempotent() {
        for s in ["a+4-b+10+c", "z+x-x+y+y", "x*y-y*x+3", "", "5-5", "a2b-3c+4-a*a*b"] {
            let once = poly(s);
            let twice = Polynomial::reduce(once.terms().to_vec());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn reduced_form_has_unique_variables() {
        let p = poly("a*b+b*a+c+c+4-1+a2b-b*a2");
        for (idx, lhs) in p.terms().iter().enumerate() {
            for rhs in &p.terms()[idx + 1..] {
                assert!(!lhs.same_variables(rhs));
            }
        }
        assert_eq!(p.to_string(), "2ab+2c+3");
    }

    #[test]
    fn add_commutes_and_associates() {
        let p = poly("a+2b-3");
        let q = poly("4-b+c*c");
        let r = poly("a*b-a+7");

        assert_eq!((&p + &q).to_string(), (&q + &p).to_string());
        assert_eq!(
            (&(&p + &q) + &r).to_string(),
            (&p + &(&q + &r)).to_string(),
        );
        assert_eq!((&p + &q).to_string(), "c2+a+b+1");
    }

    #[test]
    fn subtract() {
        assert_eq!((poly("4-x+y") - poly("3+x-y")).to_string(), "-2x+2y+1");
        assert_eq!((poly("a") - poly("a")).to_string(), "0");
    }

    #[test]
    fn multiply() {
        assert_eq!((poly("a+b") * poly("c+d")).to_string(), "ac+ad+bc+bd");
        assert_eq!((poly("x+1") * poly("x+1")).to_string(), "x2+2x+1");
        assert_eq!((poly("x+1") * poly("x-1")).to_string(), "x2-1");
        assert_eq!((poly("2a+3") * poly("4-a")).to_string(), "-2a2+5a+12");
        assert_eq!((poly("x+y") * poly("0")).to_string(), "0");
    }

    #[test]
    fn negate() {
        assert_eq!((-poly("a-b+3")).to_string(), "-a+b-3");
        assert_eq!((-Polynomial::zero()).to_string(), "0");
    }

    #[test]
    fn evaluate_partially() {
        let bindings = "x=11,z=4".parse::<Bindings>().unwrap();
        assert_eq!(poly("z+x-x+y+y").evaluate(&bindings).to_string(), "2y+4");

        let bindings = "a=1,b=2".parse::<Bindings>().unwrap();
        assert_eq!(poly("a*b*x+a*b*y").evaluate(&bindings).to_string(), "2x+2y");
    }

    #[test]
    fn evaluation_collapses_terms() {
        let bindings = "b=2,c=-2".parse::<Bindings>().unwrap();
        assert_eq!(poly("a*b+a*c").evaluate(&bindings).to_string(), "0");

        let bindings = "b=1,c=1".parse::<Bindings>().unwrap();
        assert_eq!(poly("a*b+a*c").evaluate(&bindings).to_string(), "2a");
    }

    #[test]
    fn full_evaluation_is_constant() {
        let bindings = "a=-5,b=3,c=2".parse::<Bindings>().unwrap();
        for s in ["a+4-b+10+c", "a2b-3c+4", "a*b*c-c", "7"] {
            let value = poly(s).evaluate(&bindings);
            assert!(value.is_constant(), "{} evaluated to {}", s, value);
        }
        assert_eq!(poly("a2b-3c+4").evaluate(&bindings).as_constant(), Some(&Integer::from(73)));
    }
}
