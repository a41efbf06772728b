//! Single monomials.
//!
//! A [`Term`] is either a **variable term**, a coefficient multiplied by one or more variables
//! raised to positive exponents (`4a`, `-b2c`), or a **constant term** holding a bare integer
//! (`14`, `-3`). Every constructor keeps exactly one of these shapes:
//!
//! - variable term: `variables` is non-empty and `constant` is zero;
//! - constant term: `variables` is empty and `coefficient` is zero.
//!
//! A variable term whose coefficient is zero is algebraically zero; it is removed when the term
//! is reduced as part of a [`Polynomial`].

use crate::{
    binding::Bindings,
    error::{kind, Error},
    polynomial::Polynomial,
    primitive::{int, int_from_str},
};
use poly_parser::tokenizer::{tokenize_significant, Token, TokenKind};
use rug::{ops::Pow, Integer};
use std::{
    collections::BTreeMap,
    fmt,
    ops::{Add, Mul, Neg, Range, Sub},
    str::FromStr,
};

/// The largest exponent a variable may have, in any term.
///
/// Parsing rejects larger exponents with [`kind::ExponentTooLarge`], and so does multiplying terms
/// whose exponents sum past it.
pub const MAX_EXPONENT: u32 = 1000;

/// Sums the exponents of repeated names, dropping names whose total is zero. Returns [`None`] if a
/// total exceeds [`MAX_EXPONENT`].
fn collect_variables(
    variables: impl IntoIterator<Item = (char, u32)>,
) -> Option<BTreeMap<char, u32>> {
    let mut map = BTreeMap::new();
    for (name, exponent) in variables {
        let total: &mut u32 = map.entry(name).or_insert(0);
        *total = total.checked_add(exponent).filter(|sum| *sum <= MAX_EXPONENT)?;
    }
    map.retain(|_, exponent| *exponent != 0);
    Some(map)
}

/// A single monomial. See the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    /// The multiplier of the variables. Always zero for a constant term.
    coefficient: Integer,

    /// The variables of the term and their exponents, sorted by name. Exponents are never zero.
    variables: BTreeMap<char, u32>,

    /// The value of a constant term. Always zero for a variable term.
    constant: Integer,
}

impl Term {
    /// Creates a constant term.
    pub fn constant(value: impl Into<Integer>) -> Self {
        Self {
            coefficient: Integer::new(),
            variables: BTreeMap::new(),
            constant: value.into(),
        }
    }

    /// Creates the zero constant term.
    pub fn zero() -> Self {
        Self::constant(0)
    }

    /// Creates a term with the given coefficient and variables.
    ///
    /// Exponents of repeated names are summed, and variables with a total exponent of zero are
    /// dropped. If no variables remain, the result is a constant term holding the coefficient.
    ///
    /// # Panics
    ///
    /// Panics if a summed exponent exceeds [`MAX_EXPONENT`]. See [`Term::checked_monomial`].
    pub fn monomial(
        coefficient: impl Into<Integer>,
        variables: impl IntoIterator<Item = (char, u32)>,
    ) -> Self {
        match Self::checked_monomial(coefficient, variables) {
            Some(term) => term,
            None => panic!("exponent exceeds the maximum of {}", MAX_EXPONENT),
        }
    }

    /// Creates a term with the given coefficient and variables, like [`Term::monomial`]. Returns
    /// [`None`] if a summed exponent exceeds [`MAX_EXPONENT`].
    pub fn checked_monomial(
        coefficient: impl Into<Integer>,
        variables: impl IntoIterator<Item = (char, u32)>,
    ) -> Option<Self> {
        let variables = collect_variables(variables)?;
        if variables.is_empty() {
            return Some(Self::constant(coefficient));
        }

        Some(Self {
            coefficient: coefficient.into(),
            variables,
            constant: Integer::new(),
        })
    }

    /// Returns the coefficient of a variable term. This is zero for a constant term.
    pub fn coefficient(&self) -> &Integer {
        &self.coefficient
    }

    /// Returns the variables of the term and their exponents, sorted by name.
    pub fn variables(&self) -> &BTreeMap<char, u32> {
        &self.variables
    }

    /// Returns the value of a constant term. This is zero for a variable term.
    pub fn constant_value(&self) -> &Integer {
        &self.constant
    }

    /// Returns the numeric factor of the term: the coefficient of a variable term, or the value
    /// of a constant term.
    pub fn factor(&self) -> &Integer {
        if self.is_constant() {
            &self.constant
        } else {
            &self.coefficient
        }
    }

    /// Returns true if the term has no variables.
    pub fn is_constant(&self) -> bool {
        self.variables.is_empty()
    }

    /// Returns true if the term is algebraically zero.
    pub fn is_zero(&self) -> bool {
        *self.factor() == 0
    }

    /// Returns true if both terms have the same variables with the same exponents.
    pub fn same_variables(&self, other: &Self) -> bool {
        self.variables == other.variables
    }

    /// Returns a copy of this term with the numeric factor replaced.
    fn with_factor(&self, factor: Integer) -> Self {
        if self.is_constant() {
            Self::constant(factor)
        } else {
            Self {
                coefficient: factor,
                variables: self.variables.clone(),
                constant: Integer::new(),
            }
        }
    }

    /// Adds two terms with the same variables, returning a single term. A variable term whose
    /// coefficient sums to zero collapses to the zero constant term.
    ///
    /// Returns [`None`] if the variables differ.
    pub(crate) fn merge(&self, other: &Self) -> Option<Self> {
        if !self.same_variables(other) {
            return None;
        }

        let sum = int(self.factor() + other.factor());
        if sum == 0 {
            Some(Self::zero())
        } else {
            Some(self.with_factor(sum))
        }
    }

    /// Multiplies two terms. The numeric factors are multiplied, and the exponents of the
    /// variables are summed. Returns [`None`] if a summed exponent exceeds [`MAX_EXPONENT`].
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        let factor = int(self.factor() * rhs.factor());
        let variables = self.variables
            .iter()
            .chain(rhs.variables.iter())
            .map(|(&name, &exponent)| (name, exponent));
        Self::checked_monomial(factor, variables)
    }

    /// Substitutes the bound variables of this term.
    ///
    /// Each bound variable multiplies the coefficient by `value^exponent` and is removed from
    /// the term. If every variable is bound, the result is a constant term. Variables are
    /// processed in name order.
    pub fn evaluate(&self, bindings: &Bindings) -> Self {
        if self.is_constant() {
            return self.clone();
        }

        let mut coefficient = self.coefficient.clone();
        let mut remaining = BTreeMap::new();
        for (&name, &exponent) in &self.variables {
            match bindings.get(name) {
                Some(value) => coefficient *= int(value.pow(exponent)),
                None => {
                    remaining.insert(name, exponent);
                },
            }
        }

        Self::monomial(coefficient, remaining)
    }

    /// Parses a term from the given non-whitespace tokens.
    ///
    /// The tokens must form an optional leading `-`, an optional coefficient, then any number of
    /// variables, each followed by an optional exponent. A lone `-` is the constant `-1`.
    ///
    /// After the sign, the tokens must be written without whitespace between them: `a 2` is two
    /// values with no operator, not `a2`.
    pub(crate) fn from_tokens(tokens: &[&Token]) -> Result<Self, Error> {
        let mut iter = tokens.iter().copied().peekable();

        let sign = iter.next_if(|token| token.kind == TokenKind::Sub);
        let body = &tokens[usize::from(sign.is_some())..];
        check_contiguous(body)?;

        let coefficient = iter
            .next_if(|token| token.kind == TokenKind::Int)
            .map(parse_int)
            .transpose()?;

        let mut variables = BTreeMap::new();
        while let Some(token) = iter.next() {
            if token.kind != TokenKind::Name {
                return Err(malformed(token));
            }

            // the lexer only produces single ASCII letters as names
            let name = token.lexeme.chars().next().unwrap_or_default();
            let (exponent, last) = match iter.next_if(|next| next.kind == TokenKind::Int) {
                Some(next) => (next.lexeme.parse::<u32>().ok(), next),
                None => (Some(1), token),
            };

            let total: &mut u32 = variables.entry(name).or_insert(0);
            *total = exponent
                .and_then(|exponent| total.checked_add(exponent))
                .filter(|sum| *sum <= MAX_EXPONENT)
                .ok_or_else(|| exponent_too_large(last.span.clone()))?;
        }

        let coefficient = match (coefficient, sign.is_some()) {
            (Some(coefficient), true) => -coefficient,
            (Some(coefficient), false) => coefficient,
            (None, true) => int(-1),
            (None, false) if variables.is_empty() => return Ok(Self::zero()),
            (None, false) => int(1),
        };

        // exponents were checked above
        Ok(Self::monomial(coefficient, variables))
    }
}

/// Returns an error if there is whitespace between any two of the given tokens.
fn check_contiguous(tokens: &[&Token]) -> Result<(), Error> {
    let Some(gap) = tokens.windows(2).position(|pair| pair[0].span.end != pair[1].span.start) else {
        return Ok(());
    };

    let (before, after) = tokens.split_at(gap + 1);
    let span_of = |part: &[&Token]| match (part.first(), part.last()) {
        (Some(first), Some(last)) => first.span.start..last.span.end,
        _ => 0..0,
    };
    Err(Error::new(vec![span_of(before), span_of(after)], kind::MissingOperator))
}

/// Creates a [`kind::ExponentTooLarge`] error pointing at the given span.
pub(crate) fn exponent_too_large(span: Range<usize>) -> Error {
    Error::new(vec![span], kind::ExponentTooLarge { limit: MAX_EXPONENT })
}

/// Parses the lexeme of an [`TokenKind::Int`] token.
fn parse_int(token: &Token) -> Result<Integer, Error> {
    int_from_str(token.lexeme).ok_or_else(|| malformed(token))
}

/// Creates a [`kind::MalformedTerm`] error pointing at the given token.
fn malformed(token: &Token) -> Error {
    Error::new(
        vec![token.span.clone()],
        kind::MalformedTerm { found: token.lexeme.to_string() },
    )
}

/// Parses a single monomial, such as `4a`, `-b2c` or `10`. An empty string is the zero term.
impl FromStr for Term {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize_significant(s);
        let tokens = tokens.iter().collect::<Vec<_>>();
        Self::from_tokens(&tokens)
    }
}

/// Formats the term in canonical form: the coefficient (omitted when it is `1`, a bare `-` when
/// it is `-1`), then each variable sorted by name with its exponent (omitted when it is `1`).
/// Constant terms are formatted as their value.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_constant() || self.coefficient == 0 {
            return write!(f, "{}", self.constant);
        }

        if self.coefficient == -1 {
            write!(f, "-")?;
        } else if self.coefficient != 1 {
            write!(f, "{}", self.coefficient)?;
        }

        for (name, exponent) in &self.variables {
            write!(f, "{}", name)?;
            if *exponent != 1 {
                write!(f, "{}", exponent)?;
            }
        }

        Ok(())
    }
}

impl Neg for &Term {
    type Output = Term;

    fn neg(self) -> Self::Output {
        self.with_factor(int(-self.factor()))
    }
}

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Self::Output {
        -&self
    }
}

/// Adds two terms. If both have the same variables, the result has a single term. Otherwise, it
/// contains both terms, unreduced.
impl Add for Term {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Self::Output {
        match self.merge(&rhs) {
            Some(sum) => Polynomial::raw(vec![sum]),
            None => Polynomial::raw(vec![self, rhs]),
        }
    }
}

/// Subtracts two terms by adding the negation of the right-hand side.
impl Sub for Term {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

/// Multiplies two terms. See [`Term::checked_mul`].
///
/// # Panics
///
/// Panics if a summed exponent exceeds [`MAX_EXPONENT`].
impl Mul for &Term {
    type Output = Term;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.checked_mul(rhs) {
            Some(product) => product,
            None => panic!("exponent exceeds the maximum of {}", MAX_EXPONENT),
        }
    }
}

impl Mul for Term {
    type Output = Term;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}
