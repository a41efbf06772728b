//! Variable bindings used to evaluate polynomials.

use crate::{
    error::{kind, Error},
    primitive::int_from_str,
};
use poly_parser::tokenizer::{tokenize_significant, Token, TokenKind};
use rug::Integer;
use std::{collections::BTreeMap, ops::Range, str::FromStr};

/// A mapping from variable names to integer values.
///
/// Bindings are parsed from a comma-separated list of `name=integer` pairs, such as
/// `a=5,b=3,c=-2`. Variables that are not bound remain symbolic when a polynomial is evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<char, Integer>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to the given variable.
    pub fn get(&self, name: char) -> Option<&Integer> {
        self.values.get(&name)
    }

    /// Binds the given variable, returning its previous value.
    pub fn insert(&mut self, name: char, value: impl Into<Integer>) -> Option<Integer> {
        self.values.insert(name, value.into())
    }

    /// Returns an iterator over the bindings, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Integer)> {
        self.values.iter().map(|(&name, value)| (name, value))
    }

    /// Returns the number of bound variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: Into<Integer>> FromIterator<(char, V)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (char, V)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(name, value)| (name, value.into())).collect(),
        }
    }
}

/// Parses a single `name=integer` entry. The integer may have a leading sign.
fn parse_entry(tokens: &[&Token]) -> Option<(char, Integer)> {
    let (name, rest) = match tokens {
        [name, assign, rest @ ..] if name.kind == TokenKind::Name && assign.kind == TokenKind::Assign => {
            (name, rest)
        },
        _ => return None,
    };

    let (negative, digits) = match rest {
        [sign, digits] if sign.kind == TokenKind::Sub => (true, digits),
        [sign, digits] if sign.kind == TokenKind::Add => (false, digits),
        [digits] => (false, digits),
        _ => return None,
    };

    if digits.kind != TokenKind::Int {
        return None;
    }

    let value = int_from_str(digits.lexeme)?;
    let name = name.lexeme.chars().next()?;
    Some((name, if negative { -value } else { value }))
}

/// Parses a comma-separated list of `name=integer` pairs. Whitespace is ignored, and an empty
/// string binds nothing.
impl FromStr for Bindings {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize_significant(s);
        let mut bindings = Self::new();
        if tokens.is_empty() {
            return Ok(bindings);
        }

        // where each name was first bound, to report duplicates
        let mut first_spans: BTreeMap<char, Range<usize>> = BTreeMap::new();

        let mut entry = Vec::new();
        let mut separator = 0..0;
        let mut iter = tokens.iter().peekable();
        loop {
            let next = iter.next();
            match next {
                Some(token) if token.kind != TokenKind::Comma => {
                    entry.push(token);
                    continue;
                },
                _ => (),
            }

            // `next` is a comma or the end of input, closing the current entry
            let (span, text) = match (entry.first(), entry.last()) {
                (Some(first), Some(last)) => {
                    let span = first.span.start..last.span.end;
                    let text = s[span.clone()].to_string();
                    (span, text)
                },
                _ => (next.map_or(separator.clone(), |token| token.span.clone()), String::new()),
            };

            let (name, value) = parse_entry(&entry).ok_or_else(|| Error::new(
                vec![span.clone()],
                kind::MalformedBinding { entry: text },
            ))?;

            if let Some(first) = first_spans.get(&name) {
                return Err(Error::new(
                    vec![first.clone(), span],
                    kind::DuplicateBinding { name },
                ));
            }
            first_spans.insert(name, span);
            bindings.insert(name, value);
            entry.clear();

            match next {
                Some(comma) => separator = comma.span.clone(),
                None => break,
            }

            // a trailing comma leaves an empty entry
            if iter.peek().is_none() {
                return Err(Error::new(
                    vec![separator],
                    kind::MalformedBinding { entry: String::new() },
                ));
            }
        }

        Ok(bindings)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::primitive::int;
    use super::*;

    #[test]
    fn parse_bindings() {
        let bindings = "a=5,b=3,c=2".parse::<Bindings>().unwrap();
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings.get('a'), Some(&int(5)));
        assert_eq!(bindings.get('b'), Some(&int(3)));
        assert_eq!(bindings.get('c'), Some(&int(2)));
        assert_eq!(bindings.get('d'), None);
    }

    #[test]
    fn parse_signed_values_and_whitespace() {
        let bindings = " a = -5 , c=+9 ".parse::<Bindings>().unwrap();
        assert_eq!(
            bindings.iter().collect::<Vec<_>>(),
            vec![('a', &int(-5)), ('c', &int(9))],
        );
    }

    #[test]
    fn parse_large_value() {
        let bindings = "x=123456789012345678901234567890".parse::<Bindings>().unwrap();
        assert_eq!(bindings.get('x').map(ToString::to_string), Some("123456789012345678901234567890".to_string()));
    }

    #[test]
    fn empty_binds_nothing() {
        assert!("".parse::<Bindings>().unwrap().is_empty());
        assert!("  ".parse::<Bindings>().unwrap().is_empty());
    }

    #[test]
    fn from_iterator() {
        let bindings = [('x', 11), ('z', 4)].into_iter().collect::<Bindings>();
        assert_eq!(bindings, "z=4,x=11".parse::<Bindings>().unwrap());
    }

    #[test]
    fn malformed_entries() {
        for (input, entry, span) in [
            ("a", "a", 0..1),
            ("a=", "a=", 0..2),
            ("a=5,b", "b", 4..5),
            ("ab=3", "ab=3", 0..4),
            ("a=x", "a=x", 0..3),
            ("A=3", "A=3", 0..3),
            ("a=1.5", "a=1.5", 0..5),
            ("=4", "=4", 0..2),
        ] {
            let err = input.parse::<Bindings>().unwrap_err();
            assert_eq!(
                err.downcast_ref::<kind::MalformedBinding>(),
                Some(&kind::MalformedBinding { entry: entry.to_string() }),
                "input: {}",
                input,
            );
            assert_eq!(err.spans, vec![span], "input: {}", input);
        }
    }

    #[test]
    fn empty_entries() {
        let err = "a=1,,b=2".parse::<Bindings>().unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::MalformedBinding>(),
            Some(&kind::MalformedBinding { entry: String::new() }),
        );
        assert_eq!(err.spans, vec![4..5]);

        let err = "a=1,".parse::<Bindings>().unwrap_err();
        assert!(err.is::<kind::MalformedBinding>());
        assert_eq!(err.spans, vec![3..4]);
    }

    #[test]
    fn duplicate_names() {
        let err = "a=1,b=2,a=3".parse::<Bindings>().unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::DuplicateBinding>(),
            Some(&kind::DuplicateBinding { name: 'a' }),
        );
        assert_eq!(err.spans, vec![0..3, 8..11]);
    }
}
