//! The canonical ordering of terms within a polynomial.
//!
//! Terms are sorted in **descending** order of [`canonical_cmp`], so variable terms come before
//! the constant term, and among variable terms, the ones with larger [`weight`] come first.
//!
//! The weight is a polynomial hash over the variables of a term, seeded at `17` with base `31`.
//! Every unit of exponent of a variable contributes `128 - code point` of its name, visiting
//! names in alphabetical order. This makes earlier letters heavier than later letters, and
//! higher total degree heavier than lower total degree, but it is not a degree ordering: it is a
//! fixed rule chosen only so that output is reproducible. Changing it changes the text every
//! expression renders to.

use crate::{primitive::int, term::Term};
use rug::Integer;
use std::cmp::{Ordering, Reverse};

/// The initial value of the weight hash.
const SEED: u32 = 17;

/// The multiplier applied to the weight hash before each contribution.
const BASE: u32 = 31;

/// Computes the weight of the given term. Returns [`None`] for a constant term.
pub fn weight(term: &Term) -> Option<Integer> {
    if term.is_constant() {
        return None;
    }

    // `e` units of a contribution `c` fold to `h * 31^e + c * (31^e - 1) / 30`
    let mut hash = int(SEED);
    for (&name, &exponent) in term.variables() {
        let contribution = 128 - i64::from(u32::from(name));
        let power = Integer::from(Integer::u_pow_u(BASE, exponent));
        let series = int(&power - 1u32) / (BASE - 1) * contribution;
        hash = hash * power + series;
    }

    Some(hash)
}

/// The key that [`canonical_cmp`] compares terms by: whether the term has variables, then its
/// weight (zero for a constant term), then its numeric factor.
type SortKey = (bool, Integer, Integer);

fn sort_key(term: &Term) -> SortKey {
    match weight(term) {
        Some(weight) => (true, weight, term.coefficient().clone()),
        None => (false, Integer::new(), term.constant_value().clone()),
    }
}

/// Compares two terms under the canonical order.
///
/// - Two variable terms compare by [`weight`], then by coefficient.
/// - A variable term is always greater than a constant term.
/// - Two constant terms compare by value.
pub fn canonical_cmp(lhs: &Term, rhs: &Term) -> Ordering {
    sort_key(lhs).cmp(&sort_key(rhs))
}

impl Term {
    /// Returns the [`weight`] of this term, or [`None`] for a constant term.
    pub fn weight(&self) -> Option<Integer> {
        weight(self)
    }

    /// Compares this term with another under the canonical order. See [`canonical_cmp`].
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        canonical_cmp(self, other)
    }
}

/// Sorts the given terms in descending canonical order. The sort is stable, and computes the
/// weight of each term once.
pub fn sort_descending(terms: &mut [Term]) {
    terms.sort_by_cached_key(|term| Reverse(sort_key(term)));
}
