//! Bottom-up resolution of an [`ExpressionTree`] into a single [`Polynomial`].
//!
//! Every node gets one result slot, filled in post-order so that each child is resolved before
//! its parent. A leaf is resolved by parsing its flat text. Any other node is walked as a
//! sequence of [`Operand`]s, in which each nested group is replaced by the value already stored
//! in the child's slot. The sequence is then folded in three passes:
//!
//! 1. unary signs (a `+` or `-` at the start, or directly after another operator) are applied to
//!    the value that follows them;
//! 2. every `*` is folded with its neighbors;
//! 3. every `+` and `-` is folded from left to right.

use crate::{
    error::{kind, Error},
    flat::parse_flat,
    polynomial::Polynomial,
    term::{exponent_too_large, Term},
};
use log::trace;
use poly_parser::{
    tokenizer::{Token, TokenKind},
    tree::{ExpressionTree, NodeId, Segment},
};
use std::ops::Range;

/// A binary operator in a node's operand sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
}

impl Operator {
    /// Returns the operator for the given token, if it is one.
    fn from_token(token: &Token) -> Option<Self> {
        match token.kind {
            TokenKind::Add => Some(Self::Add),
            TokenKind::Sub => Some(Self::Sub),
            TokenKind::Mul => Some(Self::Mul),
            _ => None,
        }
    }

    /// Returns the character used to write this operator.
    pub fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
        }
    }
}

/// An element of a node's operand sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// An operator, with the region of the source code it covers.
    Operator(Operator, Range<usize>),

    /// A value: either a monomial written directly in the node, or the resolved value of a
    /// nested group. The range covers the source code the value came from.
    Value(Polynomial, Range<usize>),
}

/// Creates a [`kind::MissingOperand`] error pointing at the given operator.
fn missing_operand(operator: Operator, span: Range<usize>) -> Error {
    Error::new(vec![span], kind::MissingOperand { operator: operator.as_char() })
}

/// Resolves every node of an [`ExpressionTree`].
#[derive(Debug)]
pub struct Resolver<'a, 'source> {
    /// The tree being resolved.
    tree: &'a ExpressionTree<'source>,

    /// The resolved value of each node, indexed by [`NodeId`]. A slot is emptied once its value
    /// has been moved into the parent.
    slots: Vec<Option<Polynomial>>,
}

impl<'a, 'source> Resolver<'a, 'source> {
    /// Creates a resolver for the given tree, with every slot pending.
    pub fn new(tree: &'a ExpressionTree<'source>) -> Self {
        Self {
            tree,
            slots: vec![None; tree.len()],
        }
    }

    /// Resolves every node of the tree, returning the value of the root.
    pub fn resolve(mut self) -> Result<Polynomial, Error> {
        for id in self.tree.post_order() {
            let value = self.resolve_node(id)?;
            trace!("resolved `{}` to `{}`", self.tree.text(id), value);
            self.slots[id] = Some(value);
        }

        let root = self.tree.root();
        Ok(self.slots[root].take().unwrap_or_else(Polynomial::zero))
    }

    /// Resolves a single node. All of its children must already be resolved.
    fn resolve_node(&mut self, id: NodeId) -> Result<Polynomial, Error> {
        if self.tree.node(id).is_leaf() {
            return Ok(parse_flat(&self.tree.tokens(id))?.reduced());
        }

        let operands = self.operands(id)?;
        let operands = apply_signs(operands)?;
        let operands = fold_products(operands)?;
        fold_sums(operands)
    }

    /// Builds the operand sequence of the given node, moving each child's value out of its slot.
    fn operands(&mut self, id: NodeId) -> Result<Vec<Operand>, Error> {
        let tree = self.tree;
        let mut operands = Vec::new();
        let mut monomial: Vec<&Token> = Vec::new();

        for segment in tree.segments(id) {
            match segment {
                Segment::Token(token) => match Operator::from_token(token) {
                    Some(op) => {
                        push_monomial(&mut operands, &mut monomial)?;
                        operands.push(Operand::Operator(op, token.span.clone()));
                    },
                    None => monomial.push(token),
                },
                Segment::Child(child) => {
                    push_monomial(&mut operands, &mut monomial)?;
                    let Some(value) = self.slots[child].take() else {
                        unreachable!("child {} resolved before its parent", child);
                    };
                    let span = tree.node(child).outer_span.clone();
                    operands.push(Operand::Value(value, span));
                },
            }
        }

        push_monomial(&mut operands, &mut monomial)?;
        Ok(operands)
    }
}

/// Parses the pending monomial tokens, if any, and pushes the result as a value.
fn push_monomial(operands: &mut Vec<Operand>, monomial: &mut Vec<&Token>) -> Result<(), Error> {
    let (Some(first), Some(last)) = (monomial.first(), monomial.last()) else {
        return Ok(());
    };

    let span = first.span.start..last.span.end;
    let term = Term::from_tokens(monomial)?;
    operands.push(Operand::Value(Polynomial::from(term), span));
    monomial.clear();
    Ok(())
}

/// Applies every unary sign to the value that follows it, removing the sign from the sequence.
fn apply_signs(operands: Vec<Operand>) -> Result<Vec<Operand>, Error> {
    let mut out: Vec<Operand> = Vec::with_capacity(operands.len());

    // the outermost unary sign still waiting for its value, and whether the value is negated
    let mut pending: Option<(Operator, Range<usize>)> = None;
    let mut negative = false;

    for operand in operands {
        let after_operator = matches!(out.last(), None | Some(Operand::Operator(..)));
        match operand {
            Operand::Operator(op @ (Operator::Add | Operator::Sub), span) if after_operator => {
                if op == Operator::Sub {
                    negative = !negative;
                }
                pending.get_or_insert((op, span));
            },
            Operand::Value(value, span) => {
                let span = match pending.take() {
                    Some((_, sign)) => sign.start..span.end,
                    None => span,
                };
                let value = if negative { -value } else { value };
                negative = false;
                out.push(Operand::Value(value, span));
            },
            operator => {
                if let Some((op, span)) = pending.take() {
                    return Err(missing_operand(op, span));
                }
                out.push(operator);
            },
        }
    }

    match pending {
        Some((op, span)) => Err(missing_operand(op, span)),
        None => Ok(out),
    }
}

/// Folds every `*` with the values on either side of it.
fn fold_products(operands: Vec<Operand>) -> Result<Vec<Operand>, Error> {
    let mut out: Vec<Operand> = Vec::with_capacity(operands.len());
    let mut iter = operands.into_iter();

    while let Some(operand) = iter.next() {
        let Operand::Operator(Operator::Mul, op_span) = operand else {
            out.push(operand);
            continue;
        };

        let (lhs, lhs_span) = match out.pop() {
            Some(Operand::Value(value, span)) => (value, span),
            _ => return Err(missing_operand(Operator::Mul, op_span)),
        };
        let (rhs, rhs_span) = match iter.next() {
            Some(Operand::Value(value, span)) => (value, span),
            _ => return Err(missing_operand(Operator::Mul, op_span)),
        };

        let product = lhs
            .checked_mul(&rhs)
            .ok_or_else(|| exponent_too_large(op_span))?;
        out.push(Operand::Value(product, lhs_span.start..rhs_span.end));
    }

    Ok(out)
}

/// Folds every `+` and `-` from left to right, returning the final value.
fn fold_sums(operands: Vec<Operand>) -> Result<Polynomial, Error> {
    let mut iter = operands.into_iter();
    let (mut acc, mut last_span) = match iter.next() {
        Some(Operand::Value(value, span)) => (value, span),
        Some(Operand::Operator(op, span)) => return Err(missing_operand(op, span)),
        None => return Ok(Polynomial::zero()),
    };

    while let Some(operand) = iter.next() {
        let (op, op_span) = match operand {
            Operand::Operator(op, span) => (op, span),
            Operand::Value(_, span) => {
                return Err(Error::new(vec![last_span, span], kind::MissingOperator));
            },
        };

        let (rhs, rhs_span) = match iter.next() {
            Some(Operand::Value(value, span)) => (value, span),
            _ => return Err(missing_operand(op, op_span)),
        };

        acc = match op {
            Operator::Add => acc + rhs,
            Operator::Sub => acc - rhs,
            Operator::Mul => return Err(missing_operand(op, op_span)),
        };
        last_span = rhs_span;
    }

    Ok(acc)
}

/// Resolves the given tree into a single canonical [`Polynomial`].
pub fn resolve(tree: &ExpressionTree) -> Result<Polynomial, Error> {
    Resolver::new(tree).resolve()
}
