//! Tokenizer and parenthesis tree for polynomial expressions.
//!
//! Expressions are made of integer constants, single-letter variables, `+`, `-`, `*` and
//! arbitrarily nested parentheses. This crate does not know anything about polynomials; it only
//! splits the source into [`tokenizer::Token`]s and groups them into an [`tree::ExpressionTree`],
//! an arena with one node per parenthesized group. Turning nodes into values is the job of
//! `poly-algebra`.
//!
//! ```
//! use poly_parser::tree::ExpressionTree;
//!
//! let tree = ExpressionTree::new("4-x+y-(3+x-y)").unwrap();
//! let root = tree.root();
//! assert_eq!(tree.children(root).len(), 1);
//! assert_eq!(tree.text(tree.children(root)[0]), "3+x-y");
//! ```

pub mod error;
pub mod options;
pub mod tokenizer;
pub mod tree;

pub use options::{ParseOptions, ParseOptionsBuilder};
