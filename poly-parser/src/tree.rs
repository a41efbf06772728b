//! The parenthesis tree of an expression.
//!
//! An [`ExpressionTree`] is an arena of [`Node`]s, one per parenthesized group, plus a root node
//! covering the whole input. Each node records the range of tokens strictly inside its pair of
//! parentheses, and the ids of the groups directly nested in it, in the order their opening
//! parentheses appear.
//!
//! The tree is built in a single recursive pass over the token stream. Because every node keeps
//! token ranges instead of text, a parent can be walked as a sequence of [`Segment`]s: its own
//! tokens, with each nested group replaced by the id of the child node. Two children with the
//! same text are still distinct segments.

use crate::{
    error::{kind, Error},
    options::ParseOptions,
    tokenizer::{tokenize_complete, Token, TokenKind},
};
use std::ops::Range;

/// Index of a [`Node`] in an [`ExpressionTree`].
pub type NodeId = usize;

/// A single node of an [`ExpressionTree`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// The range of tokens covered by this node, excluding its enclosing parentheses.
    pub tokens: Range<usize>,

    /// The region of the source code covered by this node, excluding its enclosing parentheses.
    pub span: Range<usize>,

    /// The region of the source code covered by this node, including its enclosing parentheses.
    /// For the root node, this is the same as [`Node::span`].
    pub outer_span: Range<usize>,

    /// The nesting depth of this node. The root node has depth 0.
    pub depth: usize,

    /// The nodes nested directly inside this node, in left-to-right order.
    pub children: Vec<NodeId>,
}

impl Node {
    /// Returns true if there are no parenthesized groups inside this node.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A piece of a node's contents, as returned by [`ExpressionTree::segments`].
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a, 'source> {
    /// A token belonging directly to the node.
    Token(&'a Token<'source>),

    /// A parenthesized group, represented by its node.
    Child(NodeId),
}

/// The parenthesis tree of an expression. See the [module-level documentation](self).
#[derive(Debug, Clone)]
pub struct ExpressionTree<'source> {
    /// The source code the tree was built from.
    source: &'source str,

    /// Every token of the source, including whitespace.
    tokens: Box<[Token<'source>]>,

    /// The nodes of the tree. The root node is always at index 0.
    nodes: Vec<Node>,
}

impl<'source> ExpressionTree<'source> {
    /// Builds the tree for the given source with the default [`ParseOptions`].
    pub fn new(source: &'source str) -> Result<Self, Error> {
        Self::with_options(source, ParseOptions::default())
    }

    /// Builds the tree for the given source.
    ///
    /// Returns an error if the parentheses are unbalanced, if a pair of parentheses is empty,
    /// or if the parentheses are nested deeper than [`ParseOptions::max_depth`].
    pub fn with_options(source: &'source str, options: ParseOptions) -> Result<Self, Error> {
        let tokens = tokenize_complete(source);
        let mut tree = Self { source, tokens, nodes: Vec::new() };
        let all = 0..tree.tokens.len();
        tree.build_node(all, 0..source.len(), 0..source.len(), 0, &options)?;
        Ok(tree)
    }

    /// Adds the node covering the given tokens to the arena, then recursively adds every group
    /// nested directly inside it.
    fn build_node(
        &mut self,
        tokens: Range<usize>,
        span: Range<usize>,
        outer_span: Range<usize>,
        depth: usize,
        options: &ParseOptions,
    ) -> Result<NodeId, Error> {
        if depth > options.max_depth {
            return Err(Error::new(
                vec![outer_span],
                kind::NestingTooDeep { limit: options.max_depth },
            ));
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            tokens: tokens.clone(),
            span,
            outer_span,
            depth,
            children: Vec::new(),
        });

        let mut level = 0usize;
        let mut open = tokens.start;
        for idx in tokens {
            match self.tokens[idx].kind {
                TokenKind::OpenParen => {
                    if level == 0 {
                        open = idx;
                    }
                    level += 1;
                },
                TokenKind::CloseParen => {
                    if level == 0 {
                        return Err(Error::new(
                            vec![self.tokens[idx].span.clone()],
                            kind::UnclosedParenthesis { opening: false },
                        ));
                    }

                    level -= 1;
                    if level == 0 {
                        let inner = open + 1..idx;
                        let open_span = self.tokens[open].span.clone();
                        let close_span = self.tokens[idx].span.clone();

                        if self.tokens[inner.clone()].iter().all(Token::is_whitespace) {
                            return Err(Error::new(
                                vec![open_span.start..close_span.end],
                                kind::EmptyParenthesis,
                            ));
                        }

                        let child = self.build_node(
                            inner,
                            open_span.end..close_span.start,
                            open_span.start..close_span.end,
                            depth + 1,
                            options,
                        )?;
                        self.nodes[id].children.push(child);
                    }
                },
                _ => (),
            }
        }

        if level > 0 {
            return Err(Error::new(
                vec![self.tokens[open].span.clone()],
                kind::UnclosedParenthesis { opening: true },
            ));
        }

        Ok(id)
    }

    /// Returns the source code the tree was built from.
    pub fn source(&self) -> &'source str {
        self.source
    }

    /// Returns the id of the root node.
    pub fn root(&self) -> NodeId {
        0
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes. A successfully built tree always has a root, so
    /// this is always false.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Returns the ids of the groups nested directly inside the given node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Returns the source text covered by the given node, excluding its enclosing parentheses.
    pub fn text(&self, id: NodeId) -> &'source str {
        &self.source[self.nodes[id].span.clone()]
    }

    /// Returns the non-whitespace tokens covered by the given node, including the tokens of
    /// nested groups.
    pub fn tokens(&self, id: NodeId) -> Vec<&Token<'source>> {
        self.tokens[self.nodes[id].tokens.clone()]
            .iter()
            .filter(|token| !token.is_whitespace())
            .collect()
    }

    /// Returns the contents of the given node as a sequence of [`Segment`]s. Whitespace is
    /// skipped, and each nested group (including its parentheses) becomes a single
    /// [`Segment::Child`].
    pub fn segments(&self, id: NodeId) -> Vec<Segment<'_, 'source>> {
        let node = &self.nodes[id];
        let mut children = node.children.iter().peekable();
        let mut segments = Vec::new();

        let mut idx = node.tokens.start;
        while idx < node.tokens.end {
            if let Some(&&child) = children.peek() {
                // the opening parenthesis sits right before the child's first token
                let child_tokens = &self.nodes[child].tokens;
                if idx + 1 == child_tokens.start {
                    segments.push(Segment::Child(child));
                    children.next();
                    idx = child_tokens.end + 1;
                    continue;
                }
            }

            let token = &self.tokens[idx];
            if !token.is_whitespace() {
                segments.push(Segment::Token(token));
            }
            idx += 1;
        }

        segments
    }

    /// Returns the ids of every node, ordered so that each node comes after all of its
    /// descendants.
    pub fn post_order(&self) -> Vec<NodeId> {
        fn visit(tree: &ExpressionTree, id: NodeId, out: &mut Vec<NodeId>) {
            for &child in tree.children(id) {
                visit(tree, child, out);
            }
            out.push(id);
        }

        let mut out = Vec::with_capacity(self.nodes.len());
        visit(self, self.root(), &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::options::ParseOptionsBuilder;
    use super::*;

    /// Returns the text of every child of the given node.
    fn child_texts<'s>(tree: &ExpressionTree<'s>, id: NodeId) -> Vec<&'s str> {
        tree.children(id).iter().map(|&child| tree.text(child)).collect()
    }

    #[test]
    fn leaf_root() {
        let tree = ExpressionTree::new("a+4-b+10+c").unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.node(tree.root()).is_leaf());
        assert_eq!(tree.text(tree.root()), "a+4-b+10+c");
    }

    #[test]
    fn nested_groups() {
        let tree = ExpressionTree::new("a+4-b+(12+(10+c)+d)+((2*e)+3*f)").unwrap();
        let root = tree.root();
        assert_eq!(child_texts(&tree, root), vec!["12+(10+c)+d", "(2*e)+3*f"]);

        let first = tree.children(root)[0];
        let second = tree.children(root)[1];
        assert_eq!(child_texts(&tree, first), vec!["10+c"]);
        assert_eq!(child_texts(&tree, second), vec!["2*e"]);
        assert_eq!(tree.node(tree.children(first)[0]).depth, 2);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn identical_children_are_distinct() {
        let tree = ExpressionTree::new("(x+1)*(x+1)").unwrap();
        let children = tree.children(tree.root());
        assert_eq!(children.len(), 2);
        assert_ne!(children[0], children[1]);
        assert_eq!(tree.node(children[0]).outer_span, 0..5);
        assert_eq!(tree.node(children[1]).outer_span, 6..11);
    }

    #[test]
    fn segments_replace_groups() {
        let tree = ExpressionTree::new("2 * (a+b) - c").unwrap();
        let segments = tree.segments(tree.root());
        let child = tree.children(tree.root())[0];

        assert_eq!(segments.len(), 5);
        assert!(matches!(segments[0], Segment::Token(token) if token.lexeme == "2"));
        assert!(matches!(segments[1], Segment::Token(token) if token.kind == TokenKind::Mul));
        assert_eq!(segments[2], Segment::Child(child));
        assert!(matches!(segments[3], Segment::Token(token) if token.kind == TokenKind::Sub));
        assert!(matches!(segments[4], Segment::Token(token) if token.lexeme == "c"));
    }

    #[test]
    fn post_order_visits_children_first() {
        let tree = ExpressionTree::new("((a)+(b))*(c)").unwrap();
        let order = tree.post_order();
        assert_eq!(order.len(), tree.len());
        assert_eq!(*order.last().unwrap(), tree.root());

        for (position, &id) in order.iter().enumerate() {
            for child in tree.children(id) {
                let child_position = order.iter().position(|other| other == child).unwrap();
                assert!(child_position < position);
            }
        }
    }

    #[test]
    fn unmatched_close_paren() {
        let err = ExpressionTree::new("a+b)").unwrap_err();
        assert_eq!(err.spans, vec![3..4]);
        assert_eq!(
            err.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: false }),
        );
    }

    #[test]
    fn unmatched_open_paren() {
        let err = ExpressionTree::new("((a)").unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
        assert_eq!(
            err.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: true }),
        );
    }

    #[test]
    fn close_before_open() {
        let err = ExpressionTree::new(")a(").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: false }),
        );
    }

    #[test]
    fn empty_parenthesis() {
        let err = ExpressionTree::new("a*( )").unwrap_err();
        assert!(err.is::<kind::EmptyParenthesis>());
        assert_eq!(err.spans, vec![2..5]);
    }

    #[test]
    fn nesting_limit() {
        let options = ParseOptionsBuilder::new().max_depth(2).build();
        assert!(ExpressionTree::with_options("((a))", options).is_ok());

        let err = ExpressionTree::with_options("(((a)))", options).unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::NestingTooDeep>(),
            Some(&kind::NestingTooDeep { limit: 2 }),
        );
        assert_eq!(err.spans, vec![2..5]);
    }

    #[test]
    fn adversarial_depth_is_rejected() {
        let source = format!("{}a{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = ExpressionTree::new(&source).unwrap_err();
        assert!(err.is::<kind::NestingTooDeep>());
    }
}
