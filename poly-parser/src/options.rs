/// The default maximum nesting depth of parentheses.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options that control how an expression is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// The maximum nesting depth of parentheses.
    ///
    /// Building and resolving an expression tree recurses once per level of nesting, so this
    /// caps the stack usage for adversarial input such as ten thousand `(`. An input nested
    /// deeper than this is rejected with [`NestingTooDeep`].
    ///
    /// [`NestingTooDeep`]: crate::error::kind::NestingTooDeep
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl ParseOptions {
    /// Wraps the given [`ParseOptions`] into a builder for further customization.
    pub fn into_builder(self) -> ParseOptionsBuilder {
        ParseOptionsBuilder(self)
    }
}

/// A builder for [`ParseOptions`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptionsBuilder(ParseOptions);

impl ParseOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth of parentheses. See [`ParseOptions::max_depth`] for more
    /// information.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.0.max_depth = max_depth;
        self
    }

    /// Builds the [`ParseOptions`].
    pub fn build(self) -> ParseOptions {
        self.0
    }
}
