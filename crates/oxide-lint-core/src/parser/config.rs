//! Parser configuration.

/// Default limit on nested rule references.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tuning knobs for a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Cache rule results by `(rule, position, bound)` within one parse.
    pub memoize: bool,
    /// Maximum depth of nested rule references before a match is abandoned.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the rule cache.
    #[must_use]
    pub const fn memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Sets the maximum rule nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
