//! Error types for dialect construction and lookup.

/// Errors raised while building, publishing or selecting a dialect.
///
/// These are configuration defects, never syntax errors in user SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    /// `bind` was called for a name that already has a rule.
    #[error("Rule '{name}' is already bound in dialect '{dialect}'; use replace to override it")]
    DuplicateRule {
        /// The dialect being built.
        dialect: String,
        /// The rule name.
        name: String,
    },

    /// `replace` was called for a name that has no rule.
    #[error("Cannot replace rule '{name}' in dialect '{dialect}': no such rule")]
    ReplaceMissing {
        /// The dialect being built.
        dialect: String,
        /// The rule name.
        name: String,
    },

    /// A grammar refers to a rule that does not exist.
    #[error("Rule '{rule}' in dialect '{dialect}' references unknown rule '{reference}'")]
    UnknownReference {
        /// The dialect being published.
        dialect: String,
        /// The rule (or bracket pair) containing the reference.
        rule: String,
        /// The missing name.
        reference: String,
    },

    /// A grammar asks for a bracket kind the dialect does not define.
    #[error("Rule '{rule}' in dialect '{dialect}' uses unknown bracket kind '{kind}'")]
    UnknownBracketKind {
        /// The dialect being published.
        dialect: String,
        /// The rule containing the bracketed grammar.
        rule: String,
        /// The missing bracket kind.
        kind: String,
    },

    /// A grammar uses a keyword that is in neither keyword set.
    #[error("Rule '{rule}' in dialect '{dialect}' uses keyword '{keyword}' which is not in any keyword set")]
    UnknownKeyword {
        /// The dialect being published.
        dialect: String,
        /// The rule using the keyword.
        rule: String,
        /// The keyword.
        keyword: String,
    },

    /// No dialect with this name is registered.
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// Several problems were found at once.
    #[error("Multiple errors occurred:\n{}", .0.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n"))]
    Multiple(Vec<DialectError>),
}

impl DialectError {
    /// Folds a list of errors into one: a single error stays as it is,
    /// several become [`DialectError::Multiple`].
    #[must_use]
    pub fn from_many(mut errors: Vec<Self>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
