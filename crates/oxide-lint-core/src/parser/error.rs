//! Parser error types.

/// Errors raised when a parser cannot be set up for a dialect.
///
/// Syntax errors in the input are never reported this way: they show up as
/// `unparsable` nodes in the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The dialect lacks a rule the file-level loop starts from.
    #[error("Dialect '{dialect}' has no '{rule}' rule")]
    MissingRootRule {
        /// The dialect name.
        dialect: String,
        /// The missing rule.
        rule: String,
    },
}

/// Result type for parser setup.
pub type Result<T> = std::result::Result<T, ParseError>;
