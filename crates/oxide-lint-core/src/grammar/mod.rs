//! Grammar expressions.
//!
//! A [`Grammar`] is an immutable description of a syntactic shape. It is
//! matched against a token stream by the engine in [`crate::parser`], always
//! together with a [`crate::dialect::Dialect`] that resolves named
//! references, bracket kinds and keyword classes.
//!
//! Dialect tables are written with the constructor functions in this module:
//!
//! ```rust
//! use oxide_lint_core::grammar::{keyword, one_of, reference, sequence};
//!
//! let drop = sequence(vec![
//!     keyword("DROP"),
//!     keyword("TABLE"),
//!     reference("IfExistsGrammar").optional(),
//!     reference("TableReferenceSegment"),
//!     one_of(vec![keyword("RESTRICT"), keyword("CASCADE")]).optional(),
//! ]);
//! assert_eq!(drop.references(), vec!["IfExistsGrammar", "TableReferenceSegment"]);
//! ```

use std::fmt;

use crate::lexer::TokenKind;

/// A grammar that matches exactly one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    /// A word equal to the keyword, compared case-insensitively.
    Keyword(String),
    /// A word that is not a reserved keyword of the active dialect.
    Identifier {
        /// Segment type of the produced leaf.
        type_tag: String,
    },
    /// Any token of the given lexical class.
    Kind {
        /// The lexical class to accept.
        kind: TokenKind,
        /// Segment type of the produced leaf.
        type_tag: String,
    },
    /// A token whose raw text is exactly `raw`.
    Symbol {
        /// The exact text to accept.
        raw: String,
        /// Segment type of the produced leaf.
        type_tag: String,
    },
}

/// A grammar expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grammar {
    /// One token.
    Terminal(Terminal),
    /// All items in order.
    Sequence(Vec<Grammar>),
    /// The inner grammar, or nothing.
    Optional(Box<Grammar>),
    /// The first option that matches, in declaration order.
    OneOf(Vec<Grammar>),
    /// Repetitions of `inner`, greedily.
    AnyNumberOf {
        /// The repeated grammar.
        inner: Box<Grammar>,
        /// Minimum number of repetitions.
        min: usize,
        /// Maximum number of repetitions, unbounded if `None`.
        max: Option<usize>,
    },
    /// One or more `item`s separated by `delimiter`.
    Delimited {
        /// The list element.
        item: Box<Grammar>,
        /// The separator.
        delimiter: Box<Grammar>,
        /// Whether a dangling delimiter after the last item is consumed.
        allow_trailing: bool,
        /// Minimum number of delimiters.
        min_delimiters: usize,
    },
    /// `inner` wrapped in a bracket pair of the named kind.
    Bracketed {
        /// The grammar between the brackets.
        inner: Box<Grammar>,
        /// The bracket kind, resolved through the dialect's bracket pairs.
        kind: String,
    },
    /// A rule of the active dialect, looked up by name at match time.
    Ref(String),
    /// Recognizes a region that begins with `inner` and extends to the end
    /// of the enclosing region.
    StartsWith(Box<Grammar>),
    /// Consumes tokens verbatim up to the next token where the terminator
    /// matches, or to the end of the enclosing region.
    GreedyUntil(Box<Grammar>),
}

impl Grammar {
    /// Makes this grammar optional.
    #[must_use]
    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Lets a `Delimited` grammar consume a trailing delimiter. Other
    /// grammars are returned unchanged.
    #[must_use]
    pub fn allow_trailing(self) -> Self {
        match self {
            Self::Delimited {
                item,
                delimiter,
                min_delimiters,
                ..
            } => Self::Delimited {
                item,
                delimiter,
                allow_trailing: true,
                min_delimiters,
            },
            other => other,
        }
    }

    /// Requires a `Delimited` grammar to match at least `min` delimiters.
    /// Other grammars are returned unchanged.
    #[must_use]
    pub fn min_delimiters(self, min: usize) -> Self {
        match self {
            Self::Delimited {
                item,
                delimiter,
                allow_trailing,
                ..
            } => Self::Delimited {
                item,
                delimiter,
                allow_trailing,
                min_delimiters: min,
            },
            other => other,
        }
    }

    /// Returns true for the `Optional` wrapper.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Visits this grammar and every sub-grammar, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        match self {
            Self::Terminal(_) | Self::Ref(_) => {}
            Self::Sequence(items) | Self::OneOf(items) => {
                for item in items {
                    item.walk(visit);
                }
            }
            Self::Optional(inner)
            | Self::AnyNumberOf { inner, .. }
            | Self::Bracketed { inner, .. }
            | Self::StartsWith(inner)
            | Self::GreedyUntil(inner) => inner.walk(visit),
            Self::Delimited {
                item, delimiter, ..
            } => {
                item.walk(visit);
                delimiter.walk(visit);
            }
        }
    }

    /// Names of all rules referenced by this grammar, in visiting order.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |g| {
            if let Self::Ref(name) = g {
                names.push(name.as_str());
            }
        });
        names
    }

    /// Keywords used by this grammar, in visiting order.
    #[must_use]
    pub fn keywords(&self) -> Vec<&str> {
        let mut words = Vec::new();
        self.walk(&mut |g| {
            if let Self::Terminal(Terminal::Keyword(word)) = g {
                words.push(word.as_str());
            }
        });
        words
    }

    /// Bracket kinds requested by this grammar, in visiting order.
    #[must_use]
    pub fn bracket_kinds(&self) -> Vec<&str> {
        let mut kinds = Vec::new();
        self.walk(&mut |g| {
            if let Self::Bracketed { kind, .. } = g {
                kinds.push(kind.as_str());
            }
        });
        kinds
    }
}

impl From<Terminal> for Grammar {
    fn from(terminal: Terminal) -> Self {
        Self::Terminal(terminal)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, items: &[Grammar]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(word) => write!(f, "{word}"),
            Self::Identifier { type_tag } => write!(f, "<{type_tag}>"),
            Self::Kind { kind, .. } => write!(f, "<{}>", kind.default_type()),
            Self::Symbol { raw, .. } => write!(f, "{raw:?}"),
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(t) => write!(f, "{t}"),
            Self::Sequence(items) => write_list(f, "Sequence", items),
            Self::OneOf(items) => write_list(f, "OneOf", items),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::AnyNumberOf { inner, min, max } => match max {
                Some(max) => write!(f, "AnyNumberOf({inner}, {min}..={max})"),
                None => write!(f, "AnyNumberOf({inner}, {min}..)"),
            },
            Self::Delimited {
                item, delimiter, ..
            } => write!(f, "Delimited({item}, {delimiter})"),
            Self::Bracketed { inner, kind } => write!(f, "Bracketed[{kind}]({inner})"),
            Self::Ref(name) => write!(f, "Ref({name})"),
            Self::StartsWith(inner) => write!(f, "StartsWith({inner})"),
            Self::GreedyUntil(inner) => write!(f, "GreedyUntil({inner})"),
        }
    }
}

/// Matches a keyword, case-insensitively.
#[must_use]
pub fn keyword(word: &str) -> Grammar {
    Grammar::Terminal(Terminal::Keyword(word.to_ascii_uppercase()))
}

/// Matches a non-reserved word, producing a leaf of the given type.
#[must_use]
pub fn identifier(type_tag: &str) -> Grammar {
    Grammar::Terminal(Terminal::Identifier {
        type_tag: type_tag.to_string(),
    })
}

/// Matches any token of a lexical class, producing a leaf of the given type.
#[must_use]
pub fn typed(kind: TokenKind, type_tag: &str) -> Grammar {
    Grammar::Terminal(Terminal::Kind {
        kind,
        type_tag: type_tag.to_string(),
    })
}

/// Matches a token with exactly the given text.
#[must_use]
pub fn symbol(raw: &str, type_tag: &str) -> Grammar {
    Grammar::Terminal(Terminal::Symbol {
        raw: raw.to_string(),
        type_tag: type_tag.to_string(),
    })
}

/// Refers to a dialect rule by name.
#[must_use]
pub fn reference(name: &str) -> Grammar {
    Grammar::Ref(name.to_string())
}

/// Matches all items in order.
#[must_use]
pub const fn sequence(items: Vec<Grammar>) -> Grammar {
    Grammar::Sequence(items)
}

/// Matches the first option that succeeds.
#[must_use]
pub const fn one_of(options: Vec<Grammar>) -> Grammar {
    Grammar::OneOf(options)
}

/// Zero or more repetitions.
#[must_use]
pub fn any_number_of(inner: Grammar) -> Grammar {
    Grammar::AnyNumberOf {
        inner: Box::new(inner),
        min: 0,
        max: None,
    }
}

/// One or more repetitions.
#[must_use]
pub fn one_or_more(inner: Grammar) -> Grammar {
    Grammar::AnyNumberOf {
        inner: Box::new(inner),
        min: 1,
        max: None,
    }
}

/// Items separated by a delimiter rule.
#[must_use]
pub fn delimited(item: Grammar, delimiter: Grammar) -> Grammar {
    Grammar::Delimited {
        item: Box::new(item),
        delimiter: Box::new(delimiter),
        allow_trailing: false,
        min_delimiters: 0,
    }
}

/// Items separated by commas.
#[must_use]
pub fn comma_separated(item: Grammar) -> Grammar {
    delimited(item, reference("CommaSegment"))
}

/// `inner` in round brackets.
#[must_use]
pub fn bracketed(inner: Grammar) -> Grammar {
    bracketed_with(inner, "round")
}

/// `inner` in angle brackets.
#[must_use]
pub fn angle_bracketed(inner: Grammar) -> Grammar {
    bracketed_with(inner, "angle")
}

/// `inner` in brackets of the named kind.
#[must_use]
pub fn bracketed_with(inner: Grammar, kind: &str) -> Grammar {
    Grammar::Bracketed {
        inner: Box::new(inner),
        kind: kind.to_string(),
    }
}

/// Recognizes a region beginning with `inner`.
#[must_use]
pub fn starts_with(inner: Grammar) -> Grammar {
    Grammar::StartsWith(Box::new(inner))
}

/// Consumes everything up to `terminator`.
#[must_use]
pub fn greedy_until(terminator: Grammar) -> Grammar {
    Grammar::GreedyUntil(Box::new(terminator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_is_uppercased() {
        assert_eq!(
            keyword("create"),
            Grammar::Terminal(Terminal::Keyword("CREATE".into()))
        );
    }

    #[test]
    fn test_walk_collects_everything() {
        let grammar = sequence(vec![
            keyword("LOAD"),
            keyword("DATA"),
            keyword("LOCAL").optional(),
            comma_separated(reference("PropertyGrammar")),
            angle_bracketed(reference("DatatypeSegment")),
        ]);
        assert_eq!(grammar.keywords(), vec!["LOAD", "DATA", "LOCAL"]);
        assert_eq!(
            grammar.references(),
            vec!["PropertyGrammar", "CommaSegment", "DatatypeSegment"]
        );
        assert_eq!(grammar.bracket_kinds(), vec!["angle"]);
    }

    #[test]
    fn test_delimited_modifiers() {
        let grammar = comma_separated(reference("X")).allow_trailing().min_delimiters(2);
        match grammar {
            Grammar::Delimited {
                allow_trailing,
                min_delimiters,
                ..
            } => {
                assert!(allow_trailing);
                assert_eq!(min_delimiters, 2);
            }
            other => panic!("Expected Delimited, got {other:?}"),
        }
        assert_eq!(keyword("A").allow_trailing(), keyword("A"));
    }

    #[test]
    fn test_display() {
        let grammar = sequence(vec![
            keyword("STORED"),
            keyword("AS"),
            reference("FileFormatSegment").optional(),
        ]);
        assert_eq!(
            grammar.to_string(),
            "Sequence(STORED, AS, Ref(FileFormatSegment)?)"
        );
    }
}
