//! SQL Parser implementation.

use serde::Serialize;
use tracing::debug;

use super::engine::Matcher;
use super::error::{ParseError, Result};
use super::ParserConfig;
use crate::dialect::Dialect;
use crate::lexer::{Lexer, Token};
use crate::segments::{NodeSegment, RawSegment, Segment, UNPARSABLE};

/// Rule matched for each statement region.
pub const STATEMENT_RULE: &str = "StatementSegment";

/// Rule matched for statement terminators.
pub const DELIMITER_RULE: &str = "DelimiterSegment";

/// Type tag of the root node.
pub const FILE_TYPE: &str = "file";

/// The result of parsing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseTree {
    /// The `file` node.
    pub root: Segment,
}

impl ParseTree {
    /// The verbatim source text; equal to the parser input.
    #[must_use]
    pub fn raw(&self) -> String {
        self.root.raw()
    }

    /// Number of `unparsable` nodes anywhere in the tree.
    #[must_use]
    pub fn unparsable_count(&self) -> usize {
        self.root.recursive_crawl(UNPARSABLE).len()
    }

    /// All segments of the given type, in document order.
    #[must_use]
    pub fn find_all(&self, type_tag: &str) -> Vec<&Segment> {
        self.root.recursive_crawl(type_tag)
    }

    /// Renders the tree as indented text.
    #[must_use]
    pub fn to_tree_string(&self) -> String {
        self.root.to_tree_string()
    }
}

/// SQL Parser.
///
/// Splits a token stream into statements and matches each one against the
/// dialect's `StatementSegment` rule.
///
/// ```rust
/// use oxide_lint_core::dialect::ansi;
/// use oxide_lint_core::parser::Parser;
///
/// let dialect = ansi::dialect().unwrap();
/// let parser = Parser::new(&dialect).unwrap();
/// let tree = parser.parse_str("SELECT a FROM t;\nFROBNICATE x;\n");
///
/// assert_eq!(tree.raw(), "SELECT a FROM t;\nFROBNICATE x;\n");
/// assert_eq!(tree.find_all("select_statement").len(), 1);
/// assert_eq!(tree.unparsable_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    dialect: Dialect,
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingRootRule`] if the dialect lacks
    /// `StatementSegment` or `DelimiterSegment`.
    pub fn new(dialect: &Dialect) -> Result<Self> {
        Self::with_config(dialect, ParserConfig::default())
    }

    /// Creates a parser with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingRootRule`] if the dialect lacks
    /// `StatementSegment` or `DelimiterSegment`.
    pub fn with_config(dialect: &Dialect, config: ParserConfig) -> Result<Self> {
        for rule in [STATEMENT_RULE, DELIMITER_RULE] {
            if dialect.rule(rule).is_none() {
                return Err(ParseError::MissingRootRule {
                    dialect: dialect.name().to_string(),
                    rule: rule.to_string(),
                });
            }
        }
        Ok(Self {
            dialect: dialect.clone(),
            config,
        })
    }

    /// The dialect this parser matches against.
    #[must_use]
    pub const fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// The parser configuration.
    #[must_use]
    pub const fn config(&self) -> ParserConfig {
        self.config
    }

    /// Lexes and parses source text.
    #[must_use]
    pub fn parse_str(&self, sql: &str) -> ParseTree {
        let tokens = Lexer::new(sql).tokenize();
        self.parse(&tokens)
    }

    /// Parses a token stream into a tree rooted at a `file` node.
    ///
    /// Never fails: statements that cannot be matched end up in
    /// `unparsable` nodes and parsing resumes after the next delimiter.
    #[must_use]
    pub fn parse(&self, tokens: &[Token]) -> ParseTree {
        let mut matcher = Matcher::new(&self.dialect, tokens, self.config);
        let end = tokens.len();
        let mut children = Vec::new();
        let mut pos = 0;

        while pos < end {
            let token = &tokens[pos];
            if token.is_trivia() {
                children.push(Segment::Raw(RawSegment::untyped(token)));
                pos += 1;
                continue;
            }

            let delimiter = matcher.match_rule(DELIMITER_RULE, pos, end);
            if delimiter.is_match() {
                children.extend(delimiter.matched);
                pos = delimiter.remainder;
                continue;
            }

            let statement = matcher.match_rule(STATEMENT_RULE, pos, end);
            if statement.is_match() {
                children.extend(statement.matched);
                pos = statement.remainder;
                continue;
            }

            let stop = Self::recovery_point(&mut matcher, tokens, pos);
            debug!(
                "No statement recognized at token {pos}; skipping to token {stop} in dialect '{}'",
                self.dialect.name()
            );
            children.push(Segment::Node(NodeSegment::unparsable(&tokens[pos..stop])));
            pos = stop;
        }

        ParseTree {
            root: Segment::Node(NodeSegment::new(FILE_TYPE, children)),
        }
    }

    /// End of the last code token before the next delimiter after `pos`.
    fn recovery_point(matcher: &mut Matcher<'_>, tokens: &[Token], pos: usize) -> usize {
        let mut stop = pos + 1;
        for i in pos + 1..tokens.len() {
            if tokens[i].is_trivia() {
                continue;
            }
            if matcher.match_rule(DELIMITER_RULE, i, tokens.len()).is_match() {
                break;
            }
            stop = i + 1;
        }
        stop
    }
}
