//! # oxide-lint-core
//!
//! The grammar matching core of a SQL linting toolkit.
//!
//! This crate provides:
//! - A lossless lexer producing a flat token stream
//! - A grammar expression algebra for writing dialect rule tables
//! - Dialects built as inheritable, validated rule tables
//! - A matching engine that turns tokens into a lossless segment tree,
//!   keeping statements it cannot decompose as `unparsable` nodes
//!
//! ## Parsing
//!
//! ```rust
//! use oxide_lint_core::dialect::ansi;
//! use oxide_lint_core::parser::Parser;
//!
//! let dialect = ansi::dialect().unwrap();
//! let parser = Parser::new(&dialect).unwrap();
//!
//! let sql = "SELECT id, name FROM users WHERE active = TRUE;";
//! let tree = parser.parse_str(sql);
//!
//! // Every byte of the input is kept.
//! assert_eq!(tree.raw(), sql);
//! assert_eq!(tree.find_all("where_clause").len(), 1);
//! assert_eq!(tree.unparsable_count(), 0);
//! ```
//!
//! ## Deriving a dialect
//!
//! Child dialects start from an independent copy of their parent and replace
//! or extend individual rules:
//!
//! ```rust
//! use oxide_lint_core::dialect::{ansi, KeywordClass, Rule};
//! use oxide_lint_core::grammar::{keyword, reference, sequence};
//! use oxide_lint_core::parser::Parser;
//!
//! let ansi = ansi::dialect().unwrap();
//!
//! let mut builder = ansi.derive("strict");
//! builder
//!     .add_keywords(KeywordClass::Unreserved, ["PURGE"])
//!     .replace(
//!         "DropStatementSegment",
//!         Rule::segment(
//!             "drop_statement",
//!             sequence(vec![
//!                 keyword("DROP"),
//!                 keyword("TABLE"),
//!                 reference("TableReferenceSegment"),
//!                 keyword("PURGE"),
//!             ]),
//!         ),
//!     );
//! let strict = builder.publish().unwrap();
//!
//! let tree = Parser::new(&strict).unwrap().parse_str("DROP TABLE t PURGE");
//! assert_eq!(tree.unparsable_count(), 0);
//!
//! // The parent is unaffected.
//! let tree = Parser::new(&ansi).unwrap().parse_str("DROP TABLE t PURGE");
//! assert_eq!(tree.unparsable_count(), 1);
//! ```

pub mod dialect;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod segments;

pub use dialect::{Dialect, DialectBuilder, DialectError, DialectRegistry, Rule};
pub use grammar::Grammar;
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, ParseTree, Parser, ParserConfig};
pub use segments::{NodeSegment, RawSegment, Segment};
