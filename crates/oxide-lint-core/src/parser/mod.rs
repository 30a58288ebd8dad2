//! SQL Parser
//!
//! A grammar matching engine driven by the rule tables of a
//! [`crate::dialect::Dialect`], and a file-level parser that splits the
//! token stream into statements and recovers from statements it cannot
//! match.

mod config;
mod engine;
mod error;
mod parser;

pub use config::{ParserConfig, DEFAULT_MAX_DEPTH};
pub use engine::{match_grammar, MatchResult};
pub use error::{ParseError, Result};
pub use parser::{ParseTree, Parser, DELIMITER_RULE, FILE_TYPE, STATEMENT_RULE};
