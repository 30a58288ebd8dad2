//! SQL Lexer/Tokenizer
//!
//! A hand-written lexer that turns SQL source into a lossless stream of
//! tokens for the grammar matcher.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;
