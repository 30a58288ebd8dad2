//! Token types produced by the lexer.

use serde::Serialize;

use super::Span;

/// The lexical class of a token.
///
/// The lexer never decides whether a word is a keyword: that depends on the
/// dialect and on the grammar position, so every bare word is a [`TokenKind::Word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Keyword candidate or naked identifier (e.g. `SELECT`, `col_a`).
    Word,
    /// Single-quoted text (e.g. `'hello'`), quotes included.
    SingleQuote,
    /// Double-quoted text (e.g. `"hello"`), quotes included.
    DoubleQuote,
    /// Back-quoted text (e.g. `` `name` ``), quotes included.
    BackQuote,
    /// Numeric literal (e.g. `42`, `3.14`, `1e10`).
    Number,

    // Trivia
    /// Spaces and tabs.
    Whitespace,
    /// `\n` or `\r\n`.
    Newline,
    /// `-- ...` up to (not including) the newline.
    InlineComment,
    /// `/* ... */`
    BlockComment,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,

    // Operators
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// ||
    Concat,
    /// |
    Pipe,
    /// &
    Ampersand,
    /// ^
    Caret,
    /// ~
    Tilde,
    /// ?
    Question,
    /// @
    At,
    /// $
    Dollar,

    /// Input the lexer could not classify, including unterminated quotes
    /// and comments.
    Unlexable,
}

impl TokenKind {
    /// Returns true for whitespace, newlines and comments.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::Newline | Self::InlineComment | Self::BlockComment
        )
    }

    /// Returns true for comments.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::InlineComment | Self::BlockComment)
    }

    /// The segment type a token of this kind gets when no grammar claims it.
    #[must_use]
    pub const fn default_type(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::SingleQuote => "single_quote",
            Self::DoubleQuote => "double_quote",
            Self::BackQuote => "back_quote",
            Self::Number => "numeric_literal",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::InlineComment => "inline_comment",
            Self::BlockComment => "block_comment",
            Self::LeftParen | Self::LeftBracket | Self::LeftBrace => "start_bracket",
            Self::RightParen | Self::RightBracket | Self::RightBrace => "end_bracket",
            Self::Comma => "comma",
            Self::Semicolon => "statement_terminator",
            Self::Dot => "dot",
            Self::Colon => "colon",
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => {
                "comparison_operator"
            }
            Self::Plus
            | Self::Minus
            | Self::Star
            | Self::Slash
            | Self::Percent
            | Self::Concat
            | Self::Pipe
            | Self::Ampersand
            | Self::Caret
            | Self::Tilde => "operator",
            Self::Question | Self::At | Self::Dollar => "symbol",
            Self::Unlexable => "unlexable",
        }
    }
}

/// A token with its verbatim text and its span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexical class.
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub raw: String,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, raw: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            raw: raw.into(),
            span,
        }
    }

    /// Returns true if this token is whitespace or a comment.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Returns true if this is a word equal to `keyword`, ignoring case.
    #[must_use]
    pub fn is_word(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.raw.eq_ignore_ascii_case(keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivia_kinds() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Newline.is_trivia());
        assert!(TokenKind::BlockComment.is_trivia());
        assert!(!TokenKind::Word.is_trivia());
        assert!(!TokenKind::Semicolon.is_trivia());
    }

    #[test]
    fn test_token_is_word() {
        let select = Token::new(TokenKind::Word, "select", Span::new(0, 6));
        let quoted = Token::new(TokenKind::SingleQuote, "'select'", Span::new(0, 8));
        assert!(select.is_word("SELECT"));
        assert!(!select.is_word("FROM"));
        assert!(!quoted.is_word("select"));
    }

    #[test]
    fn test_default_types() {
        assert_eq!(TokenKind::Lt.default_type(), "comparison_operator");
        assert_eq!(TokenKind::Semicolon.default_type(), "statement_terminator");
        assert_eq!(TokenKind::Word.default_type(), "word");
    }
}
