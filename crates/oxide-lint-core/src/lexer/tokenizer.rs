//! Lossless SQL tokenizer.

use super::{Span, Token, TokenKind};

/// A lexer that splits SQL source into a flat token stream.
///
/// Nothing is skipped: whitespace, newlines and comments become trivia
/// tokens, so concatenating the `raw` text of every token gives back the
/// input unchanged.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Creates a token covering `start..pos`.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            &self.input[self.start..self.pos],
            Span::new(self.start, self.pos),
        )
    }

    /// Consumes the rest of the input as a single unlexable token.
    fn unterminated(&mut self) -> Token {
        self.pos = self.input.len();
        self.make_token(TokenKind::Unlexable)
    }

    fn scan_whitespace(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_whitespace() && c != '\n' && !self.at_crlf())
        {
            self.advance();
        }
        self.make_token(TokenKind::Whitespace)
    }

    fn at_crlf(&self) -> bool {
        self.peek() == Some('\r') && self.peek_next() == Some('\n')
    }

    /// Scans `-- ...` up to the end of the line.
    fn scan_inline_comment(&mut self) -> Token {
        while self.peek().is_some_and(|c| c != '\n') && !self.at_crlf() {
            self.advance();
        }
        self.make_token(TokenKind::InlineComment)
    }

    /// Scans `/* ... */`.
    fn scan_block_comment(&mut self) -> Token {
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return self.make_token(TokenKind::BlockComment);
                }
                Some(_) => {}
                None => return self.make_token(TokenKind::Unlexable),
            }
        }
    }

    /// Scans a word (keyword candidate or naked identifier).
    fn scan_word(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        self.make_token(TokenKind::Word)
    }

    /// Scans quoted text. A doubled quote or a backslash escapes the next
    /// character.
    fn scan_quoted(&mut self, quote: char, kind: TokenKind) -> Token {
        self.advance(); // consume opening quote

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return self.make_token(kind);
                    }
                }
                Some('\\') if quote != '`' => {
                    if self.advance().is_none() {
                        return self.unterminated();
                    }
                }
                Some(_) => {}
                None => return self.unterminated(),
            }
        }
    }

    /// Scans a number (integer, decimal or exponent form).
    fn scan_number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal point
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let mark = self.pos;
            self.advance(); // consume e/E
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            } else {
                // `1e` is a number followed by a word, not an exponent.
                self.pos = mark;
            }
        }

        // Words like `1st` are identifiers in most dialects.
        if self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
            return self.scan_word();
        }

        self.make_token(TokenKind::Number)
    }

    /// Consumes one more character if it equals `expected`, returning
    /// `compound` in that case and `single` otherwise.
    fn either(&mut self, expected: char, compound: TokenKind, single: TokenKind) -> Token {
        if self.peek() == Some(expected) {
            self.advance();
            self.make_token(compound)
        } else {
            self.make_token(single)
        }
    }

    /// Scans the next token, or returns `None` at end of input.
    #[must_use]
    pub fn next_token(&mut self) -> Option<Token> {
        self.start = self.pos;
        let c = self.peek()?;

        let token = match c {
            '\n' => {
                self.advance();
                self.make_token(TokenKind::Newline)
            }
            '\r' if self.peek_next() == Some('\n') => {
                self.advance();
                self.advance();
                self.make_token(TokenKind::Newline)
            }
            c if c.is_whitespace() => self.scan_whitespace(),
            '-' if self.peek_next() == Some('-') => self.scan_inline_comment(),
            '/' if self.peek_next() == Some('*') => self.scan_block_comment(),

            '\'' => self.scan_quoted('\'', TokenKind::SingleQuote),
            '"' => self.scan_quoted('"', TokenKind::DoubleQuote),
            '`' => self.scan_quoted('`', TokenKind::BackQuote),

            c if c.is_ascii_digit() => self.scan_number(),
            '.' if self.peek_next().is_some_and(|c| c.is_ascii_digit()) => {
                self.advance();
                self.scan_number()
            }
            c if c.is_alphabetic() || c == '_' => self.scan_word(),

            _ => {
                self.advance();
                match c {
                    '(' => self.make_token(TokenKind::LeftParen),
                    ')' => self.make_token(TokenKind::RightParen),
                    '[' => self.make_token(TokenKind::LeftBracket),
                    ']' => self.make_token(TokenKind::RightBracket),
                    '{' => self.make_token(TokenKind::LeftBrace),
                    '}' => self.make_token(TokenKind::RightBrace),
                    ',' => self.make_token(TokenKind::Comma),
                    ';' => self.make_token(TokenKind::Semicolon),
                    '.' => self.make_token(TokenKind::Dot),
                    ':' => self.make_token(TokenKind::Colon),
                    '=' => self.make_token(TokenKind::Eq),
                    // `<<` and `>>` are never fused: nested angle brackets
                    // close one `>` at a time.
                    '<' => match self.peek() {
                        Some('=') => {
                            self.advance();
                            self.make_token(TokenKind::LtEq)
                        }
                        Some('>') => {
                            self.advance();
                            self.make_token(TokenKind::NotEq)
                        }
                        _ => self.make_token(TokenKind::Lt),
                    },
                    '>' => self.either('=', TokenKind::GtEq, TokenKind::Gt),
                    '!' => self.either('=', TokenKind::NotEq, TokenKind::Unlexable),
                    '|' => self.either('|', TokenKind::Concat, TokenKind::Pipe),
                    '+' => self.make_token(TokenKind::Plus),
                    '-' => self.make_token(TokenKind::Minus),
                    '*' => self.make_token(TokenKind::Star),
                    '/' => self.make_token(TokenKind::Slash),
                    '%' => self.make_token(TokenKind::Percent),
                    '&' => self.make_token(TokenKind::Ampersand),
                    '^' => self.make_token(TokenKind::Caret),
                    '~' => self.make_token(TokenKind::Tilde),
                    '?' => self.make_token(TokenKind::Question),
                    '@' => self.make_token(TokenKind::At),
                    '$' => self.make_token(TokenKind::Dollar),
                    _ => self.make_token(TokenKind::Unlexable),
                }
            }
        };

        Some(token)
    }

    /// Tokenizes the entire input and returns all tokens.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn code_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .into_iter()
            .filter(|t| !t.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    fn reassemble(input: &str) -> String {
        tokenize(input).into_iter().map(|t| t.raw).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_whitespace_is_kept() {
        assert_eq!(
            token_kinds("  \n\t "),
            vec![
                TokenKind::Whitespace,
                TokenKind::Newline,
                TokenKind::Whitespace
            ]
        );
    }

    #[test]
    fn test_crlf_newline() {
        let tokens = tokenize("a\r\nb");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].raw, "\r\n");
    }

    #[test]
    fn test_single_line_comment() {
        assert_eq!(
            token_kinds("SELECT -- comment\nFROM"),
            vec![
                TokenKind::Word,
                TokenKind::Whitespace,
                TokenKind::InlineComment,
                TokenKind::Newline,
                TokenKind::Word,
            ]
        );
    }

    #[test]
    fn test_multi_line_comment() {
        let tokens = tokenize("SELECT /* a\ncomment */ FROM");
        assert_eq!(tokens[2].kind, TokenKind::BlockComment);
        assert_eq!(tokens[2].raw, "/* a\ncomment */");
    }

    #[test]
    fn test_unterminated_comment_is_unlexable() {
        let tokens = tokenize("a /* never closed");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Unlexable));
    }

    #[test]
    fn test_words_are_not_classified() {
        assert_eq!(
            code_kinds("select foo _bar"),
            vec![TokenKind::Word, TokenKind::Word, TokenKind::Word]
        );
    }

    #[test]
    fn test_quoted_kinds() {
        assert_eq!(
            code_kinds(r#"'a' "b" `c`"#),
            vec![
                TokenKind::SingleQuote,
                TokenKind::DoubleQuote,
                TokenKind::BackQuote
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let tokens = tokenize(r"'it''s' 'a\'b'");
        assert_eq!(tokens[0].raw, "'it''s'");
        assert_eq!(tokens[2].raw, r"'a\'b'");
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = tokenize("SELECT 'oops; SELECT 1");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].kind, TokenKind::Unlexable);
        assert_eq!(tokens[2].raw, "'oops; SELECT 1");
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("42 3.14 1e10 2.5e-3 .5");
        let numbers: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.raw.as_str())
            .collect();
        assert_eq!(numbers, vec!["42", "3.14", "1e10", "2.5e-3", ".5"]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            code_kinds("+ - * / % = != <> < <= > >= ||"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Concat,
            ]
        );
    }

    #[test]
    fn test_angle_brackets_are_not_fused() {
        assert_eq!(
            code_kinds("ARRAY<ARRAY<INT>>"),
            vec![
                TokenKind::Word,
                TokenKind::Lt,
                TokenKind::Word,
                TokenKind::Lt,
                TokenKind::Word,
                TokenKind::Gt,
                TokenKind::Gt,
            ]
        );
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            code_kinds("( ) [ ] , ; . :"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::Colon,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("SELECT id");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(6, 7));
        assert_eq!(tokens[2].span, Span::new(7, 9));
    }

    #[test]
    fn test_lossless() {
        for input in [
            "SELECT a, b FROM t WHERE x <> 'y' -- trailing\n;",
            "CREATE TABLE t (a INT) STORED AS PARQUET LOCATION '/x'",
            "weird ! chars § and 'unterminated",
            "/* c */\r\n\tLOAD DATA INPATH \"p\"",
        ] {
            assert_eq!(reassemble(input), input);
        }
    }
}
