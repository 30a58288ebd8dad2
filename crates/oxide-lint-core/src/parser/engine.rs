//! The grammar matching engine.
//!
//! Every match works on a half-open token range `[position, bound)`. A
//! successful result covers exactly `tokens[position..remainder]`: leading
//! trivia is included only when something after it matched, and a result
//! never ends with trivia.

use std::collections::HashMap;

use tracing::{debug, error, trace, warn};

use crate::dialect::{BracketDef, Dialect, Rule};
use crate::grammar::{Grammar, Terminal};
use crate::lexer::{Token, TokenKind};
use crate::segments::{NodeSegment, RawSegment, Segment};

use super::ParserConfig;

/// The outcome of matching a grammar at a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Segments covering `tokens[position..remainder]`.
    pub matched: Vec<Segment>,
    /// Index of the first token not consumed.
    pub remainder: usize,
    /// Whether the grammar matched.
    pub success: bool,
}

impl MatchResult {
    const fn fail(position: usize) -> Self {
        Self {
            matched: Vec::new(),
            remainder: position,
            success: false,
        }
    }

    const fn empty(position: usize) -> Self {
        Self {
            matched: Vec::new(),
            remainder: position,
            success: true,
        }
    }

    fn ok(matched: Vec<Segment>, remainder: usize) -> Self {
        Self {
            matched,
            remainder,
            success: true,
        }
    }

    /// Returns true if the match succeeded and consumed at least one token.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.success && !self.matched.is_empty()
    }
}

/// Matches `grammar` against `tokens` starting at `position` with the
/// default configuration.
///
/// ```rust
/// use oxide_lint_core::dialect::ansi;
/// use oxide_lint_core::grammar::{keyword, reference, sequence};
/// use oxide_lint_core::lexer::Lexer;
/// use oxide_lint_core::parser::match_grammar;
///
/// let dialect = ansi::dialect().unwrap();
/// let tokens = Lexer::new("DROP TABLE IF EXISTS t").tokenize();
/// let result = match_grammar(
///     &dialect,
///     &tokens,
///     0,
///     &sequence(vec![keyword("DROP"), keyword("TABLE"), reference("IfExistsGrammar")]),
/// );
/// assert!(result.success);
/// assert_eq!(result.remainder, 7);
/// ```
#[must_use]
pub fn match_grammar(
    dialect: &Dialect,
    tokens: &[Token],
    position: usize,
    grammar: &Grammar,
) -> MatchResult {
    let config = ParserConfig::default();
    let mut matcher = Matcher::new(dialect, tokens, config);
    matcher.match_at(grammar, position, tokens.len())
}

/// Matching state for one parse: the token stream, the rule cache and the
/// current nesting depth.
pub(crate) struct Matcher<'a> {
    dialect: &'a Dialect,
    tokens: &'a [Token],
    config: ParserConfig,
    depth: usize,
    memo: HashMap<(&'a str, usize, usize), MatchResult>,
}

impl<'a> Matcher<'a> {
    pub(crate) fn new(dialect: &'a Dialect, tokens: &'a [Token], config: ParserConfig) -> Self {
        Self {
            dialect,
            tokens,
            config,
            depth: 0,
            memo: HashMap::new(),
        }
    }

    /// Index of the first code token in `[position, bound)`, or `bound`.
    pub(crate) fn next_code(&self, position: usize, bound: usize) -> usize {
        (position..bound)
            .find(|&i| !self.tokens[i].is_trivia())
            .unwrap_or(bound)
    }

    /// Untyped leaves for `tokens[from..to]`.
    pub(crate) fn leaves(&self, from: usize, to: usize) -> Vec<Segment> {
        self.tokens[from..to]
            .iter()
            .map(|token| Segment::Raw(RawSegment::untyped(token)))
            .collect()
    }

    /// Matches a grammar in `[position, bound)`.
    pub(crate) fn match_at(&mut self, grammar: &Grammar, position: usize, bound: usize) -> MatchResult {
        match grammar {
            Grammar::Terminal(terminal) => self.match_terminal(terminal, position, bound),
            Grammar::Sequence(items) => self.match_sequence(items, position, bound),
            Grammar::Optional(inner) => {
                let result = self.match_at(inner, position, bound);
                if result.success {
                    result
                } else {
                    MatchResult::empty(position)
                }
            }
            Grammar::OneOf(options) => {
                for option in options {
                    let result = self.match_at(option, position, bound);
                    if result.is_match() {
                        return result;
                    }
                }
                MatchResult::fail(position)
            }
            Grammar::AnyNumberOf { inner, min, max } => {
                self.match_repeated(inner, *min, *max, position, bound)
            }
            Grammar::Delimited {
                item,
                delimiter,
                allow_trailing,
                min_delimiters,
            } => self.match_delimited(
                item,
                delimiter,
                *allow_trailing,
                *min_delimiters,
                position,
                bound,
            ),
            Grammar::Bracketed { inner, kind } => {
                self.match_bracketed(inner, kind, position, bound)
            }
            Grammar::Ref(name) => self.match_rule(name, position, bound),
            Grammar::StartsWith(inner) => self.match_starts_with(inner, position, bound),
            Grammar::GreedyUntil(terminator) => {
                self.match_greedy_until(terminator, position, bound)
            }
        }
    }

    fn match_terminal(&self, terminal: &Terminal, position: usize, bound: usize) -> MatchResult {
        let at = self.next_code(position, bound);
        if at >= bound {
            return MatchResult::fail(position);
        }
        let token = &self.tokens[at];

        let type_tag = match terminal {
            Terminal::Keyword(word) => token.is_word(word).then_some("keyword"),
            Terminal::Identifier { type_tag } => (token.kind == TokenKind::Word
                && !self.dialect.keywords().is_reserved(&token.raw))
            .then_some(type_tag.as_str()),
            Terminal::Kind { kind, type_tag } => {
                (token.kind == *kind).then_some(type_tag.as_str())
            }
            Terminal::Symbol { raw, type_tag } => (token.raw == *raw).then_some(type_tag.as_str()),
        };

        match type_tag {
            Some(type_tag) => {
                let mut matched = self.leaves(position, at);
                matched.push(Segment::Raw(RawSegment::from_token(token, type_tag)));
                MatchResult::ok(matched, at + 1)
            }
            None => MatchResult::fail(position),
        }
    }

    fn match_sequence(&mut self, items: &[Grammar], position: usize, bound: usize) -> MatchResult {
        let mut matched = Vec::new();
        let mut cursor = position;
        for item in items {
            let result = self.match_at(item, cursor, bound);
            if !result.success {
                return MatchResult::fail(position);
            }
            if !result.matched.is_empty() {
                matched.extend(result.matched);
                cursor = result.remainder;
            }
        }
        MatchResult::ok(matched, cursor)
    }

    fn match_repeated(
        &mut self,
        inner: &Grammar,
        min: usize,
        max: Option<usize>,
        position: usize,
        bound: usize,
    ) -> MatchResult {
        let mut matched = Vec::new();
        let mut cursor = position;
        let mut count = 0;
        while max.is_none_or(|max| count < max) {
            let result = self.match_at(inner, cursor, bound);
            if !result.is_match() {
                break;
            }
            matched.extend(result.matched);
            cursor = result.remainder;
            count += 1;
        }
        if count < min {
            MatchResult::fail(position)
        } else {
            MatchResult::ok(matched, cursor)
        }
    }

    fn match_delimited(
        &mut self,
        item: &Grammar,
        delimiter: &Grammar,
        allow_trailing: bool,
        min_delimiters: usize,
        position: usize,
        bound: usize,
    ) -> MatchResult {
        let first = self.match_at(item, position, bound);
        if !first.is_match() {
            return MatchResult::fail(position);
        }
        let mut matched = first.matched;
        let mut cursor = first.remainder;
        let mut delimiters = 0;

        loop {
            let delim = self.match_at(delimiter, cursor, bound);
            if !delim.is_match() {
                break;
            }
            let next = self.match_at(item, delim.remainder, bound);
            if next.is_match() {
                matched.extend(delim.matched);
                matched.extend(next.matched);
                cursor = next.remainder;
                delimiters += 1;
                continue;
            }
            if allow_trailing {
                matched.extend(delim.matched);
                cursor = delim.remainder;
                delimiters += 1;
            }
            break;
        }

        if delimiters < min_delimiters {
            MatchResult::fail(position)
        } else {
            MatchResult::ok(matched, cursor)
        }
    }

    fn match_bracketed(&mut self, inner: &Grammar, kind: &str, position: usize, bound: usize) -> MatchResult {
        let Some(def) = self.dialect.brackets().get(kind) else {
            error!(
                "Bracket kind '{kind}' is not defined in dialect '{}'",
                self.dialect.name()
            );
            return MatchResult::fail(position);
        };

        let at = self.next_code(position, bound);
        let open = self.match_rule(&def.open, at, bound);
        if !open.is_match() {
            return MatchResult::fail(position);
        }

        let Some(close_at) = self.find_close(def, open.remainder, bound) else {
            return MatchResult::fail(position);
        };

        let content = self.match_at(inner, open.remainder, close_at);
        if !content.success || self.next_code(content.remainder, close_at) != close_at {
            return MatchResult::fail(position);
        }

        let close = self.match_rule(&def.close, content.remainder, bound);
        if !close.is_match() {
            return MatchResult::fail(position);
        }

        let mut children = open.matched;
        children.extend(content.matched);
        children.extend(close.matched);

        let mut matched = self.leaves(position, at);
        matched.push(Segment::Node(NodeSegment::bracketed(kind, children)));
        MatchResult::ok(matched, close.remainder)
    }

    /// Finds the close token matching an already consumed opener, counting
    /// nesting of this bracket kind only.
    fn find_close(&mut self, def: &BracketDef, from: usize, bound: usize) -> Option<usize> {
        let mut depth = 0usize;
        for i in from..bound {
            if self.tokens[i].is_trivia() {
                continue;
            }
            if self.match_rule(&def.open, i, i + 1).is_match() {
                depth += 1;
            } else if self.match_rule(&def.close, i, i + 1).is_match() {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
        }
        None
    }

    /// Matches the named rule in `[position, bound)`.
    pub(crate) fn match_rule(&mut self, name: &str, position: usize, bound: usize) -> MatchResult {
        let Some((key, rule)) = self.dialect.rule_entry(name) else {
            error!(
                "Rule '{name}' is not defined in dialect '{}'",
                self.dialect.name()
            );
            return MatchResult::fail(position);
        };

        if self.config.memoize {
            if let Some(cached) = self.memo.get(&(key, position, bound)) {
                return cached.clone();
            }
        }

        if self.depth >= self.config.max_depth {
            warn!(
                "Maximum rule depth {} reached while matching '{name}' at token {position}",
                self.config.max_depth
            );
            return MatchResult::fail(position);
        }

        trace!(rule = name, position, bound, "Matching rule");
        self.depth += 1;
        let result = self.match_rule_body(key, rule, position, bound);
        self.depth -= 1;

        if self.config.memoize {
            self.memo.insert((key, position, bound), result.clone());
        }
        result
    }

    fn match_rule_body(&mut self, name: &str, rule: &'a Rule, position: usize, bound: usize) -> MatchResult {
        let at = self.next_code(position, bound);
        let recognized = self.match_at(rule.match_grammar(), at, bound);
        if !recognized.success {
            return MatchResult::fail(position);
        }

        let Some(type_tag) = rule.type_tag() else {
            // Grammar rules splice their segments into the caller.
            if recognized.matched.is_empty() {
                return MatchResult::empty(position);
            }
            let children = match rule.parse_grammar() {
                Some(parse) => self.decompose(name, parse, at, recognized.remainder),
                None => recognized.matched,
            };
            let mut matched = self.leaves(position, at);
            matched.extend(children);
            return MatchResult::ok(matched, recognized.remainder);
        };

        if recognized.matched.is_empty() {
            return MatchResult::fail(position);
        }

        let children = match rule.parse_grammar() {
            Some(parse) => self.decompose(name, parse, at, recognized.remainder),
            None => recognized.matched,
        };
        let mut matched = self.leaves(position, at);
        matched.push(Segment::Node(NodeSegment::new(type_tag, children)));
        MatchResult::ok(matched, recognized.remainder)
    }

    /// Runs the full grammar over a recognized region. A region it cannot
    /// consume completely is kept verbatim in an `unparsable` node.
    fn decompose(&mut self, name: &str, parse: &Grammar, from: usize, to: usize) -> Vec<Segment> {
        let full = self.match_at(parse, from, to);
        if full.is_match() && full.remainder == to {
            return full.matched;
        }
        debug!(
            "Rule '{name}' recognized tokens {from}..{to} but could not decompose them: {:?}",
            self.tokens[from..to]
                .iter()
                .map(|t| t.raw.as_str())
                .collect::<String>()
        );
        vec![Segment::Node(NodeSegment::unparsable(&self.tokens[from..to]))]
    }

    fn match_starts_with(&mut self, inner: &Grammar, position: usize, bound: usize) -> MatchResult {
        let prefix = self.match_at(inner, position, bound);
        if !prefix.is_match() {
            return MatchResult::fail(position);
        }
        let Some(last) = (prefix.remainder..bound)
            .rev()
            .find(|&i| !self.tokens[i].is_trivia())
        else {
            return prefix;
        };
        MatchResult::ok(self.leaves(position, last + 1), last + 1)
    }

    fn match_greedy_until(&mut self, terminator: &Grammar, position: usize, bound: usize) -> MatchResult {
        let mut stop = None;
        for i in position..bound {
            if self.tokens[i].is_trivia() {
                continue;
            }
            if self.match_at(terminator, i, bound).is_match() {
                break;
            }
            stop = Some(i + 1);
        }
        match stop {
            Some(stop) => MatchResult::ok(self.leaves(position, stop), stop),
            None => MatchResult::fail(position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::ansi;
    use crate::grammar::{
        any_number_of, bracketed, comma_separated, greedy_until, keyword, one_of, reference,
        sequence, starts_with,
    };
    use crate::lexer::Lexer;

    fn run(sql: &str, grammar: &Grammar) -> (Vec<Token>, MatchResult) {
        let dialect = ansi::dialect().unwrap();
        let tokens = Lexer::new(sql).tokenize();
        let result = match_grammar(&dialect, &tokens, 0, grammar);
        (tokens, result)
    }

    fn raw(result: &MatchResult) -> String {
        result.matched.iter().map(Segment::raw).collect()
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let (_, result) = run("select", &keyword("SELECT"));
        assert!(result.is_match());
        assert_eq!(result.matched[0].type_tag(), "keyword");
    }

    #[test]
    fn test_leading_trivia_is_kept_trailing_is_not() {
        let (_, result) = run("  DROP  ", &keyword("DROP"));
        assert!(result.success);
        assert_eq!(raw(&result), "  DROP");
        assert_eq!(result.remainder, 2);
    }

    #[test]
    fn test_sequence_failure_consumes_nothing() {
        let (_, result) = run("DROP VIEW", &sequence(vec![keyword("DROP"), keyword("TABLE")]));
        assert!(!result.success);
        assert_eq!(result.remainder, 0);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_optional_items_are_skipped() {
        let grammar = sequence(vec![
            keyword("DROP"),
            keyword("TEMPORARY").optional(),
            keyword("TABLE"),
        ]);
        let (_, result) = run("DROP TABLE", &grammar);
        assert!(result.success);
        assert_eq!(raw(&result), "DROP TABLE");
    }

    #[test]
    fn test_one_of_takes_first_success() {
        let grammar = one_of(vec![
            keyword("DROP"),
            sequence(vec![keyword("DROP"), keyword("TABLE")]),
        ]);
        let (_, result) = run("DROP TABLE", &grammar);
        assert!(result.success);
        assert_eq!(raw(&result), "DROP");
    }

    #[test]
    fn test_one_of_ignores_empty_options() {
        let grammar = one_of(vec![keyword("TEMPORARY").optional(), keyword("DROP")]);
        let (_, result) = run("DROP", &grammar);
        assert!(result.success);
        assert_eq!(raw(&result), "DROP");
    }

    #[test]
    fn test_any_number_of_respects_bounds() {
        let word = reference("NakedIdentifierSegment");
        let grammar = Grammar::AnyNumberOf {
            inner: Box::new(word.clone()),
            min: 0,
            max: Some(2),
        };
        let (_, result) = run("a b c", &grammar);
        assert_eq!(raw(&result), "a b");

        let at_least_four = Grammar::AnyNumberOf {
            inner: Box::new(word),
            min: 4,
            max: None,
        };
        let (_, result) = run("a b c", &at_least_four);
        assert!(!result.success);

        let (_, result) = run("SELECT", &any_number_of(reference("NakedIdentifierSegment")));
        assert!(result.success);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_delimited_backtracks_trailing_delimiter() {
        let grammar = comma_separated(reference("NakedIdentifierSegment"));
        let (_, result) = run("a, b,", &grammar);
        assert!(result.success);
        assert_eq!(raw(&result), "a, b");

        let (_, result) = run("a, b,", &grammar.clone().allow_trailing());
        assert_eq!(raw(&result), "a, b,");

        let (_, result) = run("a", &grammar.min_delimiters(1));
        assert!(!result.success);
    }

    #[test]
    fn test_bracketed_requires_full_content() {
        let grammar = bracketed(comma_separated(reference("NumericLiteralSegment")));
        let (_, result) = run("(1, 2)", &grammar);
        assert!(result.is_match());
        assert_eq!(result.matched[0].bracket_kind(), Some("round"));
        assert_eq!(result.matched[0].raw(), "(1, 2)");

        let (_, result) = run("(1, 2 3)", &grammar);
        assert!(!result.success);
    }

    #[test]
    fn test_bracketed_nesting() {
        let grammar = bracketed(reference("ExpressionSegment"));
        let (_, result) = run("((1 + 2) * 3)", &grammar);
        assert!(result.is_match());
        assert_eq!(result.remainder, 13);
    }

    #[test]
    fn test_empty_brackets_need_optional_content() {
        let (_, result) = run("()", &bracketed(reference("NumericLiteralSegment")));
        assert!(!result.success);
        let (_, result) = run("()", &bracketed(reference("NumericLiteralSegment").optional()));
        assert!(result.is_match());
    }

    #[test]
    fn test_unknown_bracket_kind_fails() {
        let (_, result) = run("<1>", &crate::grammar::angle_bracketed(reference("NumericLiteralSegment")));
        assert!(!result.success);
    }

    #[test]
    fn test_starts_with_extends_to_bound() {
        let (tokens, result) = run("DROP whatever you like ", &starts_with(keyword("DROP")));
        assert!(result.success);
        assert_eq!(result.remainder, tokens.len() - 1);
        assert_eq!(raw(&result), "DROP whatever you like");
    }

    #[test]
    fn test_greedy_until_stops_before_terminator() {
        let (_, result) = run("a b ; c", &greedy_until(reference("SemicolonSegment")));
        assert!(result.success);
        assert_eq!(raw(&result), "a b");

        let (_, result) = run("; c", &greedy_until(reference("SemicolonSegment")));
        assert!(!result.success);
    }

    #[test]
    fn test_segment_rule_wraps_node() {
        let (_, result) = run(" t", &reference("TableReferenceSegment"));
        assert!(result.success);
        assert_eq!(result.matched.len(), 2);
        assert!(result.matched[0].is_trivia());
        assert_eq!(result.matched[1].type_tag(), "table_reference");
    }

    #[test]
    fn test_reserved_word_is_not_identifier() {
        let (_, result) = run("SELECT", &reference("NakedIdentifierSegment"));
        assert!(!result.success);
        let (_, result) = run("comment", &reference("NakedIdentifierSegment"));
        assert!(result.success);
    }

    #[test]
    fn test_depth_guard_fails_instead_of_overflowing() {
        let dialect = ansi::dialect().unwrap();
        let tokens = Lexer::new("((((((1))))))").tokenize();
        let mut matcher = Matcher::new(&dialect, &tokens, ParserConfig::new().max_depth(4));
        let result = matcher.match_at(&reference("ExpressionSegment"), 0, tokens.len());
        assert!(!result.success);
    }

    #[test]
    fn test_memoized_and_plain_results_agree() {
        let dialect = ansi::dialect().unwrap();
        let tokens = Lexer::new("SELECT a, count(*) FROM t WHERE b > 1").tokenize();
        let grammar = reference("SelectStatementSegment");
        let mut cached = Matcher::new(&dialect, &tokens, ParserConfig::new());
        let mut plain = Matcher::new(&dialect, &tokens, ParserConfig::new().memoize(false));
        assert_eq!(
            cached.match_at(&grammar, 0, tokens.len()),
            plain.match_at(&grammar, 0, tokens.len())
        );
    }
}
