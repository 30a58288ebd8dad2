//! SQL Dialect support.
//!
//! A [`Dialect`] is a named table of grammar rules plus the keyword and
//! bracket tables those rules are matched with. Dialects are built through a
//! [`DialectBuilder`] and become immutable once published:
//!
//! ```rust
//! use oxide_lint_core::dialect::{ansi, KeywordClass, Rule};
//! use oxide_lint_core::grammar::{keyword, reference, sequence};
//!
//! let parent = ansi::dialect().unwrap();
//! let mut child = parent.derive("ansi_with_use");
//! child.add_keywords(KeywordClass::Unreserved, ["USE"]);
//! child.bind(
//!     "UseStatementSegment",
//!     Rule::segment(
//!         "use_statement",
//!         sequence(vec![keyword("USE"), reference("DatabaseReferenceSegment")]),
//!     ),
//! );
//! let child = child.publish().unwrap();
//!
//! assert!(child.rule("UseStatementSegment").is_some());
//! assert!(parent.rule("UseStatementSegment").is_none());
//! ```
//!
//! Named references are resolved against the dialect used for matching, so
//! a rule inherited from the parent picks up the child's replacements.

pub mod ansi;
mod brackets;
mod error;
mod keywords;
mod registry;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::grammar::Grammar;

pub use brackets::{BracketDef, BracketPairs};
pub use error::{DialectError, Result};
pub use keywords::{KeywordClass, KeywordSets};
pub use registry::DialectRegistry;

/// A named grammar rule.
///
/// A rule with a type tag produces a node of that type; a rule without one
/// splices its matched segments into the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    type_tag: Option<String>,
    match_grammar: Grammar,
    parse_grammar: Option<Grammar>,
}

impl Rule {
    /// A rule that produces no node of its own.
    #[must_use]
    pub const fn grammar(grammar: Grammar) -> Self {
        Self {
            type_tag: None,
            match_grammar: grammar,
            parse_grammar: None,
        }
    }

    /// A rule that wraps its match in a node of type `type_tag`.
    #[must_use]
    pub fn segment(type_tag: &str, match_grammar: Grammar) -> Self {
        Self {
            type_tag: Some(type_tag.to_string()),
            match_grammar,
            parse_grammar: None,
        }
    }

    /// Adds a full grammar that decomposes the region the match grammar
    /// recognized.
    #[must_use]
    pub fn with_parse(mut self, parse_grammar: Grammar) -> Self {
        self.parse_grammar = Some(parse_grammar);
        self
    }

    /// The node type, if the rule produces a node.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }

    /// The recognition grammar.
    #[must_use]
    pub const fn match_grammar(&self) -> &Grammar {
        &self.match_grammar
    }

    /// The full grammar, if it differs from the recognition grammar.
    #[must_use]
    pub const fn parse_grammar(&self) -> Option<&Grammar> {
        self.parse_grammar.as_ref()
    }

    /// Iterates over the grammars of this rule.
    pub fn grammars(&self) -> impl Iterator<Item = &Grammar> {
        std::iter::once(&self.match_grammar).chain(self.parse_grammar.as_ref())
    }
}

#[derive(Debug, Clone)]
struct DialectData {
    name: String,
    parent: Option<String>,
    rules: BTreeMap<String, Rule>,
    keywords: KeywordSets,
    brackets: BracketPairs,
}

/// A published, immutable dialect.
///
/// Cloning is cheap and a `Dialect` can be shared between threads.
#[derive(Debug, Clone)]
pub struct Dialect {
    inner: Arc<DialectData>,
}

impl Dialect {
    /// Starts building a dialect from scratch.
    #[must_use]
    pub fn builder(name: &str) -> DialectBuilder {
        DialectBuilder {
            data: DialectData {
                name: name.to_string(),
                parent: None,
                rules: BTreeMap::new(),
                keywords: KeywordSets::new(),
                brackets: BracketPairs::new(),
            },
            errors: Vec::new(),
        }
    }

    /// Starts building a child dialect from an independent copy of this
    /// dialect's rules, keywords and bracket pairs.
    #[must_use]
    pub fn derive(&self, name: &str) -> DialectBuilder {
        let mut data = (*self.inner).clone();
        data.name = name.to_string();
        data.parent = Some(self.inner.name.clone());
        DialectBuilder {
            data,
            errors: Vec::new(),
        }
    }

    /// The dialect name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The name of the dialect this one was derived from.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.inner.parent.as_deref()
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.inner.rules.get(name)
    }

    /// Looks up a rule, returning the stored name alongside it.
    pub(crate) fn rule_entry(&self, name: &str) -> Option<(&str, &Rule)> {
        self.inner
            .rules
            .get_key_value(name)
            .map(|(key, rule)| (key.as_str(), rule))
    }

    /// All rule names, sorted.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.inner.rules.keys().map(String::as_str)
    }

    /// The keyword sets.
    #[must_use]
    pub fn keywords(&self) -> &KeywordSets {
        &self.inner.keywords
    }

    /// The bracket pairs.
    #[must_use]
    pub fn brackets(&self) -> &BracketPairs {
        &self.inner.brackets
    }

    /// Returns true if both handles point at the same published dialect.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// The build phase of a dialect.
///
/// Operations record configuration errors instead of failing immediately;
/// [`DialectBuilder::publish`] reports all of them together with the
/// problems found by validation.
#[derive(Debug, Clone)]
pub struct DialectBuilder {
    data: DialectData,
    errors: Vec<DialectError>,
}

impl DialectBuilder {
    /// The name of the dialect being built.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Adds a new rule. Binding a name that already exists is an error.
    pub fn bind(&mut self, name: &str, rule: Rule) -> &mut Self {
        if self.data.rules.contains_key(name) {
            self.errors.push(DialectError::DuplicateRule {
                dialect: self.data.name.clone(),
                name: name.to_string(),
            });
        } else {
            self.data.rules.insert(name.to_string(), rule);
        }
        self
    }

    /// Adds several new rules.
    pub fn bind_all<'n>(&mut self, rules: impl IntoIterator<Item = (&'n str, Rule)>) -> &mut Self {
        for (name, rule) in rules {
            self.bind(name, rule);
        }
        self
    }

    /// Replaces an existing rule entirely. Nothing of the old rule is kept.
    pub fn replace(&mut self, name: &str, rule: Rule) -> &mut Self {
        match self.data.rules.get_mut(name) {
            Some(existing) => *existing = rule,
            None => self.errors.push(DialectError::ReplaceMissing {
                dialect: self.data.name.clone(),
                name: name.to_string(),
            }),
        }
        self
    }

    /// The rule currently bound to `name`, so a replacement can re-state a
    /// modified copy of it.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.data.rules.get(name)
    }

    /// Adds words to a keyword set.
    pub fn add_keywords<I, S>(&mut self, class: KeywordClass, words: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.data.keywords.extend(class, words);
        self
    }

    /// Removes words from a keyword set.
    pub fn remove_keywords<I, S>(&mut self, class: KeywordClass, words: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.data.keywords.remove(class, words);
        self
    }

    /// Empties a keyword set.
    pub fn clear_keywords(&mut self, class: KeywordClass) -> &mut Self {
        self.data.keywords.clear(class);
        self
    }

    /// Adds a bracket pair, replacing an existing pair of the same kind.
    pub fn add_bracket_pair(&mut self, def: BracketDef) -> &mut Self {
        self.data.brackets.insert(def);
        self
    }

    /// Removes the bracket pair of the given kind.
    pub fn remove_bracket_pair(&mut self, kind: &str) -> &mut Self {
        self.data.brackets.remove(kind);
        self
    }

    /// Checks every rule and bracket pair and returns the problems found.
    fn validate(&self) -> Vec<DialectError> {
        let data = &self.data;
        let mut errors = Vec::new();

        for (name, rule) in &data.rules {
            for grammar in rule.grammars() {
                for reference in grammar.references() {
                    if !data.rules.contains_key(reference) {
                        errors.push(DialectError::UnknownReference {
                            dialect: data.name.clone(),
                            rule: name.clone(),
                            reference: reference.to_string(),
                        });
                    }
                }
                for kind in grammar.bracket_kinds() {
                    if data.brackets.get(kind).is_none() {
                        errors.push(DialectError::UnknownBracketKind {
                            dialect: data.name.clone(),
                            rule: name.clone(),
                            kind: kind.to_string(),
                        });
                    }
                }
                for word in grammar.keywords() {
                    if !data.keywords.is_keyword(word) {
                        errors.push(DialectError::UnknownKeyword {
                            dialect: data.name.clone(),
                            rule: name.clone(),
                            keyword: word.to_string(),
                        });
                    }
                }
            }
        }

        for pair in data.brackets.iter() {
            for reference in [&pair.open, &pair.close] {
                if !data.rules.contains_key(reference) {
                    errors.push(DialectError::UnknownReference {
                        dialect: data.name.clone(),
                        rule: format!("bracket pair '{}'", pair.kind),
                        reference: reference.clone(),
                    });
                }
            }
        }

        errors
    }

    /// Validates the dialect and freezes it.
    ///
    /// # Errors
    ///
    /// Returns every error recorded during the build phase plus every
    /// unresolved reference, unknown bracket kind and unknown keyword.
    pub fn publish(mut self) -> Result<Dialect> {
        let mut errors = std::mem::take(&mut self.errors);
        errors.extend(self.validate());
        if let Some(err) = DialectError::from_many(errors) {
            return Err(err);
        }

        debug!(
            "Published dialect '{}' ({} rules, {} keywords, {} bracket pairs)",
            self.data.name,
            self.data.rules.len(),
            self.data.keywords.len(),
            self.data.brackets.len()
        );

        Ok(Dialect {
            inner: Arc::new(self.data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{bracketed, keyword, reference, sequence, symbol};

    fn base() -> Dialect {
        let mut builder = Dialect::builder("base");
        builder
            .add_keywords(KeywordClass::Reserved, ["SELECT"])
            .bind("CommaSegment", Rule::grammar(symbol(",", "comma")))
            .bind(
                "SelectKeywordGrammar",
                Rule::grammar(keyword("SELECT")),
            );
        builder.publish().unwrap()
    }

    #[test]
    fn test_builder_publishes() {
        let dialect = base();
        assert_eq!(dialect.name(), "base");
        assert_eq!(dialect.parent(), None);
        assert_eq!(
            dialect.rule_names().collect::<Vec<_>>(),
            vec!["CommaSegment", "SelectKeywordGrammar"]
        );
    }

    #[test]
    fn test_derive_records_parent() {
        let child = base().derive("child").publish().unwrap();
        assert_eq!(child.name(), "child");
        assert_eq!(child.parent(), Some("base"));
        assert!(child.rule("CommaSegment").is_some());
    }

    #[test]
    fn test_duplicate_bind_is_an_error() {
        let mut builder = base().derive("child");
        builder.bind("CommaSegment", Rule::grammar(symbol(";", "semicolon")));
        let err = builder.publish().unwrap_err();
        assert_eq!(
            err,
            DialectError::DuplicateRule {
                dialect: "child".into(),
                name: "CommaSegment".into()
            }
        );
    }

    #[test]
    fn test_replace_missing_is_an_error() {
        let mut builder = base().derive("child");
        builder.replace("NoSuchRule", Rule::grammar(symbol(";", "semicolon")));
        assert!(matches!(
            builder.publish(),
            Err(DialectError::ReplaceMissing { ref name, .. }) if name == "NoSuchRule"
        ));
    }

    #[test]
    fn test_validation_collects_all_problems() {
        let mut builder = Dialect::builder("broken");
        builder.bind(
            "Broken",
            Rule::segment(
                "broken",
                sequence(vec![
                    keyword("FROB"),
                    reference("Missing"),
                    bracketed(reference("AlsoMissing")),
                ]),
            ),
        );
        match builder.publish() {
            Err(DialectError::Multiple(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.iter().any(|e| matches!(
                    e,
                    DialectError::UnknownKeyword { keyword, .. } if keyword == "FROB"
                )));
                assert!(errors.iter().any(|e| matches!(
                    e,
                    DialectError::UnknownBracketKind { kind, .. } if kind == "round"
                )));
            }
            other => panic!("Expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn test_bracket_pair_rules_are_validated() {
        let mut builder = base().derive("child");
        builder.add_bracket_pair(BracketDef::new("round", "Open", "CommaSegment", true));
        let err = builder.publish().unwrap_err();
        assert!(matches!(
            err,
            DialectError::UnknownReference { ref reference, .. } if reference == "Open"
        ));
    }

    #[test]
    fn test_rule_accessors() {
        let rule = Rule::segment("drop_statement", keyword("DROP"))
            .with_parse(sequence(vec![keyword("DROP"), keyword("TABLE")]));
        assert_eq!(rule.type_tag(), Some("drop_statement"));
        assert_eq!(rule.grammars().count(), 2);
        assert!(Rule::grammar(keyword("X")).type_tag().is_none());
    }

    #[test]
    fn test_dialect_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dialect>();
    }
}
