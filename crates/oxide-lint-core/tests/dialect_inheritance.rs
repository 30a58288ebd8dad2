//! Tests for deriving dialects from a parent.

mod common;
use common::*;

use oxide_lint_core::dialect::{DialectRegistry, KeywordClass, Rule};
use oxide_lint_core::grammar::{keyword, reference, sequence, typed};
use oxide_lint_core::{Dialect, DialectError, TokenKind};

fn purge_only(parent: &Dialect) -> Dialect {
    let mut builder = parent.derive("purge_only");
    builder
        .add_keywords(KeywordClass::Unreserved, ["PURGE"])
        .replace(
            "DropStatementSegment",
            Rule::segment(
                "drop_statement",
                sequence(vec![
                    keyword("DROP"),
                    keyword("TABLE"),
                    reference("TableReferenceSegment"),
                    keyword("PURGE"),
                ]),
            ),
        );
    builder.publish().unwrap()
}

#[test]
fn replacement_is_total() {
    let parent = ansi();
    let child = purge_only(&parent);

    assert_eq!(parse_with(&child, "DROP TABLE t PURGE").unparsable_count(), 0);
    // Forms only the parent's rule accepted are gone.
    assert_eq!(parse_with(&child, "DROP TABLE t").unparsable_count(), 1);
    assert_eq!(parse_with(&child, "DROP VIEW v").unparsable_count(), 1);
}

#[test]
fn parent_is_unaffected_by_child() {
    let parent = ansi();
    let names_before: Vec<String> = parent.rule_names().map(String::from).collect();
    let _child = purge_only(&parent);

    assert_eq!(parse_with(&parent, "DROP VIEW v").unparsable_count(), 0);
    assert_eq!(parse_with(&parent, "DROP TABLE t PURGE").unparsable_count(), 1);
    assert!(!parent.keywords().is_keyword("PURGE"));
    let names_after: Vec<String> = parent.rule_names().map(String::from).collect();
    assert_eq!(names_before, names_after);
}

#[test]
fn inherited_rules_resolve_references_in_child() {
    let parent = ansi();
    let mut builder = parent.derive("backticks");
    builder.replace(
        "QuotedIdentifierSegment",
        Rule::grammar(typed(TokenKind::BackQuote, "quoted_identifier")),
    );
    let child = builder.publish().unwrap();

    // SelectStatementSegment is inherited unchanged but now sees backticks.
    let tree = parse_with(&child, "SELECT `a` FROM `t`");
    assert_eq!(tree.unparsable_count(), 0);
    assert_eq!(codes(&tree, "quoted_identifier"), vec!["`a`", "`t`"]);
    assert_eq!(parse_with(&child, "SELECT \"a\" FROM t").unparsable_count(), 1);

    assert_eq!(parse_with(&parent, "SELECT `a` FROM `t`").unparsable_count(), 1);
}

#[test]
fn reserving_a_word_in_child() {
    let parent = ansi();
    let mut builder = parent.derive("strict");
    builder.add_keywords(KeywordClass::Reserved, ["STAFF"]);
    let child = builder.publish().unwrap();

    assert_eq!(parse_with(&child, "SELECT a FROM staff").unparsable_count(), 1);
    assert_eq!(parse_with(&parent, "SELECT a FROM staff").unparsable_count(), 0);
}

#[test]
fn grandchild_inherits_through_child() {
    let child = purge_only(&ansi());
    let grandchild = child.derive("grandchild").publish().unwrap();
    assert_eq!(grandchild.parent(), Some("purge_only"));
    assert_eq!(parse_with(&grandchild, "DROP TABLE t PURGE").unparsable_count(), 0);
}

#[test]
fn removing_a_used_keyword_fails_publish() {
    let mut builder = ansi().derive("broken");
    builder.remove_keywords(KeywordClass::Unreserved, ["VIEW"]);
    let err = builder.publish().unwrap_err();
    assert_eq!(
        err,
        DialectError::UnknownKeyword {
            dialect: "broken".into(),
            rule: "DropStatementSegment".into(),
            keyword: "VIEW".into(),
        }
    );
}

#[test]
fn publish_reports_every_problem() {
    let mut builder = ansi().derive("broken");
    builder
        .bind("SelectStatementSegment", Rule::grammar(keyword("SELECT")))
        .replace("MergeStatementSegment", Rule::grammar(keyword("SELECT")))
        .bind("UseStatementSegment", Rule::grammar(reference("Nowhere")));
    let Err(DialectError::Multiple(errors)) = builder.publish() else {
        panic!("Expected several errors");
    };
    assert_eq!(errors.len(), 3);
    assert!(errors
        .iter()
        .any(|e| matches!(e, DialectError::DuplicateRule { name, .. } if name == "SelectStatementSegment")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, DialectError::ReplaceMissing { name, .. } if name == "MergeStatementSegment")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, DialectError::UnknownReference { reference, .. } if reference == "Nowhere")));
}

#[test]
fn removing_a_bracket_pair_in_use_fails_publish() {
    let mut builder = ansi().derive("no_square");
    builder.remove_bracket_pair("square");
    let err = builder.publish().unwrap_err();
    assert!(matches!(
        err,
        DialectError::UnknownBracketKind { ref rule, ref kind, .. }
            if rule == "ArrayAccessorSegment" && kind == "square"
    ));
}

#[test]
fn registry_selects_by_name() {
    let parent = ansi();
    let child = purge_only(&parent);

    let mut registry = DialectRegistry::new();
    assert!(registry.register(parent.clone()).is_none());
    assert!(registry.register(child).is_none());
    assert!(registry.register(parent.clone()).is_some());

    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["ansi", "purge_only"]);
    assert!(registry.get("ansi").unwrap().ptr_eq(&parent));
    assert_eq!(
        registry.get("tsql").unwrap_err(),
        DialectError::UnknownDialect("tsql".into())
    );
}
