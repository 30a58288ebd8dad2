#![allow(dead_code)]

use oxide_lint_core::dialect::ansi;
use oxide_lint_core::{Dialect, ParseTree, Parser, Segment};

pub fn ansi() -> Dialect {
    ansi::dialect().unwrap_or_else(|e| panic!("ANSI dialect failed to publish: {e}"))
}

pub fn parse_with(dialect: &Dialect, sql: &str) -> ParseTree {
    let tree = Parser::new(dialect)
        .unwrap_or_else(|e| panic!("Failed to build parser: {e}"))
        .parse_str(sql);
    assert_lossless(sql, &tree);
    tree
}

pub fn parse(sql: &str) -> ParseTree {
    parse_with(&ansi(), sql)
}

/// Parses and asserts that nothing ended up unparsable.
pub fn parse_clean(sql: &str) -> ParseTree {
    let tree = parse(sql);
    assert_eq!(
        tree.unparsable_count(),
        0,
        "Unexpected unparsable region in: {sql}\n{}",
        tree.to_tree_string()
    );
    tree
}

pub fn assert_lossless(sql: &str, tree: &ParseTree) {
    assert_eq!(
        tree.raw(),
        sql,
        "Tree does not reproduce its input.\n{}",
        tree.to_tree_string()
    );
}

/// Code text of every segment of the given type.
pub fn codes(tree: &ParseTree, type_tag: &str) -> Vec<String> {
    tree.find_all(type_tag).into_iter().map(Segment::code).collect()
}

pub fn single<'a>(tree: &'a ParseTree, type_tag: &str) -> &'a Segment {
    let found = tree.find_all(type_tag);
    assert_eq!(
        found.len(),
        1,
        "Expected exactly one '{type_tag}'\n{}",
        tree.to_tree_string()
    );
    found[0]
}
