#![allow(dead_code)]

use oxide_lint_core::{Dialect, ParseTree, Parser, Segment};

pub fn hive() -> Dialect {
    oxide_lint_hive::dialect().unwrap_or_else(|e| panic!("Hive dialect failed to publish: {e}"))
}

pub fn parse(sql: &str) -> ParseTree {
    let tree = Parser::new(&hive())
        .unwrap_or_else(|e| panic!("Failed to build parser: {e}"))
        .parse_str(sql);
    assert_eq!(
        tree.raw(),
        sql,
        "Tree does not reproduce its input.\n{}",
        tree.to_tree_string()
    );
    tree
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

/// `bracketed` nodes of one kind.
pub fn brackets<'a>(tree: &'a ParseTree, kind: &str) -> Vec<&'a Segment> {
    tree.find_all("bracketed")
        .into_iter()
        .filter(|b| b.bracket_kind() == Some(kind))
        .collect()
}
