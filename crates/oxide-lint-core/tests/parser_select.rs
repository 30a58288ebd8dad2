//! Tests for SELECT statements in the ANSI dialect.

mod common;
use common::*;

#[test]
fn select_all_clauses() {
    let tree = parse_clean(
        "SELECT dept, COUNT(*) AS n FROM staff WHERE salary > 100 \
         GROUP BY dept HAVING COUNT(*) > 2 ORDER BY n DESC NULLS LAST LIMIT 10 OFFSET 5",
    );
    for clause in [
        "select_clause",
        "from_clause",
        "where_clause",
        "groupby_clause",
        "having_clause",
        "orderby_clause",
        "limit_clause",
    ] {
        assert_eq!(tree.find_all(clause).len(), 1, "missing {clause}");
    }
    assert_eq!(codes(&tree, "function"), vec!["COUNT ( * )", "COUNT ( * )"]);
    assert_eq!(codes(&tree, "alias_expression"), vec!["AS n"]);
    assert_eq!(codes(&tree, "limit_clause"), vec!["LIMIT 10 OFFSET 5"]);
}

#[test]
fn select_keywords_case_insensitive() {
    let tree = parse_clean("select A from T where B = true");
    assert_eq!(tree.find_all("select_statement").len(), 1);
    assert_eq!(codes(&tree, "boolean_literal"), vec!["true"]);
}

#[test]
fn select_qualified_wildcard_and_using_join() {
    let tree = parse_clean("SELECT t.*, u.name FROM t JOIN u USING (id)");
    assert_eq!(codes(&tree, "wildcard_expression"), vec!["t . *"]);
    assert_eq!(codes(&tree, "column_reference"), vec!["u . name", "id"]);
    assert_eq!(codes(&tree, "join_clause"), vec!["JOIN u USING ( id )"]);
}

#[test]
fn select_outer_joins() {
    let tree = parse_clean(
        "SELECT a.x FROM a LEFT OUTER JOIN b ON a.id = b.id CROSS JOIN c INNER JOIN d ON TRUE",
    );
    assert_eq!(tree.find_all("join_clause").len(), 3);
    assert_eq!(tree.find_all("table_expression").len(), 4);
}

#[test]
fn select_case_expression() {
    let tree = parse_clean("SELECT CASE WHEN a IS NULL THEN 0 ELSE a END AS b FROM t");
    assert_eq!(tree.find_all("case_expression").len(), 1);
    assert_eq!(tree.find_all("null_literal").len(), 1);
    assert_eq!(codes(&tree, "alias_expression"), vec!["AS b"]);
}

#[test]
fn select_predicates() {
    let tree = parse_clean(
        "SELECT a FROM t WHERE a IN (1, 2) AND b NOT BETWEEN 1 AND 5 \
         OR c LIKE 'x%' AND d IS NOT NULL",
    );
    assert_eq!(tree.find_all("where_clause").len(), 1);
    assert_eq!(codes(&tree, "quoted_literal"), vec!["'x%'"]);
    assert_eq!(tree.find_all("numeric_literal").len(), 4);
}

#[test]
fn select_arithmetic_and_sign() {
    let tree = parse_clean("SELECT -a + 2 * (b - 1) || 'x' FROM t");
    assert_eq!(codes(&tree, "sign_indicator"), vec!["-"]);
    assert_eq!(codes(&tree, "binary_operator"), vec!["+", "*", "-", "||"]);
}

#[test]
fn select_subqueries_and_array_access() {
    let tree = parse_clean("SELECT x[1] FROM (SELECT x FROM t) AS s WHERE y IN (SELECT y FROM u)");
    assert_eq!(tree.find_all("select_statement").len(), 3);

    let accessor = single(&tree, "array_accessor");
    assert_eq!(accessor.code(), "[ 1 ]");
    assert_eq!(accessor.children()[0].bracket_kind(), Some("square"));
}

#[test]
fn select_quoted_identifier_may_be_reserved() {
    let tree = parse_clean("SELECT \"select\" FROM t");
    assert_eq!(codes(&tree, "quoted_identifier"), vec!["\"select\""]);
}

#[test]
fn select_reserved_word_is_not_an_identifier() {
    let tree = parse("SELECT a FROM select");
    assert_eq!(tree.unparsable_count(), 1);
    assert!(tree.find_all("select_statement").is_empty());
}

#[test]
fn select_unreserved_keyword_as_identifier() {
    let tree = parse_clean("SELECT key, comment FROM schema.view");
    assert_eq!(codes(&tree, "table_reference"), vec!["schema . view"]);
    assert_eq!(tree.find_all("select_target_element").len(), 2);
}

#[test]
fn select_keeps_comments_and_whitespace() {
    let sql = "SELECT a -- first\n  , b /* second */ FROM t\n";
    let tree = parse_clean(sql);
    assert_eq!(codes(&tree, "select_target_element"), vec!["a", "b"]);
    assert_eq!(codes(&tree, "inline_comment"), vec!["-- first"]);
    assert_eq!(codes(&tree, "block_comment"), vec!["/* second */"]);
}
