//! Tests for sharing dialects and parsers across threads.

mod common;
use common::*;

use std::thread;

use oxide_lint_core::{Dialect, Parser};

const SQL: &str = "SELECT a, COUNT(*) FROM t JOIN u ON t.id = u.id GROUP BY a;\n\
                   DELETE FROM t WHERE a IS NULL;\nNOT SQL AT ALL;";

#[test]
fn dialect_and_parser_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Dialect>();
    assert_send_sync::<Parser>();
}

#[test]
fn one_parser_shared_by_many_threads() {
    let dialect = ansi();
    let parser = Parser::new(&dialect).unwrap();
    let expected = parser.parse_str(SQL);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| parser.parse_str(SQL)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn dialect_clones_share_rules_across_threads() {
    let dialect = ansi();
    let shared = &dialect;
    thread::scope(|scope| {
        for _ in 0..4 {
            let local = dialect.clone();
            scope.spawn(move || {
                assert!(local.ptr_eq(shared));
                let tree = parse_with(&local, SQL);
                assert_eq!(tree.unparsable_count(), 1);
                assert_eq!(tree.find_all("statement").len(), 3);
            });
        }
    });
}
