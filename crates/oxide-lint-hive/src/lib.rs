//! # oxide-lint-hive
//!
//! Apache Hive dialect for `oxide-lint-core`, derived from the ANSI base
//! dialect.
//!
//! # How Hive differs from ANSI
//!
//! - **Identifier quoting**: Hive quotes identifiers with backticks;
//!   double quotes delimit string literals, like single quotes.
//! - **[Complex types]**: `ARRAY<...>`, `MAP<...>`, `STRUCT<...>` and
//!   `UNIONTYPE<...>` use angle brackets. `<` and `>` only act as
//!   brackets inside a data type; everywhere else they stay comparison
//!   operators.
//! - **[Storage clauses]**: `CREATE TABLE` accepts `ROW FORMAT`,
//!   `STORED AS`/`STORED BY`, `LOCATION`, `TBLPROPERTIES`, partitioning,
//!   bucketing and skew clauses.
//! - **[DML]**: `LOAD DATA`, `INSERT OVERWRITE`, partition specs and
//!   multi-table inserts (`FROM src INSERT ... SELECT ...`).
//! - **Database statements**: `CREATE`/`ALTER`/`DROP DATABASE` with
//!   `DBPROPERTIES` and `MANAGEDLOCATION`, and `USE`.
//!
//! [Complex types]: https://cwiki.apache.org/confluence/display/Hive/LanguageManual+Types#LanguageManualTypes-ComplexTypes
//! [Storage clauses]: https://cwiki.apache.org/confluence/display/Hive/LanguageManual+DDL#LanguageManualDDL-CreateTable
//! [DML]: https://cwiki.apache.org/confluence/display/Hive/LanguageManual+DML
//!
//! ## Example
//!
//! ```rust
//! use oxide_lint_core::parser::Parser;
//!
//! let hive = oxide_lint_hive::dialect().unwrap();
//! let tree = Parser::new(&hive)
//!     .unwrap()
//!     .parse_str("CREATE TABLE t (a INT) STORED AS PARQUET LOCATION '/x'");
//!
//! assert_eq!(tree.unparsable_count(), 0);
//! assert_eq!(tree.find_all("file_format")[0].code(), "PARQUET");
//! ```

mod dialect;
pub mod keywords;

use oxide_lint_core::dialect::{ansi, Dialect, DialectRegistry, Result};

pub use dialect::{builder, publish, HIVE};

/// Builds the ANSI dialect and publishes Hive on top of it.
///
/// # Errors
///
/// Returns a [`oxide_lint_core::DialectError`] if either rule table is
/// inconsistent.
pub fn dialect() -> Result<Dialect> {
    publish(&ansi::dialect()?)
}

/// A registry holding the `ansi` and `hive` dialects.
///
/// # Errors
///
/// Returns a [`oxide_lint_core::DialectError`] if either rule table is
/// inconsistent.
pub fn registry() -> Result<DialectRegistry> {
    let ansi = ansi::dialect()?;
    let hive = publish(&ansi)?;
    let mut registry = DialectRegistry::new();
    registry.register(ansi);
    registry.register(hive);
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names() {
        let registry = registry().unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["ansi", "hive"]);
        assert_eq!(registry.get(HIVE).unwrap().parent(), Some("ansi"));
    }
}
