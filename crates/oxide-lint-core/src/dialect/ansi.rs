//! The ANSI base dialect.
//!
//! Every other dialect is derived from this one. It covers the common core
//! of SQL: queries, `INSERT`/`DELETE`, `CREATE TABLE`/`CREATE DATABASE` and
//! `DROP`.

use crate::grammar::{
    any_number_of, bracketed, bracketed_with, comma_separated, delimited, greedy_until,
    identifier, keyword, one_of, one_or_more, reference, sequence, symbol, typed,
};
use crate::lexer::TokenKind;

use super::{BracketDef, Dialect, DialectBuilder, KeywordClass, Result, Rule};

/// Words that can never be naked identifiers.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "ALL",
    "AND",
    "AS",
    "BETWEEN",
    "BY",
    "CASE",
    "CHECK",
    "CONSTRAINT",
    "CREATE",
    "CROSS",
    "DEFAULT",
    "DELETE",
    "DISTINCT",
    "DROP",
    "ELSE",
    "END",
    "EXISTS",
    "FALSE",
    "FOREIGN",
    "FROM",
    "FULL",
    "GROUP",
    "HAVING",
    "IF",
    "IN",
    "INNER",
    "INSERT",
    "INTO",
    "IS",
    "JOIN",
    "LEFT",
    "LIKE",
    "LIMIT",
    "NOT",
    "NULL",
    "ON",
    "OR",
    "ORDER",
    "OUTER",
    "PRIMARY",
    "REFERENCES",
    "RIGHT",
    "SELECT",
    "SET",
    "TABLE",
    "THEN",
    "TRUE",
    "UNION",
    "UNIQUE",
    "USING",
    "VALUES",
    "WHEN",
    "WHERE",
    "WITH",
];

/// Words with a grammatical role that may still name objects.
pub const UNRESERVED_KEYWORDS: &[&str] = &[
    "ASC",
    "CASCADE",
    "DATABASE",
    "DESC",
    "FIRST",
    "KEY",
    "LAST",
    "NULLS",
    "OFFSET",
    "RESTRICT",
    "SCHEMA",
    "VIEW",
    "COMMENT",
];

/// Returns the ANSI dialect in its build phase, ready to be published or
/// extended.
#[must_use]
pub fn builder() -> DialectBuilder {
    let mut builder = Dialect::builder("ansi");
    builder
        .add_keywords(KeywordClass::Reserved, RESERVED_KEYWORDS)
        .add_keywords(KeywordClass::Unreserved, UNRESERVED_KEYWORDS)
        .add_bracket_pair(BracketDef::new(
            "round",
            "StartBracketSegment",
            "EndBracketSegment",
            true,
        ))
        .add_bracket_pair(BracketDef::new(
            "square",
            "StartSquareBracketSegment",
            "EndSquareBracketSegment",
            true,
        ));

    bind_symbols(&mut builder);
    bind_literals(&mut builder);
    bind_references(&mut builder);
    bind_expressions(&mut builder);
    bind_queries(&mut builder);
    bind_ddl(&mut builder);
    bind_statements(&mut builder);
    builder
}

/// Builds and publishes the ANSI dialect.
///
/// # Errors
///
/// Returns a [`super::DialectError`] if the rule tables are inconsistent.
pub fn dialect() -> Result<Dialect> {
    builder().publish()
}

fn bind_symbols(builder: &mut DialectBuilder) {
    builder.bind_all([
        (
            "SemicolonSegment",
            Rule::grammar(symbol(";", "statement_terminator")),
        ),
        ("DelimiterSegment", Rule::grammar(reference("SemicolonSegment"))),
        ("CommaSegment", Rule::grammar(symbol(",", "comma"))),
        ("DotSegment", Rule::grammar(symbol(".", "dot"))),
        ("ColonSegment", Rule::grammar(symbol(":", "colon"))),
        ("StarSegment", Rule::grammar(symbol("*", "star"))),
        ("StartBracketSegment", Rule::grammar(symbol("(", "start_bracket"))),
        ("EndBracketSegment", Rule::grammar(symbol(")", "end_bracket"))),
        (
            "StartSquareBracketSegment",
            Rule::grammar(symbol("[", "start_square_bracket")),
        ),
        (
            "EndSquareBracketSegment",
            Rule::grammar(symbol("]", "end_square_bracket")),
        ),
        (
            "EqualsSegment",
            Rule::grammar(symbol("=", "comparison_operator")),
        ),
        (
            "LessThanSegment",
            Rule::grammar(symbol("<", "comparison_operator")),
        ),
        (
            "GreaterThanSegment",
            Rule::grammar(symbol(">", "comparison_operator")),
        ),
        (
            "LessThanOrEqualToSegment",
            Rule::grammar(symbol("<=", "comparison_operator")),
        ),
        (
            "GreaterThanOrEqualToSegment",
            Rule::grammar(symbol(">=", "comparison_operator")),
        ),
        (
            "NotEqualToSegment",
            Rule::grammar(one_of(vec![
                symbol("<>", "comparison_operator"),
                symbol("!=", "comparison_operator"),
            ])),
        ),
        ("PlusSegment", Rule::grammar(symbol("+", "binary_operator"))),
        ("MinusSegment", Rule::grammar(symbol("-", "binary_operator"))),
        ("MultiplySegment", Rule::grammar(symbol("*", "binary_operator"))),
        ("DivideSegment", Rule::grammar(symbol("/", "binary_operator"))),
        ("ModuloSegment", Rule::grammar(symbol("%", "binary_operator"))),
        ("ConcatSegment", Rule::grammar(symbol("||", "binary_operator"))),
    ]);
}

fn bind_literals(builder: &mut DialectBuilder) {
    builder.bind_all([
        (
            "QuotedLiteralSegment",
            Rule::grammar(typed(TokenKind::SingleQuote, "quoted_literal")),
        ),
        (
            "NumericLiteralSegment",
            Rule::grammar(typed(TokenKind::Number, "numeric_literal")),
        ),
        (
            "BooleanLiteralGrammar",
            Rule::segment(
                "boolean_literal",
                one_of(vec![keyword("TRUE"), keyword("FALSE")]),
            ),
        ),
        (
            "NullLiteralSegment",
            Rule::segment("null_literal", keyword("NULL")),
        ),
        (
            "LiteralGrammar",
            Rule::grammar(one_of(vec![
                reference("QuotedLiteralSegment"),
                reference("NumericLiteralSegment"),
                reference("BooleanLiteralGrammar"),
                reference("NullLiteralSegment"),
            ])),
        ),
    ]);
}

fn bind_references(builder: &mut DialectBuilder) {
    builder.bind_all([
        (
            "NakedIdentifierSegment",
            Rule::grammar(identifier("naked_identifier")),
        ),
        (
            "QuotedIdentifierSegment",
            Rule::grammar(typed(TokenKind::DoubleQuote, "quoted_identifier")),
        ),
        (
            "SingleIdentifierGrammar",
            Rule::grammar(one_of(vec![
                reference("NakedIdentifierSegment"),
                reference("QuotedIdentifierSegment"),
            ])),
        ),
        (
            "TableReferenceSegment",
            Rule::segment(
                "table_reference",
                delimited(reference("SingleIdentifierGrammar"), reference("DotSegment")),
            ),
        ),
        (
            "DatabaseReferenceSegment",
            Rule::segment("database_reference", reference("SingleIdentifierGrammar")),
        ),
        (
            "ColumnReferenceSegment",
            Rule::segment(
                "column_reference",
                delimited(reference("SingleIdentifierGrammar"), reference("DotSegment")),
            ),
        ),
        (
            "AliasExpressionSegment",
            Rule::segment(
                "alias_expression",
                sequence(vec![
                    keyword("AS").optional(),
                    reference("SingleIdentifierGrammar"),
                ]),
            ),
        ),
        (
            "BracketedColumnReferenceListGrammar",
            Rule::grammar(bracketed(comma_separated(reference(
                "ColumnReferenceSegment",
            )))),
        ),
    ]);
}

fn bind_expressions(builder: &mut DialectBuilder) {
    builder.bind_all([
        (
            "ArithmeticBinaryOperatorGrammar",
            Rule::grammar(one_of(vec![
                reference("PlusSegment"),
                reference("MinusSegment"),
                reference("MultiplySegment"),
                reference("DivideSegment"),
                reference("ModuloSegment"),
                reference("ConcatSegment"),
            ])),
        ),
        (
            "ComparisonOperatorGrammar",
            Rule::grammar(one_of(vec![
                reference("EqualsSegment"),
                reference("NotEqualToSegment"),
                reference("LessThanOrEqualToSegment"),
                reference("GreaterThanOrEqualToSegment"),
                reference("LessThanSegment"),
                reference("GreaterThanSegment"),
            ])),
        ),
        (
            "BooleanBinaryOperatorGrammar",
            Rule::grammar(one_of(vec![keyword("AND"), keyword("OR")])),
        ),
        (
            "BinaryOperatorGrammar",
            Rule::grammar(one_of(vec![
                reference("ArithmeticBinaryOperatorGrammar"),
                reference("ComparisonOperatorGrammar"),
                reference("BooleanBinaryOperatorGrammar"),
            ])),
        ),
        (
            "UnaryOperatorGrammar",
            Rule::grammar(one_of(vec![
                symbol("-", "sign_indicator"),
                symbol("+", "sign_indicator"),
                keyword("NOT"),
            ])),
        ),
        (
            "FunctionNameSegment",
            Rule::grammar(identifier("function_name")),
        ),
        (
            "FunctionSegment",
            Rule::segment(
                "function",
                sequence(vec![
                    reference("FunctionNameSegment"),
                    bracketed(
                        one_of(vec![
                            reference("StarSegment"),
                            sequence(vec![
                                keyword("DISTINCT").optional(),
                                comma_separated(reference("ExpressionSegment")),
                            ]),
                        ])
                        .optional(),
                    ),
                ]),
            ),
        ),
        (
            "CaseExpressionSegment",
            Rule::segment(
                "case_expression",
                sequence(vec![
                    keyword("CASE"),
                    reference("ExpressionSegment").optional(),
                    one_or_more(sequence(vec![
                        keyword("WHEN"),
                        reference("ExpressionSegment"),
                        keyword("THEN"),
                        reference("ExpressionSegment"),
                    ])),
                    sequence(vec![keyword("ELSE"), reference("ExpressionSegment")]).optional(),
                    keyword("END"),
                ]),
            ),
        ),
        (
            "OperandGrammar",
            Rule::grammar(one_of(vec![
                sequence(vec![
                    reference("UnaryOperatorGrammar"),
                    reference("OperandGrammar"),
                ]),
                reference("LiteralGrammar"),
                reference("CaseExpressionSegment"),
                reference("FunctionSegment"),
                reference("ColumnReferenceSegment"),
                bracketed(one_of(vec![
                    reference("SelectStatementSegment"),
                    reference("ExpressionSegment"),
                ])),
            ])),
        ),
        (
            "ArrayAccessorSegment",
            Rule::segment(
                "array_accessor",
                bracketed_with(reference("ExpressionSegment"), "square"),
            ),
        ),
        (
            "PostfixOperatorGrammar",
            Rule::grammar(one_of(vec![
                reference("ArrayAccessorSegment"),
                sequence(vec![
                    keyword("IS"),
                    keyword("NOT").optional(),
                    reference("NullLiteralSegment"),
                ]),
                sequence(vec![
                    keyword("NOT").optional(),
                    keyword("IN"),
                    bracketed(one_of(vec![
                        reference("SelectStatementSegment"),
                        comma_separated(reference("ExpressionSegment")),
                    ])),
                ]),
                sequence(vec![
                    keyword("NOT").optional(),
                    keyword("BETWEEN"),
                    reference("OperandGrammar"),
                    keyword("AND"),
                    reference("OperandGrammar"),
                ]),
                sequence(vec![
                    keyword("NOT").optional(),
                    keyword("LIKE"),
                    reference("OperandGrammar"),
                ]),
            ])),
        ),
        (
            "ExpressionSegment",
            Rule::segment(
                "expression",
                sequence(vec![
                    reference("OperandGrammar"),
                    any_number_of(one_of(vec![
                        reference("PostfixOperatorGrammar"),
                        sequence(vec![
                            reference("BinaryOperatorGrammar"),
                            reference("OperandGrammar"),
                        ]),
                    ])),
                ]),
            ),
        ),
    ]);
}

fn bind_queries(builder: &mut DialectBuilder) {
    builder.bind_all([
        (
            "WildcardExpressionSegment",
            Rule::segment(
                "wildcard_expression",
                sequence(vec![
                    any_number_of(sequence(vec![
                        reference("SingleIdentifierGrammar"),
                        reference("DotSegment"),
                    ])),
                    reference("StarSegment"),
                ]),
            ),
        ),
        (
            "SelectTargetElementSegment",
            Rule::segment(
                "select_target_element",
                one_of(vec![
                    reference("WildcardExpressionSegment"),
                    sequence(vec![
                        reference("ExpressionSegment"),
                        reference("AliasExpressionSegment").optional(),
                    ]),
                ]),
            ),
        ),
        (
            "SelectClauseSegment",
            Rule::segment(
                "select_clause",
                sequence(vec![
                    keyword("SELECT"),
                    one_of(vec![keyword("DISTINCT"), keyword("ALL")]).optional(),
                    comma_separated(reference("SelectTargetElementSegment")),
                ]),
            ),
        ),
        (
            "TableExpressionSegment",
            Rule::segment(
                "table_expression",
                sequence(vec![
                    one_of(vec![
                        reference("TableReferenceSegment"),
                        bracketed(reference("SelectStatementSegment")),
                    ]),
                    reference("AliasExpressionSegment").optional(),
                ]),
            ),
        ),
        (
            "JoinClauseSegment",
            Rule::segment(
                "join_clause",
                sequence(vec![
                    one_of(vec![
                        keyword("INNER"),
                        sequence(vec![
                            one_of(vec![keyword("LEFT"), keyword("RIGHT"), keyword("FULL")]),
                            keyword("OUTER").optional(),
                        ]),
                        keyword("CROSS"),
                    ])
                    .optional(),
                    keyword("JOIN"),
                    reference("TableExpressionSegment"),
                    one_of(vec![
                        sequence(vec![keyword("ON"), reference("ExpressionSegment")]),
                        sequence(vec![
                            keyword("USING"),
                            reference("BracketedColumnReferenceListGrammar"),
                        ]),
                    ])
                    .optional(),
                ]),
            ),
        ),
        (
            "FromClauseSegment",
            Rule::segment(
                "from_clause",
                sequence(vec![
                    keyword("FROM"),
                    comma_separated(reference("TableExpressionSegment")),
                    any_number_of(reference("JoinClauseSegment")),
                ]),
            ),
        ),
        (
            "WhereClauseSegment",
            Rule::segment(
                "where_clause",
                sequence(vec![keyword("WHERE"), reference("ExpressionSegment")]),
            ),
        ),
        (
            "GroupByClauseSegment",
            Rule::segment(
                "groupby_clause",
                sequence(vec![
                    keyword("GROUP"),
                    keyword("BY"),
                    comma_separated(reference("ExpressionSegment")),
                ]),
            ),
        ),
        (
            "HavingClauseSegment",
            Rule::segment(
                "having_clause",
                sequence(vec![keyword("HAVING"), reference("ExpressionSegment")]),
            ),
        ),
        (
            "OrderByClauseSegment",
            Rule::segment(
                "orderby_clause",
                sequence(vec![
                    keyword("ORDER"),
                    keyword("BY"),
                    comma_separated(sequence(vec![
                        reference("ExpressionSegment"),
                        one_of(vec![keyword("ASC"), keyword("DESC")]).optional(),
                        sequence(vec![
                            keyword("NULLS"),
                            one_of(vec![keyword("FIRST"), keyword("LAST")]),
                        ])
                        .optional(),
                    ])),
                ]),
            ),
        ),
        (
            "LimitClauseSegment",
            Rule::segment(
                "limit_clause",
                sequence(vec![
                    keyword("LIMIT"),
                    reference("NumericLiteralSegment"),
                    sequence(vec![keyword("OFFSET"), reference("NumericLiteralSegment")])
                        .optional(),
                ]),
            ),
        ),
        (
            "SelectStatementSegment",
            Rule::segment(
                "select_statement",
                sequence(vec![
                    reference("SelectClauseSegment"),
                    reference("FromClauseSegment").optional(),
                    reference("WhereClauseSegment").optional(),
                    reference("GroupByClauseSegment").optional(),
                    reference("HavingClauseSegment").optional(),
                    reference("OrderByClauseSegment").optional(),
                    reference("LimitClauseSegment").optional(),
                ]),
            ),
        ),
        (
            "ValuesClauseSegment",
            Rule::segment(
                "values_clause",
                sequence(vec![
                    keyword("VALUES"),
                    comma_separated(bracketed(comma_separated(reference(
                        "ExpressionSegment",
                    )))),
                ]),
            ),
        ),
        (
            "InsertStatementSegment",
            Rule::segment(
                "insert_statement",
                sequence(vec![
                    keyword("INSERT"),
                    keyword("INTO"),
                    reference("TableReferenceSegment"),
                    reference("BracketedColumnReferenceListGrammar").optional(),
                    one_of(vec![
                        reference("ValuesClauseSegment"),
                        reference("SelectStatementSegment"),
                    ]),
                ]),
            ),
        ),
        (
            "DeleteStatementSegment",
            Rule::segment(
                "delete_statement",
                sequence(vec![
                    keyword("DELETE"),
                    keyword("FROM"),
                    reference("TableReferenceSegment"),
                    reference("WhereClauseSegment").optional(),
                ]),
            ),
        ),
    ]);
}

fn bind_ddl(builder: &mut DialectBuilder) {
    builder.bind_all([
        (
            "IfExistsGrammar",
            Rule::grammar(sequence(vec![keyword("IF"), keyword("EXISTS")])),
        ),
        (
            "IfNotExistsGrammar",
            Rule::grammar(sequence(vec![
                keyword("IF"),
                keyword("NOT"),
                keyword("EXISTS"),
            ])),
        ),
        (
            "DatatypeSegment",
            Rule::segment(
                "data_type",
                sequence(vec![
                    identifier("data_type_identifier"),
                    bracketed(comma_separated(reference("NumericLiteralSegment"))).optional(),
                ]),
            ),
        ),
        (
            "ColumnConstraintSegment",
            Rule::segment(
                "column_constraint",
                sequence(vec![
                    sequence(vec![
                        keyword("CONSTRAINT"),
                        reference("SingleIdentifierGrammar"),
                    ])
                    .optional(),
                    one_of(vec![
                        sequence(vec![keyword("NOT").optional(), keyword("NULL")]),
                        sequence(vec![keyword("PRIMARY"), keyword("KEY")]),
                        keyword("UNIQUE"),
                        sequence(vec![
                            keyword("DEFAULT"),
                            one_of(vec![
                                reference("LiteralGrammar"),
                                reference("FunctionSegment"),
                            ]),
                        ]),
                        sequence(vec![
                            keyword("REFERENCES"),
                            reference("TableReferenceSegment"),
                            reference("BracketedColumnReferenceListGrammar").optional(),
                        ]),
                        sequence(vec![keyword("CHECK"), bracketed(reference("ExpressionSegment"))]),
                        sequence(vec![keyword("COMMENT"), reference("QuotedLiteralSegment")]),
                    ]),
                ]),
            ),
        ),
        (
            "ColumnDefinitionSegment",
            Rule::segment(
                "column_definition",
                sequence(vec![
                    reference("SingleIdentifierGrammar"),
                    reference("DatatypeSegment"),
                    any_number_of(reference("ColumnConstraintSegment")),
                ]),
            ),
        ),
        (
            "TableConstraintSegment",
            Rule::segment(
                "table_constraint",
                sequence(vec![
                    sequence(vec![
                        keyword("CONSTRAINT"),
                        reference("SingleIdentifierGrammar"),
                    ])
                    .optional(),
                    one_of(vec![
                        sequence(vec![
                            keyword("PRIMARY"),
                            keyword("KEY"),
                            reference("BracketedColumnReferenceListGrammar"),
                        ]),
                        sequence(vec![
                            keyword("UNIQUE"),
                            reference("BracketedColumnReferenceListGrammar"),
                        ]),
                        sequence(vec![
                            keyword("FOREIGN"),
                            keyword("KEY"),
                            reference("BracketedColumnReferenceListGrammar"),
                            keyword("REFERENCES"),
                            reference("TableReferenceSegment"),
                            reference("BracketedColumnReferenceListGrammar").optional(),
                        ]),
                    ]),
                ]),
            ),
        ),
        (
            "CreateTableStatementSegment",
            Rule::segment(
                "create_table_statement",
                sequence(vec![
                    keyword("CREATE"),
                    keyword("TABLE"),
                    reference("IfNotExistsGrammar").optional(),
                    reference("TableReferenceSegment"),
                    one_of(vec![
                        bracketed(comma_separated(one_of(vec![
                            reference("TableConstraintSegment"),
                            reference("ColumnDefinitionSegment"),
                        ]))),
                        sequence(vec![keyword("AS"), reference("SelectStatementSegment")]),
                    ]),
                ]),
            ),
        ),
        (
            "CreateDatabaseStatementSegment",
            Rule::segment(
                "create_database_statement",
                sequence(vec![
                    keyword("CREATE"),
                    one_of(vec![keyword("DATABASE"), keyword("SCHEMA")]),
                    reference("IfNotExistsGrammar").optional(),
                    reference("DatabaseReferenceSegment"),
                ]),
            ),
        ),
        (
            "DropStatementSegment",
            Rule::segment(
                "drop_statement",
                sequence(vec![
                    keyword("DROP"),
                    one_of(vec![keyword("TABLE"), keyword("VIEW")]),
                    reference("IfExistsGrammar").optional(),
                    reference("TableReferenceSegment"),
                    one_of(vec![keyword("RESTRICT"), keyword("CASCADE")]).optional(),
                ]),
            ),
        ),
    ]);
}

fn bind_statements(builder: &mut DialectBuilder) {
    builder.bind(
        "StatementSegment",
        Rule::segment("statement", greedy_until(reference("DelimiterSegment"))).with_parse(
            one_of(vec![
                reference("SelectStatementSegment"),
                reference("InsertStatementSegment"),
                reference("DeleteStatementSegment"),
                reference("CreateTableStatementSegment"),
                reference("CreateDatabaseStatementSegment"),
                reference("DropStatementSegment"),
            ]),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_publishes() {
        let dialect = dialect().unwrap();
        assert_eq!(dialect.name(), "ansi");
        assert!(dialect.parent().is_none());
        assert!(dialect.rule("StatementSegment").is_some());
        assert!(dialect.brackets().get("angle").is_none());
    }

    #[test]
    fn test_keyword_lists_do_not_overlap() {
        for word in RESERVED_KEYWORDS {
            assert!(
                !UNRESERVED_KEYWORDS.contains(word),
                "{word} is both reserved and unreserved"
            );
        }
    }

    #[test]
    fn test_every_keyword_used_is_known() {
        let dialect = dialect().unwrap();
        for name in dialect.rule_names() {
            let rule = dialect.rule(name).unwrap();
            for grammar in rule.grammars() {
                for word in grammar.keywords() {
                    assert!(dialect.keywords().is_keyword(word), "{name} uses {word}");
                }
            }
        }
    }
}
