//! Hive dialect implementation.

use oxide_lint_core::dialect::{BracketDef, Dialect, DialectBuilder, KeywordClass, Result, Rule};
use oxide_lint_core::grammar::{
    angle_bracketed, bracketed, comma_separated, greedy_until, keyword, one_of, one_or_more,
    reference, sequence, starts_with, typed, Grammar,
};
use oxide_lint_core::lexer::TokenKind;

use crate::keywords::{RESERVED_KEYWORDS, UNRESERVED_KEYWORDS};

/// Name under which the dialect is registered.
pub const HIVE: &str = "hive";

/// Derives the Hive build phase from a published ANSI dialect.
#[must_use]
pub fn builder(ansi: &Dialect) -> DialectBuilder {
    let mut builder = ansi.derive(HIVE);
    builder
        .add_keywords(KeywordClass::Unreserved, UNRESERVED_KEYWORDS)
        .add_keywords(KeywordClass::Reserved, RESERVED_KEYWORDS)
        // `<` and `>` are comparison operators everywhere else.
        .add_bracket_pair(BracketDef::new(
            "angle",
            "LessThanSegment",
            "GreaterThanSegment",
            false,
        ));

    bind_literals_and_properties(&mut builder);
    bind_storage(&mut builder);
    bind_datatypes(&mut builder);
    bind_partitions(&mut builder);
    bind_database_statements(&mut builder);
    bind_table_statements(&mut builder);
    bind_insert(&mut builder);
    replace_statement(&mut builder);
    builder
}

/// Builds and publishes the Hive dialect on top of `ansi`.
///
/// # Errors
///
/// Returns a [`oxide_lint_core::DialectError`] if the rule tables are
/// inconsistent.
pub fn publish(ansi: &Dialect) -> Result<Dialect> {
    builder(ansi).publish()
}

fn single_or_double_quoted() -> Grammar {
    reference("SingleOrDoubleQuotedLiteralGrammar")
}

fn bind_literals_and_properties(builder: &mut DialectBuilder) {
    builder
        .replace(
            "QuotedIdentifierSegment",
            Rule::grammar(typed(TokenKind::BackQuote, "quoted_identifier")),
        )
        .bind_all([
            (
                "DoubleQuotedLiteralSegment",
                Rule::grammar(typed(TokenKind::DoubleQuote, "quoted_literal")),
            ),
            (
                "SingleOrDoubleQuotedLiteralGrammar",
                Rule::grammar(one_of(vec![
                    reference("QuotedLiteralSegment"),
                    reference("DoubleQuotedLiteralSegment"),
                ])),
            ),
            (
                "LocationClauseSegment",
                Rule::segment(
                    "location_clause",
                    sequence(vec![keyword("LOCATION"), reference("QuotedLiteralSegment")]),
                ),
            ),
            (
                "PropertyGrammar",
                Rule::grammar(sequence(vec![
                    single_or_double_quoted(),
                    reference("EqualsSegment"),
                    single_or_double_quoted(),
                ])),
            ),
            (
                "BracketedPropertyListGrammar",
                Rule::grammar(bracketed(comma_separated(reference("PropertyGrammar")))),
            ),
            (
                "TablePropertiesGrammar",
                Rule::grammar(sequence(vec![
                    keyword("TBLPROPERTIES"),
                    reference("BracketedPropertyListGrammar"),
                ])),
            ),
            (
                "SerdePropertiesGrammar",
                Rule::grammar(sequence(vec![
                    keyword("WITH"),
                    keyword("SERDEPROPERTIES"),
                    reference("BracketedPropertyListGrammar"),
                ])),
            ),
            (
                "TerminatedByGrammar",
                Rule::grammar(sequence(vec![
                    keyword("TERMINATED"),
                    keyword("BY"),
                    reference("QuotedLiteralSegment"),
                ])),
            ),
            (
                "CommentGrammar",
                Rule::grammar(sequence(vec![keyword("COMMENT"), single_or_double_quoted()])),
            ),
        ]);

    // Column comments may use either quote style.
    let inherited = builder
        .rule("ColumnConstraintSegment")
        .map(|rule| rule.match_grammar().clone());
    builder.replace(
        "ColumnConstraintSegment",
        Rule::segment(
            "column_constraint",
            one_of(
                std::iter::once(reference("CommentGrammar"))
                    .chain(inherited)
                    .collect(),
            ),
        ),
    );
}

fn bind_storage(builder: &mut DialectBuilder) {
    builder.bind_all([
        (
            "FileFormatSegment",
            Rule::segment(
                "file_format",
                one_of(vec![
                    keyword("SEQUENCEFILE"),
                    keyword("TEXTFILE"),
                    keyword("RCFILE"),
                    keyword("ORC"),
                    keyword("PARQUET"),
                    keyword("AVRO"),
                    keyword("JSONFILE"),
                    sequence(vec![
                        keyword("INPUTFORMAT"),
                        single_or_double_quoted(),
                        keyword("OUTPUTFORMAT"),
                        single_or_double_quoted(),
                    ]),
                ]),
            ),
        ),
        (
            "StoredAsGrammar",
            Rule::grammar(sequence(vec![
                keyword("STORED"),
                keyword("AS"),
                reference("FileFormatSegment"),
            ])),
        ),
        (
            "StoredByGrammar",
            Rule::grammar(sequence(vec![
                keyword("STORED"),
                keyword("BY"),
                single_or_double_quoted(),
                reference("SerdePropertiesGrammar").optional(),
            ])),
        ),
        (
            "StorageFormatSegment",
            Rule::segment(
                "storage_format",
                one_of(vec![
                    sequence(vec![
                        reference("RowFormatClauseSegment").optional(),
                        reference("StoredAsGrammar").optional(),
                    ]),
                    reference("StoredByGrammar"),
                ]),
            ),
        ),
        (
            "RowFormatClauseSegment",
            Rule::segment(
                "row_format_clause",
                sequence(vec![
                    keyword("ROW"),
                    keyword("FORMAT"),
                    one_of(vec![
                        sequence(vec![
                            keyword("DELIMITED"),
                            sequence(vec![
                                keyword("FIELDS"),
                                reference("TerminatedByGrammar"),
                                sequence(vec![
                                    keyword("ESCAPED"),
                                    keyword("BY"),
                                    reference("QuotedLiteralSegment"),
                                ])
                                .optional(),
                            ])
                            .optional(),
                            sequence(vec![
                                keyword("COLLECTION"),
                                keyword("ITEMS"),
                                reference("TerminatedByGrammar"),
                            ])
                            .optional(),
                            sequence(vec![
                                keyword("MAP"),
                                keyword("KEYS"),
                                reference("TerminatedByGrammar"),
                            ])
                            .optional(),
                            sequence(vec![keyword("LINES"), reference("TerminatedByGrammar")])
                                .optional(),
                            sequence(vec![
                                keyword("NULL"),
                                keyword("DEFINED"),
                                keyword("AS"),
                                reference("QuotedLiteralSegment"),
                            ])
                            .optional(),
                        ]),
                        sequence(vec![
                            keyword("SERDE"),
                            single_or_double_quoted(),
                            reference("SerdePropertiesGrammar").optional(),
                        ]),
                    ]),
                ]),
            ),
        ),
        (
            "SkewedByClauseSegment",
            Rule::segment(
                "skewed_by_clause",
                sequence(vec![
                    keyword("SKEWED"),
                    keyword("BY"),
                    reference("BracketedColumnReferenceListGrammar"),
                    keyword("ON"),
                    bracketed(comma_separated(one_of(vec![
                        reference("LiteralGrammar"),
                        bracketed(comma_separated(reference("LiteralGrammar"))),
                    ]))),
                    sequence(vec![keyword("STORED"), keyword("AS"), keyword("DIRECTORIES")])
                        .optional(),
                ]),
            ),
        ),
    ]);
}

fn bind_datatypes(builder: &mut DialectBuilder) {
    let length = || bracketed(reference("NumericLiteralSegment")).optional();

    builder
        .bind(
            "PrimitiveTypeSegment",
            Rule::segment(
                "primitive_type",
                one_of(vec![
                    keyword("TINYINT"),
                    keyword("SMALLINT"),
                    keyword("INT"),
                    keyword("INTEGER"),
                    keyword("BIGINT"),
                    keyword("BOOLEAN"),
                    keyword("FLOAT"),
                    sequence(vec![keyword("DOUBLE"), keyword("PRECISION").optional()]),
                    keyword("STRING"),
                    keyword("BINARY"),
                    keyword("TIMESTAMP"),
                    sequence(vec![
                        keyword("DECIMAL"),
                        bracketed(sequence(vec![
                            reference("NumericLiteralSegment"),
                            sequence(vec![
                                reference("CommaSegment"),
                                reference("NumericLiteralSegment"),
                            ])
                            .optional(),
                        ]))
                        .optional(),
                    ]),
                    keyword("DATE"),
                    sequence(vec![keyword("VARCHAR"), length()]),
                    sequence(vec![keyword("CHAR"), length()]),
                ]),
            ),
        )
        .replace(
            "DatatypeSegment",
            Rule::segment(
                "data_type",
                one_of(vec![
                    reference("PrimitiveTypeSegment"),
                    sequence(vec![
                        keyword("ARRAY"),
                        angle_bracketed(reference("DatatypeSegment")),
                    ]),
                    sequence(vec![
                        keyword("MAP"),
                        angle_bracketed(sequence(vec![
                            reference("PrimitiveTypeSegment"),
                            reference("CommaSegment"),
                            reference("DatatypeSegment"),
                        ])),
                    ]),
                    sequence(vec![
                        keyword("STRUCT"),
                        angle_bracketed(comma_separated(sequence(vec![
                            reference("NakedIdentifierSegment"),
                            reference("ColonSegment"),
                            reference("DatatypeSegment"),
                            reference("CommentGrammar").optional(),
                        ]))),
                    ]),
                    sequence(vec![
                        keyword("UNIONTYPE"),
                        angle_bracketed(comma_separated(reference("DatatypeSegment"))),
                    ]),
                ]),
            ),
        );
}

fn bind_partitions(builder: &mut DialectBuilder) {
    let partition_value = || {
        one_of(vec![
            reference("LiteralGrammar"),
            reference("NakedIdentifierSegment"),
        ])
    };

    builder.bind_all([
        (
            "PartitionSpecGrammar",
            Rule::grammar(sequence(vec![
                keyword("PARTITION"),
                bracketed(comma_separated(sequence(vec![
                    reference("ColumnReferenceSegment"),
                    reference("EqualsSegment"),
                    reference("LiteralGrammar"),
                ]))),
            ])),
        ),
        (
            "InsertDynamicPartitionSpecGrammar",
            Rule::grammar(sequence(vec![
                keyword("PARTITION"),
                bracketed(comma_separated(sequence(vec![
                    reference("NakedIdentifierSegment"),
                    sequence(vec![reference("EqualsSegment"), partition_value()]).optional(),
                ]))),
            ])),
        ),
        (
            "InsertPartitionSpecGrammar",
            Rule::grammar(sequence(vec![
                keyword("PARTITION"),
                bracketed(comma_separated(sequence(vec![
                    reference("NakedIdentifierSegment"),
                    reference("EqualsSegment"),
                    partition_value(),
                ]))),
            ])),
        ),
        (
            "InsertNormalOrDynamicPartitionSpecGrammar",
            Rule::grammar(one_of(vec![
                reference("InsertDynamicPartitionSpecGrammar"),
                reference("InsertPartitionSpecGrammar"),
            ])),
        ),
    ]);
}

fn bind_database_statements(builder: &mut DialectBuilder) {
    let database = || one_of(vec![keyword("DATABASE"), keyword("SCHEMA")]);

    builder
        .replace(
            "CreateDatabaseStatementSegment",
            Rule::segment(
                "create_database_statement",
                sequence(vec![
                    keyword("CREATE"),
                    database(),
                    reference("IfNotExistsGrammar").optional(),
                    reference("DatabaseReferenceSegment"),
                    reference("CommentGrammar").optional(),
                    reference("LocationClauseSegment").optional(),
                    sequence(vec![
                        keyword("MANAGEDLOCATION"),
                        reference("QuotedLiteralSegment"),
                    ])
                    .optional(),
                    sequence(vec![
                        keyword("WITH"),
                        keyword("DBPROPERTIES"),
                        reference("BracketedPropertyListGrammar"),
                    ])
                    .optional(),
                ]),
            ),
        )
        .bind_all([
            (
                "AlterDatabaseStatementSegment",
                Rule::segment(
                    "alter_database_statement",
                    sequence(vec![
                        keyword("ALTER"),
                        database(),
                        reference("DatabaseReferenceSegment"),
                        keyword("SET"),
                        one_of(vec![
                            sequence(vec![
                                keyword("DBPROPERTIES"),
                                reference("BracketedPropertyListGrammar"),
                            ]),
                            sequence(vec![
                                keyword("OWNER"),
                                one_of(vec![keyword("USER"), keyword("ROLE")]),
                                reference("QuotedLiteralSegment"),
                            ]),
                            reference("LocationClauseSegment"),
                            sequence(vec![
                                keyword("MANAGEDLOCATION"),
                                reference("QuotedLiteralSegment"),
                            ]),
                        ]),
                    ]),
                ),
            ),
            (
                "DropDatabaseStatementSegment",
                Rule::segment(
                    "drop_database_statement",
                    sequence(vec![
                        keyword("DROP"),
                        database(),
                        reference("IfExistsGrammar").optional(),
                        reference("DatabaseReferenceSegment"),
                        one_of(vec![keyword("RESTRICT"), keyword("CASCADE")]).optional(),
                    ]),
                ),
            ),
            (
                "UseStatementSegment",
                Rule::segment(
                    "use_statement",
                    sequence(vec![keyword("USE"), reference("DatabaseReferenceSegment")]),
                ),
            ),
        ]);
}

fn bind_table_statements(builder: &mut DialectBuilder) {
    let create_table_prefix = || {
        vec![
            keyword("CREATE"),
            keyword("EXTERNAL").optional(),
            keyword("TEMPORARY").optional(),
            keyword("TABLE"),
        ]
    };

    let mut create_table = create_table_prefix();
    create_table.extend([
        reference("IfNotExistsGrammar").optional(),
        reference("TableReferenceSegment"),
        one_of(vec![
            sequence(vec![
                bracketed(comma_separated(one_of(vec![
                    reference("TableConstraintSegment"),
                    reference("ColumnDefinitionSegment"),
                ]))),
                reference("CommentGrammar").optional(),
                sequence(vec![
                    keyword("PARTITIONED"),
                    keyword("BY"),
                    bracketed(comma_separated(reference("ColumnDefinitionSegment"))),
                ])
                .optional(),
                sequence(vec![
                    keyword("CLUSTERED"),
                    keyword("BY"),
                    reference("BracketedColumnReferenceListGrammar"),
                    sequence(vec![
                        keyword("SORTED"),
                        keyword("BY"),
                        bracketed(comma_separated(sequence(vec![
                            reference("ColumnReferenceSegment"),
                            one_of(vec![keyword("ASC"), keyword("DESC")]).optional(),
                        ]))),
                    ])
                    .optional(),
                    keyword("INTO"),
                    reference("NumericLiteralSegment"),
                    keyword("BUCKETS"),
                ])
                .optional(),
                reference("SkewedByClauseSegment").optional(),
                reference("StorageFormatSegment").optional(),
                reference("LocationClauseSegment").optional(),
                reference("TablePropertiesGrammar").optional(),
                sequence(vec![keyword("AS"), reference("SelectStatementSegment")]).optional(),
            ]),
            sequence(vec![
                keyword("LIKE"),
                reference("TableReferenceSegment"),
                reference("LocationClauseSegment").optional(),
            ]),
        ]),
    ]);

    builder
        .replace(
            "CreateTableStatementSegment",
            Rule::segment(
                "create_table_statement",
                starts_with(sequence(create_table_prefix())),
            )
            .with_parse(sequence(create_table)),
        )
        .replace(
            "DropStatementSegment",
            Rule::segment("drop_statement", starts_with(keyword("DROP"))).with_parse(one_of(
                vec![
                    reference("DropDatabaseStatementSegment"),
                    reference("DropTableStatementSegment"),
                ],
            )),
        )
        .bind_all([
            (
                "DropTableStatementSegment",
                Rule::segment(
                    "drop_table_statement",
                    sequence(vec![
                        keyword("DROP"),
                        keyword("TABLE"),
                        reference("IfExistsGrammar").optional(),
                        reference("TableReferenceSegment"),
                        keyword("PURGE").optional(),
                    ]),
                ),
            ),
            (
                "TruncateStatementSegment",
                Rule::segment("truncate_table", starts_with(keyword("TRUNCATE"))).with_parse(
                    sequence(vec![
                        keyword("TRUNCATE"),
                        keyword("TABLE").optional(),
                        reference("TableReferenceSegment"),
                        reference("PartitionSpecGrammar").optional(),
                    ]),
                ),
            ),
            (
                "LoadDataStatementSegment",
                Rule::segment(
                    "load_data_statement",
                    starts_with(sequence(vec![keyword("LOAD"), keyword("DATA")])),
                )
                .with_parse(sequence(vec![
                    keyword("LOAD"),
                    keyword("DATA"),
                    keyword("LOCAL").optional(),
                    keyword("INPATH"),
                    reference("QuotedLiteralSegment"),
                    keyword("OVERWRITE").optional(),
                    keyword("INTO"),
                    keyword("TABLE"),
                    reference("TableReferenceSegment"),
                    reference("InsertPartitionSpecGrammar").optional(),
                    sequence(vec![
                        keyword("INPUTFORMAT"),
                        reference("QuotedLiteralSegment"),
                        keyword("SERDE"),
                        reference("QuotedLiteralSegment"),
                    ])
                    .optional(),
                ])),
            ),
        ]);
}

fn bind_insert(builder: &mut DialectBuilder) {
    builder
        .bind(
            "InsertStatementFragmentSegment",
            Rule::segment(
                "insert_statement_fragment",
                sequence(vec![
                    keyword("INSERT"),
                    one_of(vec![
                        sequence(vec![
                            keyword("OVERWRITE"),
                            keyword("TABLE"),
                            reference("TableReferenceSegment"),
                            reference("InsertNormalOrDynamicPartitionSpecGrammar").optional(),
                            reference("IfNotExistsGrammar").optional(),
                        ]),
                        sequence(vec![
                            keyword("INTO"),
                            keyword("TABLE").optional(),
                            reference("TableReferenceSegment"),
                            reference("InsertNormalOrDynamicPartitionSpecGrammar").optional(),
                            reference("BracketedColumnReferenceListGrammar").optional(),
                        ]),
                    ]),
                ]),
            ),
        )
        .replace(
            "InsertStatementSegment",
            Rule::segment(
                "insert_statement",
                one_of(vec![
                    sequence(vec![
                        reference("InsertStatementFragmentSegment"),
                        one_of(vec![
                            reference("ValuesClauseSegment"),
                            reference("SelectStatementSegment"),
                        ]),
                    ]),
                    // Multi-insert: FROM src INSERT ... SELECT ... [INSERT ... SELECT ...]
                    sequence(vec![
                        reference("FromClauseSegment"),
                        one_or_more(sequence(vec![
                            reference("InsertStatementFragmentSegment"),
                            reference("SelectClauseSegment"),
                            reference("WhereClauseSegment").optional(),
                            reference("GroupByClauseSegment").optional(),
                        ])),
                    ]),
                ]),
            ),
        );
}

fn replace_statement(builder: &mut DialectBuilder) {
    builder.replace(
        "StatementSegment",
        Rule::segment(
            "statement",
            greedy_until(reference("DelimiterSegment")),
        )
        .with_parse(one_of(vec![
            reference("SelectStatementSegment"),
            reference("CreateDatabaseStatementSegment"),
            reference("AlterDatabaseStatementSegment"),
            reference("CreateTableStatementSegment"),
            reference("DropStatementSegment"),
            reference("TruncateStatementSegment"),
            reference("UseStatementSegment"),
            reference("LoadDataStatementSegment"),
            reference("InsertStatementSegment"),
            reference("DeleteStatementSegment"),
        ])),
    );
}
