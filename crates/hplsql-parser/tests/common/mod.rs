#![allow(dead_code)]

use hplsql_parser::ast::{Program, Statement};
use hplsql_parser::{lexer, ParseError};

/// Routes parser events to the test output, shown with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn parse(sql: &str) -> Program {
    hplsql_parser::parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    hplsql_parser::parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

/// Parses a script holding exactly one statement.
pub fn parse_stmt(sql: &str) -> Statement {
    let mut statements = parse(sql).block.statements;
    assert_eq!(statements.len(), 1, "expected one statement in: {sql}");
    statements.remove(0)
}

/// Re-serializes the token stream of `sql` and checks that parsing the
/// result gives the same tree.
pub fn round_trip(sql: &str) {
    let first = parse(sql);
    let rendered = lexer::render_tokens(&lexer::tokenize(sql));
    let second = parse(&rendered);
    assert_eq!(
        first, second,
        "Round-trip failed.\n  Input:    {sql}\n  Rendered: {rendered}"
    );
}
