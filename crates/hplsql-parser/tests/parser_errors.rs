//! Error reporting, rule context and resynchronization.

mod common;

use common::{init_tracing, parse_err};
use hplsql_parser::{lexer, ParseErrorKind, Parser, ParserConfig, RecoveryMode, TokenKind};

#[test]
fn test_unterminated_if_points_at_if() {
    let err = parse_err("PRINT 0;\nIF x > 1 THEN\n  PRINT x;\n");
    assert!(err.is_premature_end());
    assert_eq!(err.found, TokenKind::Eof);
    let context = err.context.expect("rule context");
    assert_eq!(context.rule, "IF");
    assert_eq!((context.position.line, context.position.column), (2, 1));
}

#[test]
fn test_unexpected_token_location() {
    let err = parse_err("SELECT a FROM t WHERE");
    assert!(err.is_premature_end());

    let err = parse_err("IF x > 1 THEN PRINT x; END WHILE");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.position.line, 1);
    assert!(err.expected.iter().any(|e| e.contains("IF")));
}

#[test]
fn test_innermost_context_wins() {
    let err = parse_err("WHILE a < 1 DO\n  IF a THEN PRINT a;\nEND WHILE");
    assert_eq!(err.context.map(|c| c.rule), Some("IF"));
}

#[test]
fn test_error_display_mentions_context() {
    let err = parse_err("IF x THEN PRINT 1;");
    let message = err.to_string();
    assert!(message.contains("IF statement starting at"), "{message}");
}

#[test]
fn test_resynchronize_collects_errors() {
    init_tracing();
    let config = ParserConfig::new().with_recovery(RecoveryMode::Resynchronize);
    let mut parser = Parser::with_config(
        lexer::tokenize("PRINT 1; SET = 2; PRINT 2; CREATE TABLE (a INT); PRINT 3;"),
        config,
    );
    let program = parser.parse_program().unwrap();
    assert_eq!(program.block.len(), 3);
    assert_eq!(parser.errors().len(), 2);
}

#[test]
fn test_resynchronize_respects_max_errors() {
    let config = ParserConfig::new()
        .with_recovery(RecoveryMode::Resynchronize)
        .with_max_errors(1);
    let err = hplsql_parser::parse_with_config("SET = 1; PRINT 1;", &config).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
}

#[test]
fn test_config_from_json() {
    let config: ParserConfig =
        serde_json::from_str(r#"{"recovery": "resynchronize", "and_binds_tighter": true}"#).unwrap();
    assert_eq!(config.recovery, RecoveryMode::Resynchronize);
    assert!(config.and_binds_tighter);
    assert_eq!(config.max_errors, ParserConfig::default().max_errors);
    let json = serde_json::to_string(&ParserConfig::default()).unwrap();
    assert!(json.contains("\"fail\""));
}

#[test]
fn test_outputs_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<hplsql_parser::Program>();
    assert_send_sync::<hplsql_parser::ParseError>();
    assert_send_sync::<hplsql_parser::Token>();
    assert_send_sync::<Parser>();
}
