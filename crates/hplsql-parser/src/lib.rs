//! # hplsql-parser
//!
//! A multi-dialect HPL/SQL parser that turns a token stream into a typed
//! parse tree.
//!
//! This crate provides:
//! - A reference lexer producing tokens that keep their raw text
//! - A hand-written recursive descent parser over one unified grammar
//!   covering Hive, Oracle, Teradata, DB2, `MySQL` and SQL Server syntax
//! - Precise errors carrying the offending token, the expected set and the
//!   statement that was open when parsing failed
//!
//! ## Parsing a script
//!
//! ```rust
//! use hplsql_parser::ast::Statement;
//!
//! let program = hplsql_parser::parse(
//!     "DECLARE cnt INT DEFAULT 0;
//!      WHILE cnt < 10 LOOP
//!        cnt := cnt + 1;
//!      END LOOP;
//!      PRINT cnt;",
//! )
//! .unwrap();
//!
//! assert_eq!(program.block.len(), 3);
//! assert!(matches!(program.block.statements[1], Statement::While(_)));
//! ```
//!
//! ## Errors
//!
//! The first syntax error is returned by default. A statement left open
//! is named in the error:
//!
//! ```rust
//! let err = hplsql_parser::parse("IF x > 1 THEN PRINT x;").unwrap_err();
//! assert!(err.is_premature_end());
//! assert_eq!(err.context.map(|c| c.rule), Some("IF"));
//! ```
//!
//! ## Recovery
//!
//! With [`RecoveryMode::Resynchronize`] the parser skips to the next
//! statement boundary after an error and keeps going:
//!
//! ```rust
//! use hplsql_parser::{Parser, ParserConfig, RecoveryMode, lexer};
//!
//! let config = ParserConfig::new().with_recovery(RecoveryMode::Resynchronize);
//! let mut parser = Parser::with_config(lexer::tokenize("PRINT 1; SET = ; PRINT 2;"), config);
//! let program = parser.parse_program().unwrap();
//!
//! assert_eq!(program.block.len(), 2);
//! assert_eq!(parser.errors().len(), 1);
//! ```

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;

pub use ast::{Block, Expr, Program, Statement};
pub use dialect::Dialect;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{
    ParseError, ParseErrorDetails, ParseErrorKind, Parser, ParserConfig, RecoveryMode, RuleContext,
};

/// Tokenizes and parses `sql` with the default configuration.
///
/// # Errors
///
/// Returns the first `ParseError` encountered.
pub fn parse(sql: &str) -> Result<Program, ParseError> {
    parse_with_config(sql, &ParserConfig::default())
}

/// Tokenizes and parses `sql` with `config`.
///
/// # Errors
///
/// Returns the first `ParseError`, or under
/// [`RecoveryMode::Resynchronize`] the error that reached `max_errors`.
pub fn parse_with_config(sql: &str, config: &ParserConfig) -> Result<Program, ParseError> {
    Parser::with_config(lexer::tokenize(sql), *config).parse_program()
}
