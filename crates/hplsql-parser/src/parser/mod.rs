//! HPL/SQL Parser
//!
//! A hand-written recursive descent parser. Arithmetic uses precedence
//! climbing over a fixed level table; statements are chosen by a keyword
//! dispatcher backed by pure lookahead predicates and cursor-restoring
//! speculation.

mod bool_expr;
mod command;
mod config;
mod control;
mod ddl;
mod declare;
mod dml;
mod error;
mod expr;
mod ident;
mod literal;
mod parser;
mod precedence;
mod routine;

pub use config::{ParserConfig, RecoveryMode};
pub use error::{ParseError, ParseErrorDetails, ParseErrorKind, RuleContext};
pub use parser::Parser;
