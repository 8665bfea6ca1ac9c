//! HPL/SQL Lexer/Tokenizer
//!
//! A hand-written lexer that produces the token stream the parser consumes.
//! Tokens keep their raw text so a token range can be written back out
//! with [`render_tokens`] and parsed again.

mod span;
mod token;
mod tokenizer;

pub use span::{Position, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;

/// Tokenizes `input`. The result always ends with an `Eof` token.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

/// Re-serialises tokens as source text. Tokens are separated by one
/// space, or by a newline where the source moved on to a later line.
///
/// Tokenizing the output yields the same token kinds, so parsing it gives
/// a tree equal to the one built from the original tokens.
#[must_use]
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut last_line = None;
    for token in tokens.iter().filter(|t| !t.is_eof()) {
        match last_line {
            Some(line) if token.position.line > line => out.push('\n'),
            Some(_) => out.push(' '),
            None => {}
        }
        out.push_str(&token.text);
        last_line = Some(token.position.line);
    }
    out
}
