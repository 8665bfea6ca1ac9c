//! Parser error types.

use core::fmt;
use core::ops::Deref;

use crate::lexer::{Position, Span, Token, TokenKind};

/// The class of a syntax error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The current token matches no alternative of the active rule.
    #[error("Unexpected token")]
    UnexpectedToken,

    /// A disambiguation check could not pick an alternative.
    #[error("Ambiguous context ({0})")]
    AmbiguousContext(String),

    /// The input ended while a rule still needed tokens.
    #[error("Unexpected end of input")]
    PrematureEnd,
}

/// The innermost statement rule that was open when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    /// Rule name, e.g. `IF`.
    pub rule: &'static str,
    /// Span of the rule's first token.
    pub span: Span,
    /// Line and column of the rule's first token.
    pub position: Position,
}

impl fmt::Display for RuleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} statement starting at {}", self.rule, self.position)
    }
}

/// The details of a parse error, reached through [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {position}{}", context_suffix(.context.as_ref()))]
pub struct ParseErrorDetails {
    /// The error class.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// The offending token.
    pub found: TokenKind,
    /// The location of the offending token.
    pub span: Span,
    /// Line and column of the offending token.
    pub position: Position,
    /// What would have been accepted instead.
    pub expected: Vec<String>,
    /// The enclosing statement rule, if any.
    pub context: Option<RuleContext>,
}

fn context_suffix(context: Option<&RuleContext>) -> String {
    context.map_or_else(String::new, |ctx| format!(" (in {ctx})"))
}

/// A parse error. The details are boxed to keep `Result`s small.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(transparent)]
pub struct ParseError(Box<ParseErrorDetails>);

impl Deref for ParseError {
    type Target = ParseErrorDetails;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<ParseErrorDetails> for ParseError {
    fn from(details: ParseErrorDetails) -> Self {
        Self(Box::new(details))
    }
}

impl ParseError {
    /// Creates an "unexpected token" error, or a premature-end error at EOF.
    #[must_use]
    pub fn unexpected(expected: &[&str], found: &Token) -> Self {
        let expected: Vec<String> = expected.iter().map(|s| (*s).to_string()).collect();
        let wanted = if expected.is_empty() {
            String::from("a different token")
        } else {
            expected.join(" or ")
        };
        let (kind, message) = if found.is_eof() {
            (
                ParseErrorKind::PrematureEnd,
                format!("Unexpected end of input: expected {wanted}"),
            )
        } else {
            (
                ParseErrorKind::UnexpectedToken,
                format!("Unexpected token: expected {wanted}, found {}", found.kind),
            )
        };
        ParseErrorDetails {
            kind,
            message,
            found: found.kind.clone(),
            span: found.span,
            position: found.position,
            expected,
            context: None,
        }
        .into()
    }

    /// Creates an error for a failed disambiguation check.
    #[must_use]
    pub fn ambiguous(context: impl Into<String>, found: &Token) -> Self {
        let context = context.into();
        ParseErrorDetails {
            message: format!("Ambiguous context: {context}, found {}", found.kind),
            kind: ParseErrorKind::AmbiguousContext(context),
            found: found.kind.clone(),
            span: found.span,
            position: found.position,
            expected: Vec::new(),
            context: None,
        }
        .into()
    }

    /// Attaches the enclosing rule unless an inner rule already did.
    #[must_use]
    pub fn with_context(mut self, context: RuleContext) -> Self {
        if self.0.context.is_none() {
            self.0.context = Some(context);
        }
        self
    }

    /// Returns true if the input ended before the rule was complete.
    #[must_use]
    pub fn is_premature_end(&self) -> bool {
        matches!(self.0.kind, ParseErrorKind::PrematureEnd)
    }
}
