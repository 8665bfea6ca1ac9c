//! Identifiers, dotted names and aliases.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::Ident;
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// True if the token `n` ahead can be one part of a name.
    pub(crate) fn is_identifier_part(&self, n: usize) -> bool {
        self.peek_nth(n).kind.is_identifier_like()
    }

    /// Parses one name part: an identifier or a non-reserved keyword.
    ///
    /// Bracketed and backquoted identifiers yield their unquoted name;
    /// keywords keep the spelling they were written with.
    pub(crate) fn parse_ident_part(&mut self) -> Result<String, ParseError> {
        let token = self.current();
        let part = match &token.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(kw) if kw.is_identifier_eligible() => token.text.clone(),
            _ => return Err(self.error_here(&["identifier"])),
        };
        self.advance();
        Ok(part)
    }

    /// Parses `part (. part)*`. Stops before `.*`.
    ///
    /// # Errors
    ///
    /// Returns an error if the current token cannot name anything.
    pub fn parse_ident(&mut self) -> Result<Ident, ParseError> {
        let mut parts = vec![self.parse_ident_part()?];
        while self.check(&TokenKind::Dot) && self.is_identifier_part(1) {
            self.advance();
            parts.push(self.parse_ident_part()?);
        }
        Ok(Ident::from_parts(parts))
    }

    pub(crate) fn parse_ident_list(&mut self) -> Result<Vec<Ident>, ParseError> {
        self.comma_separated(Self::parse_ident)
    }

    /// `( ident, ... )`
    pub(crate) fn parse_paren_ident_list(&mut self) -> Result<Vec<Ident>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let idents = self.parse_ident_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(idents)
    }

    /// True if the current token may be taken as an implicit alias.
    ///
    /// Keywords that continue the enclosing statement, and `GO`, are never
    /// aliases. `RIGHT` and `FULL` are names unless a join follows.
    pub(crate) fn alias_allowed(&self) -> bool {
        if !self.is_identifier_part(0) || self.is_go(0) {
            return false;
        }
        match self.current().as_keyword() {
            Some(
                Keyword::Exec
                | Keyword::Execute
                | Keyword::Inner
                | Keyword::Left
                | Keyword::Group
                | Keyword::Order
                | Keyword::Limit
                | Keyword::With
                | Keyword::Into
                | Keyword::All,
            ) => false,
            Some(Keyword::Right | Keyword::Full) => {
                !(self.check_keyword_nth(1, Keyword::Join)
                    || self.check_keyword_nth(1, Keyword::Outer))
            }
            _ => true,
        }
    }

    /// Parses `AS name` or an implicit alias.
    pub(crate) fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            return self.parse_ident_part().map(Some);
        }
        if self.alias_allowed() {
            return self.parse_ident_part().map(Some);
        }
        Ok(None)
    }
}
