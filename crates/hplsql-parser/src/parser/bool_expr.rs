//! Boolean expressions: conditions of WHERE, IF, WHILE, CASE and joins.

use super::error::ParseError;
use super::parser::Parser;
use super::precedence::{binary_op_level, compare_op, interval_unit, pattern_op};
use crate::ast::{BoolExpr, InList, LogicalOp};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses a boolean expression.
    ///
    /// By default `AND` and `OR` share one left-associative level, so
    /// `a OR b AND c` groups as `(a OR b) AND c`. With
    /// `and_binds_tighter` set, `AND` is parsed one level below `OR`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if no condition starts at the cursor.
    pub fn parse_bool_expr(&mut self) -> Result<BoolExpr, ParseError> {
        if self.config().and_binds_tighter {
            return self.parse_or_chain();
        }
        let mut left = self.parse_bool_primary()?;
        while let Some(op) = self.logical_op() {
            self.advance();
            let right = self.parse_bool_primary()?;
            left = BoolExpr::logical(left, op, right);
        }
        Ok(left)
    }

    fn logical_op(&self) -> Option<LogicalOp> {
        match self.current().as_keyword() {
            Some(Keyword::And) => Some(LogicalOp::And),
            Some(Keyword::Or) => Some(LogicalOp::Or),
            _ => None,
        }
    }

    fn parse_or_chain(&mut self) -> Result<BoolExpr, ParseError> {
        let mut left = self.parse_and_chain()?;
        while self.eat_keyword(Keyword::Or) {
            let right = self.parse_and_chain()?;
            left = BoolExpr::logical(left, LogicalOp::Or, right);
        }
        Ok(left)
    }

    fn parse_and_chain(&mut self) -> Result<BoolExpr, ParseError> {
        let mut left = self.parse_bool_primary()?;
        while self.eat_keyword(Keyword::And) {
            let right = self.parse_bool_primary()?;
            left = BoolExpr::logical(left, LogicalOp::And, right);
        }
        Ok(left)
    }

    /// `[NOT] ( condition )`, or an atom.
    ///
    /// A parenthesised group is only taken when the token after `)` cannot
    /// continue an atom, so `(a + b) > c` falls through to a comparison.
    fn parse_bool_primary(&mut self) -> Result<BoolExpr, ParseError> {
        let group_start = self.check(&TokenKind::LeftParen)
            || (self.check_keyword(Keyword::Not) && self.check_nth(1, &TokenKind::LeftParen));
        if group_start {
            let group = self.speculate("parenthesized condition", |p| {
                let negated = p.eat_keyword(Keyword::Not);
                p.expect(&TokenKind::LeftParen)?;
                let inner = p.parse_bool_expr()?;
                p.expect(&TokenKind::RightParen)?;
                if p.continues_atom() {
                    return Err(p.error_here(&["AND", "OR", "`)`"]));
                }
                Ok(BoolExpr::Group {
                    negated,
                    inner: Box::new(inner),
                })
            });
            if let Some(group) = group {
                return Ok(group);
            }
        }
        self.parse_bool_atom()
    }

    /// True if the current token would extend an expression into an atom.
    fn continues_atom(&self) -> bool {
        let kind = &self.current().kind;
        if compare_op(kind).is_some()
            || binary_op_level(kind).is_some()
            || interval_unit(kind).is_some()
            || matches!(kind, TokenKind::Concat)
        {
            return true;
        }
        match kind.keyword() {
            Some(
                Keyword::Is
                | Keyword::In
                | Keyword::Between
                | Keyword::Like
                | Keyword::Rlike
                | Keyword::Regexp
                | Keyword::Concat,
            ) => true,
            Some(Keyword::Not) => self.negatable_follows(),
            _ => false,
        }
    }

    fn negatable_follows(&self) -> bool {
        matches!(
            self.peek_nth(1).as_keyword(),
            Some(
                Keyword::Between | Keyword::In | Keyword::Like | Keyword::Rlike | Keyword::Regexp
            )
        )
    }

    fn parse_bool_atom(&mut self) -> Result<BoolExpr, ParseError> {
        let exists = self.check_keyword(Keyword::Exists)
            || (self.check_keyword(Keyword::Not) && self.check_keyword_nth(1, Keyword::Exists));
        if exists {
            let negated = self.eat_keyword(Keyword::Not);
            self.expect_keyword(Keyword::Exists)?;
            self.expect(&TokenKind::LeftParen)?;
            let subquery = self.parse_select_stmt()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(BoolExpr::Exists {
                negated,
                subquery: Box::new(subquery),
            });
        }

        if self.check(&TokenKind::LeftParen) {
            if let Some(multi) = self.speculate("multi-column IN", Self::parse_multi_in) {
                return Ok(multi);
            }
        }

        let expr = self.parse_expr()?;

        if self.eat_keyword(Keyword::Is) {
            let negated = self.eat_keyword(Keyword::Not);
            self.expect_keyword(Keyword::Null)?;
            return Ok(BoolExpr::IsNull { expr, negated });
        }

        let negated = self.check_keyword(Keyword::Not) && self.negatable_follows();
        if negated {
            self.advance();
        }

        if self.eat_keyword(Keyword::Between) {
            let low = self.parse_expr()?;
            self.expect_keyword(Keyword::And)?;
            let high = self.parse_expr()?;
            return Ok(BoolExpr::Between {
                expr,
                negated,
                low,
                high,
            });
        }

        if self.eat_keyword(Keyword::In) {
            self.expect(&TokenKind::LeftParen)?;
            let list = if self.starts_select() {
                InList::Subquery(Box::new(self.parse_select_stmt()?))
            } else {
                InList::Values(self.parse_expr_list()?)
            };
            self.expect(&TokenKind::RightParen)?;
            return Ok(BoolExpr::In {
                expr,
                negated,
                list,
            });
        }

        if let Some(op) = self
            .current()
            .as_keyword()
            .and_then(|kw| pattern_op(kw, negated))
        {
            self.advance();
            let right = self.parse_expr()?;
            return Ok(BoolExpr::Compare {
                left: expr,
                op,
                right,
            });
        }

        if let Some(op) = compare_op(&self.current().kind) {
            self.advance();
            let right = self.parse_expr()?;
            return Ok(BoolExpr::Compare {
                left: expr,
                op,
                right,
            });
        }

        Ok(BoolExpr::Expr(expr))
    }

    /// `( a, b [, ...] ) [NOT] IN ( select )`
    fn parse_multi_in(&mut self) -> Result<BoolExpr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let exprs = self.parse_expr_list()?;
        if exprs.len() < 2 {
            return Err(self.error_here(&["`,`"]));
        }
        self.expect(&TokenKind::RightParen)?;
        let negated = self.eat_keyword(Keyword::Not);
        self.expect_keyword(Keyword::In)?;
        self.expect(&TokenKind::LeftParen)?;
        let subquery = self.parse_select_stmt()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(BoolExpr::MultiIn {
            exprs,
            negated,
            subquery: Box::new(subquery),
        })
    }
}
