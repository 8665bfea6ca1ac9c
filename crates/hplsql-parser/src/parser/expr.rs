//! Value expressions.
//!
//! Arithmetic is parsed by precedence climbing over the levels in
//! [`super::precedence`]. Primaries cover literals, names, calls, CASE,
//! subqueries and the built-in functions with their own syntax. A `||`
//! chain is collected into one flat [`Expr::Concat`].

use super::error::ParseError;
use super::parser::Parser;
use super::precedence::{
    aggregate_func, binary_op_level, interval_unit, partition_func, INTERVAL_LEVEL, MUL_LEVEL,
    SUB_LEVEL,
};
use crate::ast::{
    AggregateCall, AggregateFunc, CaseExpr, CursorAttr, Expr, FuncArg, FunctionCall,
    PartitionFilter, PartitionFunc, SearchedWhen, SetQuantifier, SimpleWhen, SpecialFunc,
    WindowSpec,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses a value expression.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if no expression starts at the cursor.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_level(INTERVAL_LEVEL)
    }

    /// True if the current token can start an expression.
    pub(crate) fn starts_expression(&self) -> bool {
        match &self.current().kind {
            TokenKind::Integer(_)
            | TokenKind::Decimal(_)
            | TokenKind::String(_)
            | TokenKind::DoubleQuotedString(_)
            | TokenKind::LeftParen
            | TokenKind::Minus
            | TokenKind::Plus => true,
            TokenKind::Identifier(_) => !self.is_go(0),
            TokenKind::Keyword(kw) => {
                matches!(
                    kw,
                    Keyword::Case | Keyword::Null | Keyword::True | Keyword::False
                ) || kw.is_identifier_eligible()
            }
            _ => false,
        }
    }

    fn parse_level(&mut self, level: u8) -> Result<Expr, ParseError> {
        if level > MUL_LEVEL {
            return self.parse_unary();
        }
        let mut left = self.parse_level(level + 1)?;
        loop {
            if level == INTERVAL_LEVEL {
                let Some(unit) = interval_unit(&self.current().kind) else {
                    break;
                };
                self.advance();
                left = Expr::IntervalSuffix {
                    expr: Box::new(left),
                    unit,
                };
                continue;
            }
            match binary_op_level(&self.current().kind) {
                Some((op, op_level)) if op_level == level => {
                    self.advance();
                    let right = self.parse_level(level + 1)?;
                    left = Expr::binary(left, op, right);
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&TokenKind::Minus) {
            return Ok(Expr::negated(self.parse_unary()?));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if self.starts_nested_select() {
            self.advance();
            let query = self.parse_select_stmt()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::Subquery(Box::new(query)));
        }
        if self.check_keyword(Keyword::Interval) {
            if let Some(expr) = self.speculate("INTERVAL expression", Self::parse_interval) {
                return Ok(expr);
            }
        }
        if self.cursor_attribute_ahead() {
            return self.parse_cursor_attribute();
        }

        let first = self.parse_concat_operand()?;
        if !self.at_concat_op() {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.at_concat_op() {
            self.advance();
            items.push(self.parse_concat_operand()?);
        }
        Ok(Expr::Concat(items))
    }

    fn at_concat_op(&self) -> bool {
        self.check(&TokenKind::Concat) || self.check_keyword(Keyword::Concat)
    }

    /// The primaries allowed on either side of `||`.
    fn parse_concat_operand(&mut self) -> Result<Expr, ParseError> {
        match self.current().kind {
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RightParen)?;
                return Ok(Expr::Paren(Box::new(inner)));
            }
            TokenKind::Keyword(Keyword::Case) => return self.parse_case(),
            TokenKind::Keyword(kw) => {
                if let Some(func) = aggregate_func(kw) {
                    if self.check_nth(1, &TokenKind::LeftParen) {
                        return self.parse_aggregate(func);
                    }
                }
                if matches!(kw, Keyword::Trim | Keyword::Substring)
                    && self.check_nth(1, &TokenKind::LeftParen)
                {
                    return self.parse_trim_or_substring(kw);
                }
                if let Some(special) = self.parse_special_func(kw)? {
                    return Ok(Expr::Special(Box::new(special)));
                }
            }
            _ => {}
        }

        if let Some(literal) = self.try_literal() {
            return Ok(Expr::Literal(literal));
        }
        if self.is_identifier_part(0) {
            let name = self.parse_ident()?;
            if self.check(&TokenKind::LeftParen) && !self.title_follows() {
                let args = self.parse_call_args()?;
                return Ok(Expr::Function(FunctionCall { name, args }));
            }
            return Ok(Expr::Ident(name));
        }
        Err(self.error_here(&["expression"]))
    }

    /// `( TITLE 'x' )` after a select item is a column title, not a call.
    fn title_follows(&self) -> bool {
        self.check_keyword_nth(1, Keyword::Title)
            && matches!(self.peek_nth(2).kind, TokenKind::String(_))
    }

    /// `INTERVAL expr unit`
    fn parse_interval(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Interval)?;
        let expr = self.parse_level(SUB_LEVEL)?;
        let Some(unit) = interval_unit(&self.current().kind) else {
            return Err(self.error_here(&["DAY", "DAYS", "MICROSECOND", "MICROSECONDS", "SECOND", "SECONDS"]));
        };
        self.advance();
        Ok(Expr::Interval {
            expr: Box::new(expr),
            unit,
        })
    }

    /// Scans ahead for `name[.name]% ISOPEN | FOUND | NOTFOUND`.
    fn cursor_attribute_ahead(&self) -> bool {
        let mut n = 0;
        while self.is_identifier_part(n) {
            n += 1;
            if !self.check_nth(n, &TokenKind::Dot) {
                break;
            }
            n += 1;
        }
        n > 0
            && self.check_nth(n, &TokenKind::Percent)
            && matches!(
                self.peek_nth(n + 1).as_keyword(),
                Some(Keyword::Isopen | Keyword::Found | Keyword::Notfound)
            )
    }

    fn parse_cursor_attribute(&mut self) -> Result<Expr, ParseError> {
        let cursor = self.parse_ident()?;
        self.expect(&TokenKind::Percent)?;
        let attr = match self.current().as_keyword() {
            Some(Keyword::Isopen) => CursorAttr::IsOpen,
            Some(Keyword::Found) => CursorAttr::Found,
            Some(Keyword::Notfound) => CursorAttr::NotFound,
            _ => return Err(self.error_here(&["ISOPEN", "FOUND", "NOTFOUND"])),
        };
        self.advance();
        Ok(Expr::CursorAttribute { cursor, attr })
    }

    // Calls

    /// `( [arg, ...] )` where an argument may be named with `=>` or `=`.
    pub(crate) fn parse_call_args(&mut self) -> Result<Vec<FuncArg>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        if self.eat(&TokenKind::RightParen) {
            return Ok(Vec::new());
        }
        let args = self.comma_separated(Self::parse_func_arg)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(args)
    }

    pub(crate) fn parse_func_arg(&mut self) -> Result<FuncArg, ParseError> {
        let named = self.is_identifier_part(0)
            && (self.check_nth(1, &TokenKind::Arrow) || self.check_nth(1, &TokenKind::Eq));
        if named {
            let name = self.parse_ident_part()?;
            self.advance();
            let value = self.parse_expr()?;
            return Ok(FuncArg {
                name: Some(name),
                value,
            });
        }
        Ok(FuncArg::positional(self.parse_expr()?))
    }

    fn parse_set_quantifier(&mut self) -> Option<SetQuantifier> {
        let quantifier = match self.current().as_keyword() {
            Some(Keyword::All) => SetQuantifier::All,
            Some(Keyword::Distinct) => SetQuantifier::Distinct,
            _ => return None,
        };
        if self.check_nth(1, &TokenKind::RightParen) || self.check_nth(1, &TokenKind::Comma) {
            return None;
        }
        self.advance();
        Some(quantifier)
    }

    fn parse_aggregate(&mut self, func: AggregateFunc) -> Result<Expr, ParseError> {
        self.advance();
        self.expect(&TokenKind::LeftParen)?;
        let mut call = AggregateCall {
            func,
            quantifier: None,
            args: Vec::new(),
            star: false,
            over: None,
        };
        let window_only = matches!(
            func,
            AggregateFunc::CumeDist
                | AggregateFunc::DenseRank
                | AggregateFunc::Rank
                | AggregateFunc::RowNumber
        );
        let star_allowed = matches!(func, AggregateFunc::Count | AggregateFunc::CountBig);
        if star_allowed && self.eat(&TokenKind::Star) {
            call.star = true;
        } else if !window_only {
            call.quantifier = self.parse_set_quantifier();
            call.args = self.parse_expr_list()?;
        }
        self.expect(&TokenKind::RightParen)?;

        let needs_window = window_only
            || matches!(
                func,
                AggregateFunc::FirstValue
                    | AggregateFunc::LastValue
                    | AggregateFunc::Lag
                    | AggregateFunc::Lead
            );
        if self.check_keyword(Keyword::Over) {
            call.over = Some(self.parse_window_spec()?);
        } else if needs_window {
            return Err(self.error_here(&["OVER"]));
        }
        Ok(Expr::Aggregate(Box::new(call)))
    }

    /// `OVER ( [PARTITION BY exprs] [ORDER BY items] )`
    fn parse_window_spec(&mut self) -> Result<WindowSpec, ParseError> {
        self.expect_keyword(Keyword::Over)?;
        self.expect(&TokenKind::LeftParen)?;
        let mut window = WindowSpec::default();
        if self.eat_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            window.partition_by = self.parse_expr_list()?;
        }
        if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            window.order_by = self.parse_order_items()?;
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(window)
    }

    /// Parses a built-in function with dedicated syntax, if `keyword` names one.
    ///
    /// Parenthesis-free forms are not taken when a `.` or `(` follows, so
    /// `user.name` and `user(x)` stay ordinary names and calls.
    fn parse_special_func(&mut self, keyword: Keyword) -> Result<Option<SpecialFunc>, ParseError> {
        let paren_next = self.check_nth(1, &TokenKind::LeftParen);
        let bare = !paren_next && !self.check_nth(1, &TokenKind::Dot);
        let special = match keyword {
            Keyword::ActivityCount if bare => {
                self.advance();
                SpecialFunc::ActivityCount
            }
            Keyword::Cast if paren_next => {
                self.advance();
                self.advance();
                let expr = self.parse_expr()?;
                self.expect_keyword(Keyword::As)?;
                let data_type = self.parse_data_type()?;
                self.expect(&TokenKind::RightParen)?;
                SpecialFunc::Cast { expr, data_type }
            }
            Keyword::CurrentDate if bare => {
                self.advance();
                SpecialFunc::CurrentDate
            }
            Keyword::Current if self.check_keyword_nth(1, Keyword::Date) => {
                self.advance();
                self.advance();
                SpecialFunc::CurrentDate
            }
            Keyword::Current if self.check_keyword_nth(1, Keyword::Timestamp) => {
                self.advance();
                self.advance();
                SpecialFunc::CurrentTimestamp {
                    precision: self.parse_timestamp_precision()?,
                }
            }
            Keyword::Current if self.check_keyword_nth(1, Keyword::User) => {
                self.advance();
                self.advance();
                SpecialFunc::CurrentUser
            }
            Keyword::CurrentTimestamp if !self.check_nth(1, &TokenKind::Dot) => {
                self.advance();
                SpecialFunc::CurrentTimestamp {
                    precision: self.parse_timestamp_precision()?,
                }
            }
            Keyword::CurrentUser if bare => {
                self.advance();
                SpecialFunc::CurrentUser
            }
            Keyword::User if bare => {
                self.advance();
                SpecialFunc::User
            }
            Keyword::Sysdate if bare => {
                self.advance();
                SpecialFunc::Sysdate
            }
            kw if paren_next => match partition_func(kw) {
                Some(func) => self.parse_partition_func(func)?,
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
        Ok(Some(special))
    }

    fn parse_timestamp_precision(&mut self) -> Result<Option<Expr>, ParseError> {
        if !self.eat(&TokenKind::LeftParen) {
            return Ok(None);
        }
        let precision = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Some(precision))
    }

    /// `TRIM ( expr )` and `SUBSTRING ( expr FROM start [FOR length] )`.
    ///
    /// The first argument is parsed once. What follows it decides between
    /// the dedicated form and an ordinary call.
    fn parse_trim_or_substring(&mut self, keyword: Keyword) -> Result<Expr, ParseError> {
        let name = self.parse_ident()?;
        self.expect(&TokenKind::LeftParen)?;
        if self.eat(&TokenKind::RightParen) {
            return Ok(Expr::Function(FunctionCall { name, args: Vec::new() }));
        }
        let first = self.parse_func_arg()?;
        if first.name.is_none() {
            if keyword == Keyword::Trim && self.eat(&TokenKind::RightParen) {
                return Ok(Expr::Special(Box::new(SpecialFunc::Trim(first.value))));
            }
            if keyword == Keyword::Substring && self.eat_keyword(Keyword::From) {
                let from = self.parse_expr()?;
                let length = if self.eat_keyword(Keyword::For) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                self.expect(&TokenKind::RightParen)?;
                return Ok(Expr::Special(Box::new(SpecialFunc::Substring {
                    expr: first.value,
                    from,
                    length,
                })));
            }
        }
        let mut args = vec![first];
        while self.eat(&TokenKind::Comma) {
            args.push(self.parse_func_arg()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Function(FunctionCall { name, args }))
    }

    /// `FUNC ( table [, column] [, col = value ...] [, host] )`
    fn parse_partition_func(&mut self, func: PartitionFunc) -> Result<SpecialFunc, ParseError> {
        self.advance();
        self.expect(&TokenKind::LeftParen)?;
        let table = self.parse_expr()?;
        let mut column = None;
        let mut filters = Vec::new();
        let mut host = None;
        let has_column = !matches!(func, PartitionFunc::PartCount | PartitionFunc::PartLoc);

        while self.eat(&TokenKind::Comma) {
            let expr = self.parse_expr()?;
            if self.eat(&TokenKind::Eq) {
                let value = self.parse_expr()?;
                filters.push(PartitionFilter {
                    column: expr,
                    value,
                });
            } else if has_column && column.is_none() && filters.is_empty() {
                column = Some(expr);
            } else if func == PartitionFunc::PartLoc && host.is_none() && !filters.is_empty() {
                host = Some(expr);
            } else {
                return Err(self.error_here(&["`=`"]));
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(SpecialFunc::Partition {
            func,
            table,
            column,
            filters,
            host,
        })
    }

    // CASE

    fn parse_case(&mut self) -> Result<Expr, ParseError> {
        self.in_context("CASE", |p| {
            p.expect_keyword(Keyword::Case)?;
            let case = if p.check_keyword(Keyword::When) {
                let mut whens = Vec::new();
                while p.eat_keyword(Keyword::When) {
                    let condition = p.parse_bool_expr()?;
                    p.expect_keyword(Keyword::Then)?;
                    let result = p.parse_expr()?;
                    whens.push(SearchedWhen { condition, result });
                }
                let else_result = p.parse_case_else()?;
                CaseExpr::Searched { whens, else_result }
            } else {
                let operand = p.parse_expr()?;
                let mut whens = Vec::new();
                while p.eat_keyword(Keyword::When) {
                    let value = p.parse_expr()?;
                    p.expect_keyword(Keyword::Then)?;
                    let result = p.parse_expr()?;
                    whens.push(SimpleWhen { value, result });
                }
                if whens.is_empty() {
                    return Err(p.error_here(&["WHEN"]));
                }
                let else_result = p.parse_case_else()?;
                CaseExpr::Simple {
                    operand,
                    whens,
                    else_result,
                }
            };
            p.expect_keyword(Keyword::End)?;
            Ok(Expr::Case(Box::new(case)))
        })
    }

    fn parse_case_else(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.eat_keyword(Keyword::Else) {
            Ok(Some(self.parse_expr()?))
        } else {
            Ok(None)
        }
    }
}
