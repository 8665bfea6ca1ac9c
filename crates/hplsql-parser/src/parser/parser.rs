//! HPL/SQL parser: token cursor, block structure and statement dispatch.

use tracing::{debug, trace, warn};

use super::config::{ParserConfig, RecoveryMode};
use super::error::{ParseError, RuleContext};
use crate::ast::{Assignment, Block, Expr, Program, Statement};
use crate::lexer::{self, Keyword, Token, TokenKind};

/// HPL/SQL parser.
///
/// The parser owns its token vector and walks it with a cursor. Speculative
/// alternatives save the cursor, try a rule and restore the cursor on
/// failure, so lookahead is unbounded but side-effect free.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    config: ParserConfig,
    errors: Vec<ParseError>,
}

impl Parser {
    /// Creates a parser over `tokens`, appending an `Eof` token if missing.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    /// Creates a parser with an explicit configuration.
    #[must_use]
    pub fn with_config(mut tokens: Vec<Token>, config: ParserConfig) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let eof = tokens.last().map_or_else(
                || Token::eof(lexer::Span::ZERO, lexer::Position::default()),
                |last| {
                    let end = lexer::Span::new(last.span.end, last.span.end);
                    Token::eof(end, last.position)
                },
            );
            tokens.push(eof);
        }
        Self {
            tokens,
            pos: 0,
            config,
            errors: Vec::new(),
        }
    }

    /// Tokenizes `sql` with the reference lexer and creates a parser over it.
    #[must_use]
    pub fn from_sql(sql: &str) -> Self {
        Self::new(lexer::tokenize(sql))
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Errors recorded while resynchronizing.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consumes the parser, returning the recorded errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Parses the whole token stream.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` by default. Under
    /// [`RecoveryMode::Resynchronize`] errors are recorded instead, and an
    /// error is only returned once `max_errors` have been recorded.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.current().is_eof() {
            match self.parse_block_item() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => self.recover(err)?,
            }
        }
        Ok(Program {
            block: Block::new(statements),
        })
    }

    /// Parses a single statement.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if no statement starts at the cursor.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let stmt = self.dispatch()?;
        debug!(kind = stmt.kind_name(), "parsed statement");
        Ok(stmt)
    }

    fn recover(&mut self, err: ParseError) -> Result<(), ParseError> {
        if self.config.recovery == RecoveryMode::Fail {
            return Err(err);
        }
        warn!(error = %err, "syntax error, resynchronizing");
        self.errors.push(err.clone());
        if self.errors.len() >= self.config.max_errors {
            return Err(err);
        }
        self.synchronize();
        Ok(())
    }

    /// Skips to just past the next `;`, or to the next statement keyword.
    fn synchronize(&mut self) {
        let start = self.pos;
        while !self.current().is_eof() {
            if self.eat(&TokenKind::Semicolon) {
                return;
            }
            if self.pos > start && self.at_statement_keyword() {
                return;
            }
            self.advance();
        }
    }

    pub(crate) fn at_statement_keyword(&self) -> bool {
        matches!(
            self.current().as_keyword(),
            Some(
                Keyword::Alter
                    | Keyword::Begin
                    | Keyword::Call
                    | Keyword::Close
                    | Keyword::Commit
                    | Keyword::Create
                    | Keyword::Declare
                    | Keyword::Delete
                    | Keyword::Drop
                    | Keyword::Exec
                    | Keyword::Execute
                    | Keyword::Fetch
                    | Keyword::For
                    | Keyword::If
                    | Keyword::Insert
                    | Keyword::Merge
                    | Keyword::Open
                    | Keyword::Print
                    | Keyword::Rollback
                    | Keyword::Sel
                    | Keyword::Select
                    | Keyword::Set
                    | Keyword::Truncate
                    | Keyword::Update
                    | Keyword::While
            )
        )
    }

    // Blocks

    /// Parses one statement plus its optional `;` and `GO` separators.
    pub(crate) fn parse_block_item(&mut self) -> Result<Statement, ParseError> {
        let stmt = self.parse_statement()?;
        if !matches!(stmt, Statement::Empty) {
            self.eat(&TokenKind::Semicolon);
        }
        if self.is_go(0) {
            self.advance();
        }
        Ok(stmt)
    }

    /// Parses one or more statements up to a block terminator.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let mut statements = vec![self.parse_block_item()?];
        while !self.at_block_end() {
            statements.push(self.parse_block_item()?);
        }
        Ok(Block::new(statements))
    }

    /// True at a token that closes the enclosing block.
    ///
    /// `END` only closes a block when it does not start `END TRANSACTION`.
    pub(crate) fn at_block_end(&self) -> bool {
        match &self.current().kind {
            TokenKind::Eof
            | TokenKind::RightParen
            | TokenKind::Keyword(
                Keyword::Else
                | Keyword::Elsif
                | Keyword::Elseif
                | Keyword::Exception
                | Keyword::When,
            ) => true,
            TokenKind::Keyword(Keyword::End) => !self.check_keyword_nth(1, Keyword::Transaction),
            _ => false,
        }
    }

    /// Consumes the `END` that closes a block.
    pub(crate) fn expect_block_end(&mut self) -> Result<(), ParseError> {
        if self.check_keyword(Keyword::End) && !self.check_keyword_nth(1, Keyword::Transaction) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(&["END"]))
        }
    }

    /// Parses `BEGIN block END` or a single statement with an optional `;`.
    pub(crate) fn parse_single_block_stmt(
        &mut self,
        eat_semicolon: bool,
    ) -> Result<Statement, ParseError> {
        if self.check_keyword(Keyword::Begin) && !self.check_keyword_nth(1, Keyword::Transaction) {
            let block = self.parse_begin_end_block(Vec::new())?;
            debug!(kind = "block", "parsed statement");
            return Ok(Statement::Block(block));
        }
        let stmt = self.parse_statement()?;
        if eat_semicolon && !matches!(stmt, Statement::Empty) {
            self.eat(&TokenKind::Semicolon);
        }
        Ok(stmt)
    }

    // Dispatch

    fn dispatch(&mut self) -> Result<Statement, ParseError> {
        match self.current().kind.clone() {
            TokenKind::Semicolon | TokenKind::Slash => {
                self.advance();
                Ok(Statement::Empty)
            }
            TokenKind::Label(name) => {
                self.advance();
                Ok(Statement::Label(name))
            }
            TokenKind::Lt if self.check_nth(1, &TokenKind::Lt) => self.parse_bracket_label(),
            TokenKind::Bang => Ok(self.parse_host_command()),
            TokenKind::Dot if self.check_keyword_nth(1, Keyword::If) => self.parse_bteq_if(),
            TokenKind::Dot if self.check_keyword_nth(1, Keyword::Quit) => {
                self.advance();
                self.parse_quit(true)
            }
            TokenKind::LeftParen => {
                if self.is_assignment_start() {
                    self.parse_assignment_stmt(false)
                } else if self.starts_nested_select() {
                    Ok(Statement::Select(Box::new(self.parse_select_stmt()?)))
                } else {
                    self.parse_expr_stmt()
                }
            }
            kind if kind.is_identifier_like() && self.is_assignment_start() => {
                self.parse_assignment_stmt(false)
            }
            TokenKind::Keyword(keyword) => self.dispatch_keyword(keyword),
            _ => self.parse_expr_stmt(),
        }
    }

    fn dispatch_keyword(&mut self, keyword: Keyword) -> Result<Statement, ParseError> {
        let ident_next = self.is_identifier_part(1);
        match keyword {
            // Blocks and control flow
            Keyword::Begin if self.check_keyword_nth(1, Keyword::Transaction) => {
                self.advance();
                self.advance();
                Ok(Statement::BeginTransaction)
            }
            Keyword::Begin => Ok(Statement::Block(self.parse_begin_end_block(Vec::new())?)),
            Keyword::Declare => self.parse_declare(),
            Keyword::End if self.check_keyword_nth(1, Keyword::Transaction) => {
                self.advance();
                self.advance();
                Ok(Statement::EndTransaction)
            }
            Keyword::If => self.parse_if(),
            Keyword::While => self.parse_while(),
            Keyword::For => self.parse_for(),
            Keyword::Loop => self.parse_loop(),
            Keyword::Null => {
                self.advance();
                Ok(Statement::Null)
            }

            // DML
            Keyword::Select | Keyword::Sel | Keyword::With
                if keyword != Keyword::With || ident_next =>
            {
                Ok(Statement::Select(Box::new(self.parse_select_stmt()?)))
            }
            Keyword::Insert => self.parse_insert_any(),
            Keyword::Update => Ok(Statement::Update(Box::new(self.parse_update()?))),
            Keyword::Delete => Ok(Statement::Delete(self.parse_delete()?)),
            Keyword::Merge => Ok(Statement::Merge(Box::new(self.parse_merge()?))),
            Keyword::Values => Ok(Statement::ValuesInto(self.parse_values_into()?)),

            // DDL
            Keyword::Create => self.parse_create(),
            Keyword::Alter => self.parse_alter(),
            Keyword::Replace
                if matches!(
                    self.peek_nth(1).as_keyword(),
                    Some(Keyword::Function | Keyword::Procedure | Keyword::Proc | Keyword::Package)
                ) =>
            {
                let start = self.pos;
                self.advance();
                self.parse_routine(crate::ast::RoutinePrefix::Replace, start)
            }
            Keyword::Function | Keyword::Procedure | Keyword::Proc | Keyword::Package
                if ident_next =>
            {
                self.parse_routine(crate::ast::RoutinePrefix::None, self.pos)
            }
            Keyword::Drop => self.parse_drop(),
            Keyword::Truncate if ident_next || self.check_keyword_nth(1, Keyword::Table) => {
                self.parse_truncate()
            }
            Keyword::Type if ident_next && self.check_keyword_nth(2, Keyword::Is) => {
                self.parse_create_table_type()
            }

            // Assignment and session options
            Keyword::Set => self.parse_set(),

            _ => self.dispatch_command(keyword),
        }
    }

    /// Cursor, transaction, call, diagnostics and utility statements.
    fn dispatch_command(&mut self, keyword: Keyword) -> Result<Statement, ParseError> {
        let ident_next = self.is_identifier_part(1);
        match keyword {
            // Cursors
            Keyword::Allocate if ident_next => self.parse_allocate_cursor(),
            Keyword::Associate => self.parse_associate_locator(),
            Keyword::Open if ident_next => self.parse_open(),
            Keyword::Fetch if ident_next || self.check_keyword_nth(1, Keyword::From) => {
                self.parse_fetch()
            }
            Keyword::Close if ident_next => {
                self.advance();
                Ok(Statement::Close(self.parse_ident()?))
            }

            // Transactions
            Keyword::Commit => {
                self.advance();
                Ok(Statement::Commit {
                    work: self.eat_keyword(Keyword::Work),
                })
            }
            Keyword::Rollback => {
                self.advance();
                Ok(Statement::Rollback {
                    work: self.eat_keyword(Keyword::Work),
                })
            }

            // Control
            Keyword::Break => {
                self.advance();
                Ok(Statement::Break)
            }
            Keyword::Leave => {
                self.advance();
                Ok(Statement::Leave(self.parse_optional_label()?))
            }
            Keyword::Exit => self.parse_exit(),
            Keyword::Return => self.parse_return(),

            // Routine calls
            Keyword::Call => self.parse_call(),
            Keyword::Exec | Keyword::Execute => self.parse_exec(),

            // Diagnostics
            Keyword::Get if self.check_keyword_nth(1, Keyword::Diagnostics) => {
                self.parse_get_diagnostics()
            }
            Keyword::Signal if ident_next => {
                self.advance();
                Ok(Statement::Signal(self.parse_ident()?))
            }
            Keyword::Resignal => self.parse_resignal(),
            Keyword::Raise => {
                self.advance();
                let name = if self.is_identifier_part(0) && !self.is_go(0) {
                    Some(self.parse_ident()?)
                } else {
                    None
                };
                Ok(Statement::Raise(name))
            }

            // Utility
            Keyword::Describe | Keyword::Desc => self.parse_describe(),
            Keyword::Use => {
                self.advance();
                Ok(Statement::Use(self.parse_expr()?))
            }
            Keyword::Print => {
                self.advance();
                Ok(Statement::Print(self.parse_expr()?))
            }
            Keyword::Quit => self.parse_quit(false),
            Keyword::Include => self.parse_include(),
            Keyword::Grant => self.parse_grant(),
            Keyword::Map if self.check_keyword_nth(1, Keyword::Object) => self.parse_map_object(),
            Keyword::Collect
                if matches!(
                    self.peek_nth(1).as_keyword(),
                    Some(Keyword::Statistics | Keyword::Stats)
                ) =>
            {
                self.parse_collect_stats()
            }
            Keyword::Cmp => self.parse_cmp(),
            Keyword::Copy => self.parse_copy(),
            Keyword::Summary => self.parse_summary(),
            Keyword::Hive => self.parse_hive(),
            Keyword::Host => {
                self.advance();
                Ok(Statement::Host(self.parse_expr()?))
            }

            _ => self.parse_expr_stmt(),
        }
    }

    /// An expression used as a statement. `GO` is a batch separator here.
    fn parse_expr_stmt(&mut self) -> Result<Statement, ParseError> {
        if self.is_go(0) {
            return Err(ParseError::ambiguous(
                "GO is a batch separator, not an expression",
                self.current(),
            ));
        }
        if !self.starts_expression() {
            return Err(self.error_here(&["statement"]));
        }
        Ok(Statement::Expr(self.parse_expr()?))
    }

    // Assignment

    /// Lookahead: `ident [:]=` or `(ident, ...) [:]=`.
    pub(crate) fn is_assignment_start(&mut self) -> bool {
        let start = self.pos;
        let targets_ok = if self.eat(&TokenKind::LeftParen) {
            self.parse_ident_list().is_ok() && self.eat(&TokenKind::RightParen)
        } else {
            self.parse_ident().is_ok()
        };
        let result = targets_ok && self.at_assign_op();
        self.pos = start;
        result
    }

    fn at_assign_op(&self) -> bool {
        self.check(&TokenKind::Eq)
            || (self.check(&TokenKind::Colon) && self.check_nth(1, &TokenKind::Eq))
    }

    fn expect_assign_op(&mut self) -> Result<(), ParseError> {
        self.eat(&TokenKind::Colon);
        self.expect(&TokenKind::Eq)
    }

    /// Parses `[SET] item, ...` once `SET` (if any) has been consumed.
    pub(crate) fn parse_assignment_stmt(&mut self, set: bool) -> Result<Statement, ParseError> {
        let mut items = vec![self.parse_assignment_item()?];
        while self.check(&TokenKind::Comma) && self.assignment_item_follows() {
            self.advance();
            items.push(self.parse_assignment_item()?);
        }
        Ok(Statement::Assignment { set, items })
    }

    fn assignment_item_follows(&mut self) -> bool {
        let start = self.pos;
        self.advance();
        let result = self.is_assignment_start();
        self.pos = start;
        result
    }

    /// `x := e`, `(a, b) = (e, f)` or `(a, b) = (SELECT ...)`.
    pub(crate) fn parse_assignment_item(&mut self) -> Result<Assignment, ParseError> {
        if !self.eat(&TokenKind::LeftParen) {
            let target = self.parse_ident()?;
            self.expect_assign_op()?;
            let value = self.parse_expr()?;
            return Ok(Assignment::Single { target, value });
        }

        let targets = self.parse_ident_list()?;
        self.expect(&TokenKind::RightParen)?;
        self.expect_assign_op()?;
        self.expect(&TokenKind::LeftParen)?;
        if self.starts_select() {
            let query = self.parse_select_stmt()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(Assignment::Select {
                targets,
                query: Box::new(query),
            });
        }
        let values = self.parse_expr_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Assignment::Multiple { targets, values })
    }

    // Cursor helpers

    /// Returns the current token.
    pub(crate) fn current(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Returns the token `n` positions ahead, or `Eof` past the end.
    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Advances to the next token. Never moves past `Eof`.
    pub(crate) fn advance(&mut self) {
        if !self.current().is_eof() {
            self.pos += 1;
        }
    }

    /// Returns the current token and advances.
    pub(crate) fn next_token(&mut self) -> Token {
        let token = self.current().clone();
        self.advance();
        token
    }

    /// Current cursor position.
    pub(crate) const fn position(&self) -> usize {
        self.pos
    }

    /// Checks if the current token matches the given kind.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.current().kind == *kind
    }

    pub(crate) fn check_nth(&self, n: usize, kind: &TokenKind) -> bool {
        self.peek_nth(n).kind == *kind
    }

    /// Checks if the current token is the given keyword.
    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check_keyword_nth(0, keyword)
    }

    pub(crate) fn check_keyword_nth(&self, n: usize, keyword: Keyword) -> bool {
        self.peek_nth(n).as_keyword() == Some(keyword)
    }

    /// Consumes the current token if it matches.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a specific token kind.
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            let wanted = kind.to_string();
            Err(self.error_here(&[wanted.as_str()]))
        }
    }

    /// Expects a specific keyword.
    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error_here(&[keyword.as_str()]))
        }
    }

    /// Consumes one of `keywords`, returning which.
    pub(crate) fn expect_one_of(&mut self, keywords: &[Keyword]) -> Result<Keyword, ParseError> {
        match self.current().as_keyword() {
            Some(kw) if keywords.contains(&kw) => {
                self.advance();
                Ok(kw)
            }
            _ => {
                let names: Vec<&str> = keywords.iter().map(Keyword::as_str).collect();
                Err(self.error_here(&names))
            }
        }
    }

    /// Builds an error at the current token.
    pub(crate) fn error_here(&self, expected: &[&str]) -> ParseError {
        ParseError::unexpected(expected, self.current())
    }

    /// True if the token `n` ahead is the `GO` batch separator.
    pub(crate) fn is_go(&self, n: usize) -> bool {
        let token = self.peek_nth(n);
        matches!(token.kind, TokenKind::Identifier(_)) && token.text_is("GO")
    }

    /// Tries `rule`; on failure restores the cursor and returns `None`.
    pub(crate) fn speculate<T>(
        &mut self,
        rule: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Option<T> {
        let start = self.pos;
        match f(self) {
            Ok(value) => Some(value),
            Err(err) => {
                trace!(rule, error = %err, "abandoned speculative parse");
                self.pos = start;
                None
            }
        }
    }

    /// Runs `f`, annotating escaping errors with `rule` starting at the cursor.
    pub(crate) fn in_context<T>(
        &mut self,
        rule: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let start = self.pos;
        self.in_context_from(rule, start, f)
    }

    /// Like [`Self::in_context`] for a rule whose first token is at `start`.
    pub(crate) fn in_context_from<T>(
        &mut self,
        rule: &'static str,
        start: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let first = &self.tokens[start.min(self.tokens.len() - 1)];
        let context = RuleContext {
            rule,
            span: first.span,
            position: first.position,
        };
        f(self).map_err(|err| err.with_context(context))
    }

    /// Parses `item (, item)*`.
    pub(crate) fn comma_separated<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![f(self)?];
        while self.eat(&TokenKind::Comma) {
            items.push(f(self)?);
        }
        Ok(items)
    }

    /// Parses `expr (, expr)*`.
    pub(crate) fn parse_expr_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.comma_separated(Self::parse_expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_is_appended() {
        let mut parser = Parser::new(Vec::new());
        assert!(parser.current().is_eof());
        parser.advance();
        assert!(parser.current().is_eof());
        let program = parser.parse_program().unwrap();
        assert!(program.block.is_empty());
    }

    #[test]
    fn test_speculate_restores_cursor() {
        let mut parser = Parser::from_sql("a b");
        let result: Option<()> = parser.speculate("test", |p| {
            p.advance();
            Err(p.error_here(&["nothing"]))
        });
        assert!(result.is_none());
        assert_eq!(parser.position(), 0);
    }

    #[test]
    fn test_block_end_predicate() {
        let parser = Parser::from_sql("END TRANSACTION");
        assert!(!parser.at_block_end());
        let parser = Parser::from_sql("END");
        assert!(parser.at_block_end());
        let parser = Parser::from_sql("END IF");
        assert!(parser.at_block_end());
    }

    #[test]
    fn test_assignment_lookahead() {
        let mut parser = Parser::from_sql("x := 1");
        assert!(parser.is_assignment_start());
        assert_eq!(parser.position(), 0);
        let mut parser = Parser::from_sql("(a, b) = (1, 2)");
        assert!(parser.is_assignment_start());
        let mut parser = Parser::from_sql("x + 1");
        assert!(!parser.is_assignment_start());
    }

    #[test]
    fn test_go_separator() {
        let parser = Parser::from_sql("go");
        assert!(parser.is_go(0));
        let parser = Parser::from_sql("[go]");
        assert!(!parser.is_go(0));
    }
}
