//! Control flow: BEGIN blocks, IF, WHILE, FOR, LOOP, labels and exits.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    BeginEndBlock, DeclareItem, ElseIf, ExceptionHandler, ForCursorStmt, ForRangeStmt, Ident,
    IfForm, IfStmt, Statement, WhileStmt,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// `BEGIN block [EXCEPTION handlers] END`, with `declarations` already parsed.
    pub(crate) fn parse_begin_end_block(
        &mut self,
        declarations: Vec<DeclareItem>,
    ) -> Result<BeginEndBlock, ParseError> {
        self.in_context("BEGIN", |p| {
            p.expect_keyword(Keyword::Begin)?;
            let body = p.parse_block()?;
            let handlers = if p.eat_keyword(Keyword::Exception) {
                p.parse_exception_handlers()?
            } else {
                Vec::new()
            };
            p.expect_block_end()?;
            Ok(BeginEndBlock {
                declarations,
                body,
                handlers,
            })
        })
    }

    /// `WHEN name THEN block ...`
    fn parse_exception_handlers(&mut self) -> Result<Vec<ExceptionHandler>, ParseError> {
        let mut handlers = Vec::new();
        while self.eat_keyword(Keyword::When) {
            let condition = self.parse_ident()?;
            self.expect_keyword(Keyword::Then)?;
            let body = self.parse_block()?;
            handlers.push(ExceptionHandler { condition, body });
        }
        if handlers.is_empty() {
            return Err(self.error_here(&["WHEN"]));
        }
        Ok(handlers)
    }

    // IF

    /// `IF cond THEN block [ELSIF ...] [ELSE block] END IF`, or the
    /// T-SQL `IF cond stmt [ELSE stmt]` form.
    pub(crate) fn parse_if(&mut self) -> Result<Statement, ParseError> {
        self.in_context("IF", |p| {
            p.expect_keyword(Keyword::If)?;
            let condition = p.parse_bool_expr()?;
            let stmt = if p.eat_keyword(Keyword::Then) {
                p.parse_plsql_if_rest(condition)?
            } else {
                p.parse_tsql_if_rest(condition)?
            };
            Ok(Statement::If(Box::new(stmt)))
        })
    }

    fn parse_plsql_if_rest(&mut self, condition: crate::ast::BoolExpr) -> Result<IfStmt, ParseError> {
        let then_branch = self.parse_block()?;
        let mut elseifs = Vec::new();
        while self.check_keyword(Keyword::Elsif) || self.check_keyword(Keyword::Elseif) {
            self.advance();
            let condition = self.parse_bool_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let body = self.parse_block()?;
            elseifs.push(ElseIf { condition, body });
        }
        let else_branch = if self.eat_keyword(Keyword::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::If)?;
        Ok(IfStmt {
            form: IfForm::PlSql,
            condition,
            then_branch,
            elseifs,
            else_branch,
        })
    }

    fn parse_tsql_if_rest(&mut self, condition: crate::ast::BoolExpr) -> Result<IfStmt, ParseError> {
        let then_stmt = self.parse_single_block_stmt(true)?;
        let else_branch = if self.eat_keyword(Keyword::Else) {
            Some(crate::ast::Block::new(vec![
                self.parse_single_block_stmt(true)?
            ]))
        } else {
            None
        };
        Ok(IfStmt {
            form: IfForm::TSql,
            condition,
            then_branch: crate::ast::Block::new(vec![then_stmt]),
            elseifs: Vec::new(),
            else_branch,
        })
    }

    /// `.IF cond THEN stmt`
    pub(crate) fn parse_bteq_if(&mut self) -> Result<Statement, ParseError> {
        self.in_context("IF", |p| {
            p.expect(&TokenKind::Dot)?;
            p.expect_keyword(Keyword::If)?;
            let condition = p.parse_bool_expr()?;
            p.expect_keyword(Keyword::Then)?;
            let stmt = p.parse_single_block_stmt(true)?;
            Ok(Statement::If(Box::new(IfStmt {
                form: IfForm::Bteq,
                condition,
                then_branch: crate::ast::Block::new(vec![stmt]),
                elseifs: Vec::new(),
                else_branch: None,
            })))
        })
    }

    // Loops

    /// `WHILE cond (DO | LOOP | THEN | BEGIN) block END [WHILE | LOOP]`
    pub(crate) fn parse_while(&mut self) -> Result<Statement, ParseError> {
        self.in_context("WHILE", |p| {
            p.expect_keyword(Keyword::While)?;
            let condition = p.parse_bool_expr()?;
            p.expect_one_of(&[Keyword::Do, Keyword::Loop, Keyword::Then, Keyword::Begin])?;
            let body = p.parse_block()?;
            p.expect_block_end()?;
            if !p.eat_keyword(Keyword::While) {
                p.eat_keyword(Keyword::Loop);
            }
            Ok(Statement::While(WhileStmt { condition, body }))
        })
    }

    /// The cursor and integer-range forms of `FOR`.
    pub(crate) fn parse_for(&mut self) -> Result<Statement, ParseError> {
        self.in_context("FOR", |p| {
            p.expect_keyword(Keyword::For)?;
            let index = Ident::new(p.parse_ident_part()?);
            p.expect_keyword(Keyword::In)?;

            if p.starts_select() || p.starts_nested_select() {
                let paren = p.eat(&TokenKind::LeftParen);
                let query = p.parse_select_stmt()?;
                if paren {
                    p.expect(&TokenKind::RightParen)?;
                }
                let body = p.parse_loop_body()?;
                return Ok(Statement::ForCursor(ForCursorStmt {
                    record: index,
                    query: Box::new(query),
                    body,
                }));
            }

            let reverse =
                p.check_keyword(Keyword::Reverse) && !p.check_nth(1, &TokenKind::DotDot);
            if reverse {
                p.advance();
            }
            let low = p.parse_expr()?;
            p.expect(&TokenKind::DotDot)?;
            let high = p.parse_expr()?;
            let step = if p.eat_keyword(Keyword::By) || p.eat_keyword(Keyword::Step) {
                Some(p.parse_expr()?)
            } else {
                None
            };
            let body = p.parse_loop_body()?;
            Ok(Statement::ForRange(Box::new(ForRangeStmt {
                index,
                reverse,
                low,
                high,
                step,
                body,
            })))
        })
    }

    /// `LOOP block END LOOP`
    pub(crate) fn parse_loop(&mut self) -> Result<Statement, ParseError> {
        self.in_context("LOOP", |p| Ok(Statement::Loop(p.parse_loop_body()?)))
    }

    fn parse_loop_body(&mut self) -> Result<crate::ast::Block, ParseError> {
        self.expect_keyword(Keyword::Loop)?;
        let body = self.parse_block()?;
        self.expect_block_end()?;
        self.expect_keyword(Keyword::Loop)?;
        Ok(body)
    }

    // Labels and exits

    /// `<< name >>`
    pub(crate) fn parse_bracket_label(&mut self) -> Result<Statement, ParseError> {
        self.expect(&TokenKind::Lt)?;
        self.expect(&TokenKind::Lt)?;
        let name = self.parse_ident_part()?;
        self.expect(&TokenKind::Gt)?;
        self.expect(&TokenKind::Gt)?;
        Ok(Statement::Label(name))
    }

    /// A loop label after `LEAVE` or `EXIT`.
    ///
    /// Only a plain identifier that does not start an assignment or a
    /// call is taken, so the next statement is never swallowed.
    pub(crate) fn parse_optional_label(&mut self) -> Result<Option<Ident>, ParseError> {
        let label_next = matches!(self.current().kind, TokenKind::Identifier(_))
            && !self.is_go(0)
            && !matches!(
                self.peek_nth(1).kind,
                TokenKind::Eq | TokenKind::Colon | TokenKind::LeftParen | TokenKind::Dot
            );
        if !label_next {
            return Ok(None);
        }
        Ok(Some(Ident::new(self.parse_ident_part()?)))
    }

    /// `EXIT [label] [WHEN cond]`
    pub(crate) fn parse_exit(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Exit)?;
        let label = self.parse_optional_label()?;
        let condition = if self.eat_keyword(Keyword::When) {
            Some(self.parse_bool_expr()?)
        } else {
            None
        };
        Ok(Statement::Exit { label, condition })
    }

    /// `RETURN [expr]`
    pub(crate) fn parse_return(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Return)?;
        if !self.starts_expression() {
            return Ok(Statement::Return(None));
        }
        Ok(Statement::Return(Some(self.parse_expr()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Block;

    fn stmt(sql: &str) -> Statement {
        Parser::from_sql(sql).parse_statement().unwrap()
    }

    #[test]
    fn test_plsql_if() {
        let Statement::If(stmt) = stmt(
            "IF a = 1 THEN x := 1; ELSIF a = 2 THEN x := 2; ELSE x := 3; END IF",
        ) else {
            panic!("expected IF");
        };
        assert_eq!(stmt.form, IfForm::PlSql);
        assert_eq!(stmt.elseifs.len(), 1);
        assert_eq!(stmt.else_branch.as_ref().map(Block::len), Some(1));
    }

    #[test]
    fn test_tsql_if() {
        let Statement::If(stmt) = stmt("IF @a > 0 PRINT 'pos'; ELSE BEGIN PRINT 'neg'; END") else {
            panic!("expected IF");
        };
        assert_eq!(stmt.form, IfForm::TSql);
        assert!(matches!(stmt.then_branch.statements[0], Statement::Print(_)));
        let else_branch = stmt.else_branch.unwrap();
        assert!(matches!(else_branch.statements[0], Statement::Block(_)));
    }

    #[test]
    fn test_bteq_if() {
        let Statement::If(stmt) = stmt(".IF ACTIVITY_COUNT = 0 THEN .QUIT 1") else {
            panic!("expected IF");
        };
        assert_eq!(stmt.form, IfForm::Bteq);
        assert!(matches!(
            stmt.then_branch.statements[0],
            Statement::Quit { dot: true, code: Some(_) }
        ));
    }

    #[test]
    fn test_while_forms() {
        assert!(matches!(
            stmt("WHILE i < 10 LOOP i := i + 1; END LOOP"),
            Statement::While(_)
        ));
        assert!(matches!(
            stmt("WHILE i < 10 BEGIN SET i = i + 1; END"),
            Statement::While(_)
        ));
    }

    #[test]
    fn test_for_range() {
        let Statement::ForRange(stmt) = stmt("FOR i IN REVERSE 1..10 STEP 2 LOOP PRINT i; END LOOP") else {
            panic!("expected FOR");
        };
        assert!(stmt.reverse);
        assert!(stmt.step.is_some());
        assert_eq!(stmt.body.len(), 1);
    }

    #[test]
    fn test_for_cursor() {
        assert!(matches!(
            stmt("FOR r IN (SELECT a FROM t) LOOP PRINT r.a; END LOOP"),
            Statement::ForCursor(_)
        ));
    }

    #[test]
    fn test_block_with_handlers() {
        let Statement::Block(block) = stmt(
            "BEGIN x := 1; EXCEPTION WHEN no_data THEN NULL; WHEN OTHERS THEN RAISE; END",
        ) else {
            panic!("expected block");
        };
        assert_eq!(block.handlers.len(), 2);
        assert_eq!(block.handlers[1].condition.name(), "OTHERS");
    }

    #[test]
    fn test_end_transaction_inside_block() {
        let Statement::Block(block) = stmt("BEGIN BEGIN TRANSACTION; END TRANSACTION; END") else {
            panic!("expected block");
        };
        assert_eq!(
            block.body.statements,
            vec![Statement::BeginTransaction, Statement::EndTransaction]
        );
    }

    #[test]
    fn test_exit_and_labels() {
        assert_eq!(
            stmt("EXIT outer_loop"),
            Statement::Exit {
                label: Some(Ident::new("outer_loop")),
                condition: None,
            }
        );
        assert!(matches!(
            stmt("EXIT WHEN i > 3"),
            Statement::Exit { label: None, condition: Some(_) }
        ));
        assert_eq!(stmt("<<top>>"), Statement::Label("top".into()));
        assert_eq!(stmt("RETURN"), Statement::Return(None));
        assert!(matches!(stmt("RETURN x + 1"), Statement::Return(Some(_))));
    }
}
