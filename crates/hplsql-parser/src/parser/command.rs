//! Session, cursor, call, diagnostics and utility statements.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    CmpKind, CmpSource, CopyFileOption, CopyFromLocalStmt, CopyOption, CopyStmt, DataSource,
    DiagnosticsItem, ExecStmt, Expr, FetchStmt, FuncArg, GetDiagnosticsStmt, HiveItem,
    MapObjectStmt, MsSqlSessionOption, SetOption, Statement,
};
use crate::lexer::{Keyword, TokenKind};

const fn mssql_session_option(keyword: Keyword) -> Option<MsSqlSessionOption> {
    let option = match keyword {
        Keyword::AnsiNulls => MsSqlSessionOption::AnsiNulls,
        Keyword::AnsiPadding => MsSqlSessionOption::AnsiPadding,
        Keyword::Nocount => MsSqlSessionOption::NoCount,
        Keyword::QuotedIdentifier => MsSqlSessionOption::QuotedIdentifier,
        Keyword::XactAbort => MsSqlSessionOption::XactAbort,
        _ => return None,
    };
    Some(option)
}

impl Parser {
    // SET

    /// `SET` followed by a session option or one or more assignments.
    pub(crate) fn parse_set(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Set)?;

        let current_schema = self.check_keyword(Keyword::CurrentSchema)
            || (self.check_keyword(Keyword::Current) && self.check_keyword_nth(1, Keyword::Schema));
        if current_schema {
            if !self.eat_keyword(Keyword::CurrentSchema) {
                self.advance();
                self.advance();
            }
            self.eat(&TokenKind::Eq);
            return Ok(Statement::SetOption(SetOption::CurrentSchema(self.parse_expr()?)));
        }

        let flag_value = matches!(self.peek_nth(1).as_keyword(), Some(Keyword::On | Keyword::Off));
        if let Some(option) = self.current().as_keyword().and_then(mssql_session_option) {
            if flag_value {
                self.advance();
                let on = self.expect_one_of(&[Keyword::On, Keyword::Off])? == Keyword::On;
                return Ok(Statement::SetOption(SetOption::MsSql { option, on }));
            }
        }

        if self.check_keyword(Keyword::QueryBand) && self.check_nth(1, &TokenKind::Eq) {
            return self.parse_query_band();
        }

        self.parse_assignment_stmt(true)
    }

    /// `QUERY_BAND = value | NONE [UPDATE] FOR SESSION | TRANSACTION`
    fn parse_query_band(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::QueryBand)?;
        self.expect(&TokenKind::Eq)?;
        let value = if self.eat_keyword(Keyword::None) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let update = self.eat_keyword(Keyword::Update);
        self.expect_keyword(Keyword::For)?;
        let session = self.expect_one_of(&[Keyword::Session, Keyword::Transaction])?
            == Keyword::Session;
        Ok(Statement::SetOption(SetOption::QueryBand {
            value,
            update,
            session,
        }))
    }

    // Cursors

    /// `ALLOCATE c CURSOR FOR RESULT SET loc` or `... FOR PROCEDURE p`
    pub(crate) fn parse_allocate_cursor(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Allocate)?;
        let cursor = self.parse_ident()?;
        self.expect_keyword(Keyword::Cursor)?;
        self.expect_keyword(Keyword::For)?;
        if self.eat_keyword(Keyword::Result) {
            self.expect_keyword(Keyword::Set)?;
        } else {
            self.expect_keyword(Keyword::Procedure)?;
        }
        let source = self.parse_ident()?;
        Ok(Statement::AllocateCursor { cursor, source })
    }

    /// `ASSOCIATE [RESULT SET] LOCATOR[S] (l, ...) WITH PROCEDURE p`
    pub(crate) fn parse_associate_locator(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Associate)?;
        if self.eat_keyword(Keyword::Result) {
            self.expect_keyword(Keyword::Set)?;
        }
        self.expect_one_of(&[Keyword::Locator, Keyword::Locators])?;
        let locators = self.parse_paren_ident_list()?;
        self.expect_keyword(Keyword::With)?;
        self.expect_keyword(Keyword::Procedure)?;
        let procedure = self.parse_ident()?;
        Ok(Statement::AssociateLocator {
            locators,
            procedure,
        })
    }

    /// `OPEN c [FOR select | expr]`
    pub(crate) fn parse_open(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Open)?;
        let cursor = self.parse_ident()?;
        let query = if self.eat_keyword(Keyword::For) {
            Some(self.parse_cursor_query()?)
        } else {
            None
        };
        Ok(Statement::Open { cursor, query })
    }

    /// `FETCH [FROM] c [BULK COLLECT] INTO v, ... [LIMIT n]`
    pub(crate) fn parse_fetch(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Fetch)?;
        self.eat_keyword(Keyword::From);
        let cursor = self.parse_ident()?;
        let bulk_collect = self.eat_keyword(Keyword::Bulk);
        if bulk_collect {
            self.expect_keyword(Keyword::Collect)?;
        }
        self.expect_keyword(Keyword::Into)?;
        let into = self.parse_ident_list()?;
        let limit = if self.eat_keyword(Keyword::Limit) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Fetch(FetchStmt {
            cursor,
            bulk_collect,
            into,
            limit,
        }))
    }

    // Calls

    /// `CALL name [( args )]` or `CALL name arg, ...`
    pub(crate) fn parse_call(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Call)?;
        let name = self.parse_ident()?;
        let args = self.parse_routine_args()?;
        Ok(Statement::Call { name, args })
    }

    /// Parenthesised or bare arguments of CALL and EXEC.
    fn parse_routine_args(&mut self) -> Result<Vec<FuncArg>, ParseError> {
        if self.check(&TokenKind::LeftParen) {
            return self.parse_call_args();
        }
        let bare = self.starts_expression()
            && !self.check_keyword(Keyword::Into)
            && !self.at_statement_keyword();
        if bare {
            return self.comma_separated(Self::parse_func_arg);
        }
        Ok(Vec::new())
    }

    /// `EXEC [IMMEDIATE] target [args] [INTO v, ...] [USING e, ...]`
    ///
    /// A procedure name takes arguments; a string or parenthesised
    /// expression is dynamic SQL.
    pub(crate) fn parse_exec(&mut self) -> Result<Statement, ParseError> {
        self.expect_one_of(&[Keyword::Exec, Keyword::Execute])?;
        let immediate = self.eat_keyword(Keyword::Immediate);

        let procedure = !immediate && self.is_identifier_part(0) && !self.is_go(0);
        let (target, args) = if procedure {
            let name = self.parse_ident()?;
            let args = self.parse_routine_args()?;
            (Expr::Ident(name), args)
        } else {
            (self.parse_expr()?, Vec::new())
        };

        let into = if self.eat_keyword(Keyword::Into) {
            self.parse_ident_list()?
        } else {
            Vec::new()
        };
        let using = if self.eat_keyword(Keyword::Using) {
            self.parse_expr_list()?
        } else {
            Vec::new()
        };
        Ok(Statement::Exec(Box::new(ExecStmt {
            immediate,
            target,
            args,
            into,
            using,
        })))
    }

    // Diagnostics

    /// `GET DIAGNOSTICS EXCEPTION n v = MESSAGE_TEXT` or `GET DIAGNOSTICS v = ROW_COUNT`
    pub(crate) fn parse_get_diagnostics(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Get)?;
        self.expect_keyword(Keyword::Diagnostics)?;
        if self.eat_keyword(Keyword::Exception) {
            let condition = self.parse_int_literal()?;
            let target = self.parse_ident()?;
            self.expect(&TokenKind::Eq)?;
            self.expect_keyword(Keyword::MessageText)?;
            return Ok(Statement::GetDiagnostics(GetDiagnosticsStmt {
                target,
                item: DiagnosticsItem::MessageText { condition },
            }));
        }
        let target = self.parse_ident()?;
        self.expect(&TokenKind::Eq)?;
        self.expect_keyword(Keyword::RowCount)?;
        Ok(Statement::GetDiagnostics(GetDiagnosticsStmt {
            target,
            item: DiagnosticsItem::RowCount,
        }))
    }

    /// `RESIGNAL [SQLSTATE [VALUE] e [SET MESSAGE_TEXT = e]]`
    pub(crate) fn parse_resignal(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Resignal)?;
        if !self.eat_keyword(Keyword::Sqlstate) {
            return Ok(Statement::Resignal {
                sqlstate: None,
                message: None,
            });
        }
        self.eat_keyword(Keyword::Value);
        let sqlstate = self.parse_expr()?;
        let message = if self.eat_keyword(Keyword::Set) {
            self.expect_keyword(Keyword::MessageText)?;
            self.expect(&TokenKind::Eq)?;
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Resignal {
            sqlstate: Some(sqlstate),
            message,
        })
    }

    // Utility

    /// `DESCRIBE | DESC [TABLE] name`
    pub(crate) fn parse_describe(&mut self) -> Result<Statement, ParseError> {
        self.expect_one_of(&[Keyword::Describe, Keyword::Desc])?;
        self.eat_keyword(Keyword::Table);
        Ok(Statement::Describe(self.parse_ident()?))
    }

    /// `QUIT [expr]`, after the `.` of `.QUIT` when `dot` is set.
    pub(crate) fn parse_quit(&mut self, dot: bool) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Quit)?;
        let code = if self.starts_expression() {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Quit { dot, code })
    }

    /// `INCLUDE file | expr`
    pub(crate) fn parse_include(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Include)?;
        Ok(Statement::Include(self.parse_file_or_expr()?))
    }

    /// `GRANT EXECUTE ON PROCEDURE p, ... TO [ROLE] grantee`
    pub(crate) fn parse_grant(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Grant)?;
        self.expect_keyword(Keyword::Execute)?;
        self.expect_keyword(Keyword::On)?;
        self.expect_keyword(Keyword::Procedure)?;
        let procedures = self.parse_ident_list()?;
        self.expect_keyword(Keyword::To)?;
        let role = self.eat_keyword(Keyword::Role);
        let grantee = self.parse_ident()?;
        Ok(Statement::Grant {
            procedures,
            role,
            grantee,
        })
    }

    /// `MAP OBJECT e [TO e] [AT e]`
    pub(crate) fn parse_map_object(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Map)?;
        self.expect_keyword(Keyword::Object)?;
        let source = self.parse_expr()?;
        let target = if self.eat_keyword(Keyword::To) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let at = if self.eat_keyword(Keyword::At) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::MapObject(MapObjectStmt { source, target, at }))
    }

    /// `COLLECT STATISTICS|STATS ON t [COLUMN (c, ...)]`
    pub(crate) fn parse_collect_stats(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Collect)?;
        self.expect_one_of(&[Keyword::Statistics, Keyword::Stats])?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_ident()?;
        let columns = if self.eat_keyword(Keyword::Column) {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        Ok(Statement::CollectStats { table, columns })
    }

    /// `( select )` or `table [WHERE cond]`
    fn parse_data_source(&mut self, allow_where: bool) -> Result<DataSource, ParseError> {
        if self.starts_nested_select() {
            self.advance();
            let query = self.parse_select_stmt()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(DataSource::Query(Box::new(query)));
        }
        let name = self.parse_ident()?;
        let where_clause = if allow_where && self.eat_keyword(Keyword::Where) {
            Some(self.parse_bool_expr()?)
        } else {
            None
        };
        Ok(DataSource::Table { name, where_clause })
    }

    /// `CMP ROW_COUNT|SUM source [AT conn], source [AT conn]`
    pub(crate) fn parse_cmp(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Cmp)?;
        let kind = match self.expect_one_of(&[Keyword::RowCount, Keyword::Sum])? {
            Keyword::RowCount => CmpKind::RowCount,
            _ => CmpKind::Sum,
        };
        let left = self.parse_cmp_source()?;
        self.expect(&TokenKind::Comma)?;
        let right = self.parse_cmp_source()?;
        Ok(Statement::Cmp { kind, left, right })
    }

    fn parse_cmp_source(&mut self) -> Result<CmpSource, ParseError> {
        let source = self.parse_data_source(true)?;
        let at = if self.eat_keyword(Keyword::At) {
            Some(self.parse_ident()?)
        } else {
            None
        };
        Ok(CmpSource { source, at })
    }

    /// `COPY FROM LOCAL ...` or `COPY source TO [HDFS] target options`
    pub(crate) fn parse_copy(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Copy)?;
        if self.check_keyword(Keyword::From) && self.check_keyword_nth(1, Keyword::Local) {
            self.advance();
            self.advance();
            return self.parse_copy_from_local();
        }
        let source = self.parse_data_source(false)?;
        self.expect_keyword(Keyword::To)?;
        let hdfs = self.eat_keyword(Keyword::Hdfs);
        let target = self.parse_file_or_expr()?;
        let mut options = Vec::new();
        loop {
            let option = match self.current().as_keyword() {
                Some(Keyword::At) => {
                    self.advance();
                    CopyOption::At(self.parse_ident()?)
                }
                Some(Keyword::Batchsize) => {
                    self.advance();
                    CopyOption::BatchSize(self.parse_expr()?)
                }
                Some(Keyword::Delimiter) => {
                    self.advance();
                    CopyOption::Delimiter(self.parse_expr()?)
                }
                Some(Keyword::Sqlinsert) => {
                    self.advance();
                    CopyOption::SqlInsert(self.parse_ident()?)
                }
                _ => break,
            };
            options.push(option);
        }
        Ok(Statement::Copy(Box::new(CopyStmt {
            source,
            hdfs,
            target,
            options,
        })))
    }

    /// `source, ... TO target [DELETE | IGNORE | OVERWRITE]*` after `COPY FROM LOCAL`
    fn parse_copy_from_local(&mut self) -> Result<Statement, ParseError> {
        let sources = self.comma_separated(Self::parse_file_or_expr)?;
        self.expect_keyword(Keyword::To)?;
        let target = self.parse_file_or_expr()?;
        let mut options = Vec::new();
        loop {
            let option = match self.current().as_keyword() {
                Some(Keyword::Delete) => CopyFileOption::Delete,
                Some(Keyword::Ignore) => CopyFileOption::Ignore,
                Some(Keyword::Overwrite) => CopyFileOption::Overwrite,
                _ => break,
            };
            self.advance();
            options.push(option);
        }
        Ok(Statement::CopyFromLocal(CopyFromLocalStmt {
            sources,
            target,
            options,
        }))
    }

    /// `SUMMARY [TOP n] ON source [LIMIT n]`
    pub(crate) fn parse_summary(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Summary)?;
        let top = if self.eat_keyword(Keyword::Top) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::On)?;
        let source = self.parse_data_source(true)?;
        let limit = if self.eat_keyword(Keyword::Limit) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Summary { top, source, limit })
    }

    /// `HIVE -e 'sql' -f file -hiveconf k=v -flag ...`
    pub(crate) fn parse_hive(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Hive)?;
        let mut items = Vec::new();
        while self.check(&TokenKind::Minus) && self.is_identifier_part(1) {
            self.advance();
            let name = self.parse_ident_part()?;
            let item = if name.eq_ignore_ascii_case("hiveconf") {
                let key = self.parse_ident()?;
                self.expect(&TokenKind::Eq)?;
                HiveItem::Conf {
                    key,
                    value: self.parse_hive_value()?,
                }
            } else if name.eq_ignore_ascii_case("e") || name.eq_ignore_ascii_case("f") {
                HiveItem::Option {
                    name,
                    value: self.parse_hive_value()?,
                }
            } else {
                HiveItem::Flag(name)
            };
            items.push(item);
        }
        Ok(Statement::Hive(items))
    }

    /// A single literal, path or name. A full expression would read the
    /// `-` of the next item as a subtraction.
    fn parse_hive_value(&mut self) -> Result<Expr, ParseError> {
        if let TokenKind::FilePath(path) = self.current().kind.clone() {
            self.advance();
            return Ok(Expr::string(path));
        }
        if let Some(literal) = self.try_literal() {
            return Ok(Expr::Literal(literal));
        }
        Ok(Expr::Ident(self.parse_ident()?))
    }

    /// `! text` up to `;` or the end of the line, kept as token texts.
    pub(crate) fn parse_host_command(&mut self) -> Statement {
        let line = self.current().position.line;
        self.advance();
        let mut command = Vec::new();
        while !self.current().is_eof()
            && !self.check(&TokenKind::Semicolon)
            && self.current().position.line == line
        {
            command.push(self.next_token().text);
        }
        Statement::HostCommand(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::CursorQuery;

    fn stmt(sql: &str) -> Statement {
        Parser::from_sql(sql).parse_statement().unwrap()
    }

    #[test]
    fn test_set_forms() {
        assert_eq!(
            stmt("SET NOCOUNT ON"),
            Statement::SetOption(SetOption::MsSql {
                option: MsSqlSessionOption::NoCount,
                on: true,
            })
        );
        assert!(matches!(
            stmt("SET CURRENT SCHEMA = sales"),
            Statement::SetOption(SetOption::CurrentSchema(_))
        ));
        assert!(matches!(
            stmt("SET QUERY_BAND = NONE UPDATE FOR SESSION"),
            Statement::SetOption(SetOption::QueryBand { value: None, update: true, session: true })
        ));
        assert!(matches!(
            stmt("SET a = 1, b = 2"),
            Statement::Assignment { set: true, ref items } if items.len() == 2
        ));
    }

    #[test]
    fn test_cursor_statements() {
        assert!(matches!(
            stmt("ALLOCATE c1 CURSOR FOR RESULT SET loc1"),
            Statement::AllocateCursor { .. }
        ));
        assert!(matches!(
            stmt("ASSOCIATE RESULT SET LOCATOR (loc1, loc2) WITH PROCEDURE p"),
            Statement::AssociateLocator { ref locators, .. } if locators.len() == 2
        ));
        assert!(matches!(
            stmt("OPEN c FOR SELECT a FROM t"),
            Statement::Open { query: Some(CursorQuery::Select(_)), .. }
        ));
        assert!(matches!(
            stmt("FETCH c BULK COLLECT INTO a, b LIMIT 100"),
            Statement::Fetch(FetchStmt { bulk_collect: true, limit: Some(_), ref into, .. })
                if into.len() == 2
        ));
    }

    #[test]
    fn test_call_and_exec() {
        assert!(matches!(
            stmt("CALL p(1, name => 'x')"),
            Statement::Call { ref args, .. } if args.len() == 2 && args[1].name.is_some()
        ));
        let Statement::Exec(exec) = stmt("EXEC sp_report @year = 2024, 'full'") else {
            panic!("expected EXEC");
        };
        assert_eq!(exec.args.len(), 2);
        assert_eq!(exec.args[0].name.as_deref(), Some("@year"));

        let Statement::Exec(exec) = stmt("EXECUTE IMMEDIATE 'SELECT 1' INTO v USING a, b") else {
            panic!("expected EXEC");
        };
        assert!(exec.immediate);
        assert_eq!(exec.into.len(), 1);
        assert_eq!(exec.using.len(), 2);
    }

    #[test]
    fn test_diagnostics() {
        assert!(matches!(
            stmt("GET DIAGNOSTICS EXCEPTION 1 msg = MESSAGE_TEXT"),
            Statement::GetDiagnostics(GetDiagnosticsStmt {
                item: DiagnosticsItem::MessageText { condition: 1 },
                ..
            })
        ));
        assert!(matches!(
            stmt("RESIGNAL SQLSTATE '02031' SET MESSAGE_TEXT = 'bad'"),
            Statement::Resignal { sqlstate: Some(_), message: Some(_) }
        ));
    }

    #[test]
    fn test_utility_statements() {
        assert!(matches!(stmt("QUIT"), Statement::Quit { dot: false, code: None }));
        assert!(matches!(
            stmt(r"INCLUDE c:\scripts\init.sql"),
            Statement::Include(Expr::Literal(_))
        ));
        assert!(matches!(
            stmt("GRANT EXECUTE ON PROCEDURE p1, p2 TO ROLE admin"),
            Statement::Grant { role: true, ref procedures, .. } if procedures.len() == 2
        ));
        assert!(matches!(
            stmt("COLLECT STATISTICS ON t COLUMN (a, b)"),
            Statement::CollectStats { ref columns, .. } if columns.len() == 2
        ));
        assert!(matches!(
            stmt("MAP OBJECT log TO dw.log AT mysqlconn"),
            Statement::MapObject(MapObjectStmt { target: Some(_), at: Some(_), .. })
        ));
    }

    #[test]
    fn test_cmp_copy_summary() {
        assert!(matches!(
            stmt("CMP SUM t1 WHERE a > 1, t2 AT db2conn"),
            Statement::Cmp { kind: CmpKind::Sum, ref right, .. } if right.at.is_some()
        ));
        let Statement::Copy(copy) = stmt("COPY (SELECT a FROM t) TO HDFS '/tmp/out' DELIMITER ','") else {
            panic!("expected COPY");
        };
        assert!(copy.hdfs);
        assert!(matches!(copy.source, DataSource::Query(_)));
        assert_eq!(copy.options.len(), 1);
        assert!(matches!(
            stmt("COPY FROM LOCAL 'a.csv', 'b.csv' TO '/data' OVERWRITE DELETE"),
            Statement::CopyFromLocal(CopyFromLocalStmt { ref sources, ref options, .. })
                if sources.len() == 2 && options.len() == 2
        ));
        assert!(matches!(
            stmt("SUMMARY TOP 5 ON sales LIMIT 1000"),
            Statement::Summary { top: Some(_), limit: Some(_), .. }
        ));
    }

    #[test]
    fn test_hive_items() {
        let Statement::Hive(items) = stmt("HIVE -e 'SELECT 1' -hiveconf hive.root.logger=DEBUG -S") else {
            panic!("expected HIVE");
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[0], HiveItem::Option { name, .. } if name == "e"));
        assert!(matches!(&items[1], HiveItem::Conf { key, .. } if key.to_string() == "hive.root.logger"));
        assert!(matches!(&items[2], HiveItem::Flag(flag) if flag == "S"));
    }

    #[test]
    fn test_host_command_stops_at_line_end() {
        let mut parser = Parser::from_sql("! ls -l /tmp\nPRINT 1");
        let program = parser.parse_program().unwrap();
        assert_eq!(
            program.block.statements[0],
            Statement::HostCommand(["ls", "-", "l", "/", "tmp"].map(String::from).to_vec())
        );
        assert!(matches!(program.block.statements[1], Statement::Print(_)));
    }
}
