//! Stored routines: functions, procedures, package specifications and bodies.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    Block, CreateFunctionStmt, CreatePackageBodyStmt, CreatePackageStmt, CreateProcedureStmt,
    DeclareItem, Ident, PackageBodyItem, PackageSpecItem, ParamMode, RoutineBody, RoutineOption,
    RoutineParam, RoutinePrefix, SecurityMode, Statement,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses a routine definition after its prefix. `start` is the first
    /// token of the whole statement, used for error context.
    pub(crate) fn parse_routine(
        &mut self,
        prefix: RoutinePrefix,
        start: usize,
    ) -> Result<Statement, ParseError> {
        match self.current().as_keyword() {
            Some(Keyword::Function) => self.in_context_from("CREATE FUNCTION", start, |p| {
                Ok(Statement::CreateFunction(Box::new(p.parse_function(prefix)?)))
            }),
            Some(Keyword::Package) if self.check_keyword_nth(1, Keyword::Body) => self
                .in_context_from("CREATE PACKAGE", start, |p| {
                    Ok(Statement::CreatePackageBody(p.parse_package_body(prefix)?))
                }),
            Some(Keyword::Package) => self.in_context_from("CREATE PACKAGE", start, |p| {
                Ok(Statement::CreatePackage(p.parse_package_spec(prefix)?))
            }),
            _ => self.in_context_from("CREATE PROCEDURE", start, |p| {
                Ok(Statement::CreateProcedure(Box::new(p.parse_procedure(prefix)?)))
            }),
        }
    }

    /// `FUNCTION name [params] RETURN[S] type [AS|IS] [declarations] body`
    fn parse_function(&mut self, prefix: RoutinePrefix) -> Result<CreateFunctionStmt, ParseError> {
        self.expect_keyword(Keyword::Function)?;
        let name = self.parse_ident()?;
        let params = self.parse_routine_params()?;
        let returns = self.parse_function_returns()?;
        self.eat_routine_as();
        let declarations = self.parse_inplace_declarations();
        let body = if self.at_begin_block() {
            RoutineBody::Block(self.parse_begin_end_block(Vec::new())?)
        } else {
            let stmt = self.parse_statement()?;
            if !matches!(stmt, Statement::Empty) {
                self.eat(&TokenKind::Semicolon);
            }
            RoutineBody::Statements(Block::new(vec![stmt]))
        };
        self.eat_trailing_name(&name);
        Ok(CreateFunctionStmt {
            prefix,
            name,
            params,
            returns,
            declarations,
            body,
        })
    }

    fn parse_function_returns(&mut self) -> Result<crate::ast::DataType, ParseError> {
        self.expect_one_of(&[Keyword::Returns, Keyword::Return])?;
        self.parse_data_type()
    }

    /// `PROCEDURE name [params] [options] [AS|IS] [declarations] [label] body`
    fn parse_procedure(&mut self, prefix: RoutinePrefix) -> Result<CreateProcedureStmt, ParseError> {
        self.expect_one_of(&[Keyword::Procedure, Keyword::Proc])?;
        let name = self.parse_ident()?;
        let params = self.parse_routine_params()?;
        let options = self.parse_routine_options()?;
        self.eat_routine_as();
        let declarations = self.parse_inplace_declarations();
        let label = self.parse_procedure_label()?;
        let body = if self.at_begin_block() {
            RoutineBody::Block(self.parse_begin_end_block(Vec::new())?)
        } else {
            RoutineBody::Statements(self.parse_procedure_statements()?)
        };
        self.eat_trailing_name(&name);
        Ok(CreateProcedureStmt {
            prefix,
            name,
            params,
            options,
            declarations,
            label,
            body,
        })
    }

    /// Statements up to the end of input, a closing keyword or `GO`.
    fn parse_procedure_statements(&mut self) -> Result<Block, ParseError> {
        let mut statements = Vec::new();
        loop {
            let stmt = self.parse_statement()?;
            if !matches!(stmt, Statement::Empty) {
                self.eat(&TokenKind::Semicolon);
            }
            statements.push(stmt);
            if self.is_go(0) {
                self.advance();
                break;
            }
            if self.at_block_end() {
                break;
            }
        }
        Ok(Block::new(statements))
    }

    fn parse_procedure_label(&mut self) -> Result<Option<String>, ParseError> {
        if let TokenKind::Label(name) = &self.current().kind {
            let name = name.clone();
            self.advance();
            return Ok(Some(name));
        }
        if self.check(&TokenKind::Lt) && self.check_nth(1, &TokenKind::Lt) {
            if let Statement::Label(name) = self.parse_bracket_label()? {
                return Ok(Some(name));
            }
        }
        Ok(None)
    }

    fn at_begin_block(&self) -> bool {
        self.check_keyword(Keyword::Begin) && !self.check_keyword_nth(1, Keyword::Transaction)
    }

    fn eat_routine_as(&mut self) {
        if !self.eat_keyword(Keyword::As) {
            self.eat_keyword(Keyword::Is);
        }
    }

    /// Declarations between `AS|IS` and `BEGIN`, with or without a leading
    /// `DECLARE`. Nothing is consumed unless the whole section parses.
    fn parse_inplace_declarations(&mut self) -> Vec<DeclareItem> {
        if self.at_begin_block() {
            return Vec::new();
        }
        self.speculate("inplace declarations", |p| {
            p.eat_keyword(Keyword::Declare);
            p.parse_declarations_until_begin()
        })
        .unwrap_or_default()
    }

    /// Consumes `name ;` after a routine body when it repeats the routine name.
    fn eat_trailing_name(&mut self, name: &Ident) {
        let token = self.current();
        let matches_name = self.is_identifier_part(0)
            && !self.is_go(0)
            && (token.text_is(name.name()) || token.text_is(&name.to_string()));
        if matches_name
            && (self.check_nth(1, &TokenKind::Semicolon) || self.peek_nth(1).is_eof())
        {
            self.advance();
            self.eat(&TokenKind::Semicolon);
        }
    }

    // Parameters

    /// `( [param, ...] )` or an unparenthesized parameter list.
    fn parse_routine_params(&mut self) -> Result<Vec<RoutineParam>, ParseError> {
        if self.eat(&TokenKind::LeftParen) {
            if self.eat(&TokenKind::RightParen) {
                return Ok(Vec::new());
            }
            let params = self.comma_separated(Self::parse_routine_param)?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(params);
        }
        if !self.starts_bare_params() {
            return Ok(Vec::new());
        }
        self.comma_separated(Self::parse_routine_param)
    }

    /// An unparenthesized list never starts with the keywords that may
    /// follow the parameters.
    fn starts_bare_params(&self) -> bool {
        if self.check_keyword(Keyword::In) {
            return true;
        }
        if !self.is_identifier_part(0) || self.is_go(0) {
            return false;
        }
        let next = self.peek_nth(1).as_keyword();
        match self.current().as_keyword() {
            Some(Keyword::As | Keyword::Is | Keyword::Return | Keyword::Returns) => false,
            Some(Keyword::Language) => next != Some(Keyword::Sql),
            Some(Keyword::Sql) => next != Some(Keyword::Security),
            Some(Keyword::Dynamic) => next != Some(Keyword::Result),
            Some(Keyword::Result) => next != Some(Keyword::Sets),
            _ => true,
        }
    }

    /// `[mode] name type ...` or `name [mode] type ...`
    fn parse_routine_param(&mut self) -> Result<RoutineParam, ParseError> {
        if let Some(param) = self.speculate("mode-first parameter", |p| {
            let mode = p.parse_param_mode().ok_or_else(|| p.error_here(&["IN", "OUT", "INOUT"]))?;
            let name = p.parse_ident()?;
            p.parse_param_rest(name, Some(mode))
        }) {
            return Ok(param);
        }
        let name = self.parse_ident()?;
        let mode = self.parse_param_mode();
        self.parse_param_rest(name, mode)
    }

    fn parse_param_mode(&mut self) -> Option<ParamMode> {
        if self.eat_keyword(Keyword::In) {
            if self.eat_keyword(Keyword::Out) {
                return Some(ParamMode::InOut);
            }
            return Some(ParamMode::In);
        }
        if self.eat_keyword(Keyword::Out) {
            return Some(ParamMode::Out);
        }
        if self.eat_keyword(Keyword::Inout) {
            return Some(ParamMode::InOut);
        }
        None
    }

    fn parse_param_rest(
        &mut self,
        name: Ident,
        mode: Option<ParamMode>,
    ) -> Result<RoutineParam, ParseError> {
        let data_type = self.parse_data_type()?;
        let attrs = self.parse_type_attrs()?;
        let default = self.parse_default_value()?;
        Ok(RoutineParam {
            name,
            mode,
            data_type,
            attrs,
            default,
        })
    }

    // Options

    fn parse_routine_options(&mut self) -> Result<Vec<RoutineOption>, ParseError> {
        let mut options = Vec::new();
        loop {
            let next = self.peek_nth(1).as_keyword();
            let option = match (self.current().as_keyword(), next) {
                (Some(Keyword::Language), Some(Keyword::Sql)) => {
                    self.advance();
                    self.advance();
                    RoutineOption::LanguageSql
                }
                (Some(Keyword::Sql), Some(Keyword::Security)) => {
                    self.advance();
                    self.advance();
                    let mode = match self.expect_one_of(&[
                        Keyword::Creator,
                        Keyword::Definer,
                        Keyword::Invoker,
                        Keyword::Owner,
                    ])? {
                        Keyword::Creator => SecurityMode::Creator,
                        Keyword::Definer => SecurityMode::Definer,
                        Keyword::Invoker => SecurityMode::Invoker,
                        _ => SecurityMode::Owner,
                    };
                    RoutineOption::SqlSecurity(mode)
                }
                (Some(Keyword::Dynamic), Some(Keyword::Result))
                | (Some(Keyword::Result), Some(Keyword::Sets)) => {
                    let dynamic = self.eat_keyword(Keyword::Dynamic);
                    self.expect_keyword(Keyword::Result)?;
                    self.expect_keyword(Keyword::Sets)?;
                    let count = self.parse_int_literal()?;
                    RoutineOption::ResultSets { dynamic, count }
                }
                _ => return Ok(options),
            };
            options.push(option);
        }
    }

    // Packages

    /// `PACKAGE name AS|IS item; ... END [name]`
    fn parse_package_spec(&mut self, prefix: RoutinePrefix) -> Result<CreatePackageStmt, ParseError> {
        self.expect_keyword(Keyword::Package)?;
        let name = self.parse_ident()?;
        self.expect_one_of(&[Keyword::As, Keyword::Is])?;
        let mut items = Vec::new();
        while !self.check_keyword(Keyword::End) {
            items.push(self.parse_package_spec_item()?);
            self.expect(&TokenKind::Semicolon)?;
        }
        self.expect_keyword(Keyword::End)?;
        self.eat_trailing_name(&name);
        Ok(CreatePackageStmt {
            prefix,
            name,
            items,
        })
    }

    fn parse_package_spec_item(&mut self) -> Result<PackageSpecItem, ParseError> {
        match self.current().as_keyword() {
            Some(Keyword::Function) => {
                self.advance();
                let name = self.parse_ident()?;
                let params = self.parse_routine_params()?;
                let returns = self.parse_function_returns()?;
                Ok(PackageSpecItem::Function {
                    name,
                    params,
                    returns,
                })
            }
            Some(Keyword::Procedure | Keyword::Proc) => {
                self.advance();
                let name = self.parse_ident()?;
                let params = self.parse_routine_params()?;
                Ok(PackageSpecItem::Procedure { name, params })
            }
            _ => {
                let name = self.parse_ident()?;
                let data_type = self.parse_data_type()?;
                let attrs = self.parse_type_attrs()?;
                Ok(PackageSpecItem::Variable {
                    name,
                    data_type,
                    attrs,
                })
            }
        }
    }

    /// `PACKAGE BODY name AS|IS item; ... END [name]`
    fn parse_package_body(
        &mut self,
        prefix: RoutinePrefix,
    ) -> Result<CreatePackageBodyStmt, ParseError> {
        self.expect_keyword(Keyword::Package)?;
        self.expect_keyword(Keyword::Body)?;
        let name = self.parse_ident()?;
        self.expect_one_of(&[Keyword::As, Keyword::Is])?;
        let mut items = Vec::new();
        while !self.check_keyword(Keyword::End) {
            let item = match self.current().as_keyword() {
                Some(Keyword::Function) => {
                    PackageBodyItem::Function(self.parse_function(RoutinePrefix::None)?)
                }
                Some(Keyword::Procedure | Keyword::Proc) => {
                    PackageBodyItem::Procedure(self.parse_procedure(RoutinePrefix::None)?)
                }
                _ => {
                    let item = PackageBodyItem::Declare(self.parse_declare_item()?);
                    self.expect(&TokenKind::Semicolon)?;
                    item
                }
            };
            self.eat(&TokenKind::Semicolon);
            items.push(item);
        }
        self.expect_keyword(Keyword::End)?;
        self.eat_trailing_name(&name);
        Ok(CreatePackageBodyStmt {
            prefix,
            name,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeName;

    fn stmt(sql: &str) -> Statement {
        Parser::from_sql(sql).parse_statement().unwrap()
    }

    fn procedure(sql: &str) -> CreateProcedureStmt {
        match stmt(sql) {
            Statement::CreateProcedure(proc) => *proc,
            other => panic!("expected procedure, got {other:?}"),
        }
    }

    #[test]
    fn test_procedure_with_modes() {
        let proc = procedure(
            "CREATE OR REPLACE PROCEDURE p (IN a INT, b OUT VARCHAR(10), IN OUT c INT, out INT)
             LANGUAGE SQL DYNAMIC RESULT SETS 1
             BEGIN
               SET b = 'x';
             END",
        );
        assert_eq!(proc.prefix, RoutinePrefix::Create { or_replace: true });
        let modes: Vec<_> = proc.params.iter().map(|p| p.mode).collect();
        assert_eq!(
            modes,
            vec![
                Some(ParamMode::In),
                Some(ParamMode::Out),
                Some(ParamMode::InOut),
                None,
            ]
        );
        assert_eq!(proc.params[3].name.name(), "out");
        assert_eq!(
            proc.options,
            vec![
                RoutineOption::LanguageSql,
                RoutineOption::ResultSets { dynamic: true, count: 1 },
            ]
        );
        assert!(matches!(proc.body, RoutineBody::Block(_)));
    }

    #[test]
    fn test_inplace_declarations_and_trailing_name() {
        let mut parser = Parser::from_sql(
            "CREATE PROCEDURE p IS x INT := 1; y VARCHAR(5); BEGIN PRINT x; END p; PRINT 2",
        );
        let program = parser.parse_program().unwrap();
        assert_eq!(program.block.statements.len(), 2);
        let Statement::CreateProcedure(proc) = &program.block.statements[0] else {
            panic!("expected procedure");
        };
        assert_eq!(proc.declarations.len(), 2);
    }

    #[test]
    fn test_procedure_without_begin_stops_at_go() {
        let mut parser = Parser::from_sql("CREATE PROC p AS PRINT 1; PRINT 2\nGO\nPRINT 3");
        let program = parser.parse_program().unwrap();
        assert_eq!(program.block.statements.len(), 2);
        let Statement::CreateProcedure(proc) = &program.block.statements[0] else {
            panic!("expected procedure");
        };
        assert!(matches!(&proc.body, RoutineBody::Statements(block) if block.len() == 2));
    }

    #[test]
    fn test_bare_params_and_label() {
        let proc = procedure("CREATE PROCEDURE p a INT, b INT SQL SECURITY INVOKER lbl: BEGIN NULL; END");
        assert_eq!(proc.params.len(), 2);
        assert_eq!(proc.options, vec![RoutineOption::SqlSecurity(SecurityMode::Invoker)]);
        assert_eq!(proc.label.as_deref(), Some("lbl"));
    }

    #[test]
    fn test_options_right_after_name_are_not_params() {
        let proc = procedure("CREATE PROCEDURE p DYNAMIC RESULT SETS 1 BEGIN NULL; END");
        assert!(proc.params.is_empty());
        assert_eq!(
            proc.options,
            vec![RoutineOption::ResultSets { dynamic: true, count: 1 }]
        );
        let proc = procedure("CREATE PROCEDURE p RESULT SETS 2 LANGUAGE SQL BEGIN NULL; END");
        assert!(proc.params.is_empty());
        assert_eq!(proc.options.len(), 2);
    }

    #[test]
    fn test_function_forms() {
        let Statement::CreateFunction(func) =
            stmt("CREATE FUNCTION f (a INT) RETURNS INT BEGIN RETURN a + 1; END")
        else {
            panic!("expected function");
        };
        assert_eq!(func.returns.name, TypeName::Int);
        assert!(matches!(func.body, RoutineBody::Block(_)));

        let Statement::CreateFunction(func) = stmt("CREATE FUNCTION g() RETURNS INT RETURN 1") else {
            panic!("expected function");
        };
        assert!(func.params.is_empty());
        assert!(matches!(&func.body, RoutineBody::Statements(block) if block.len() == 1));
    }

    #[test]
    fn test_package_spec_and_body() {
        let Statement::CreatePackage(spec) = stmt(
            "CREATE PACKAGE pkg AS
               cnt INT;
               FUNCTION f(a INT) RETURN INT;
               PROCEDURE p(a INT);
             END pkg;",
        ) else {
            panic!("expected package");
        };
        assert_eq!(spec.items.len(), 3);

        let Statement::CreatePackageBody(body) = stmt(
            "CREATE PACKAGE BODY pkg AS
               cnt INT := 0;
               FUNCTION f(a INT) RETURN INT IS BEGIN RETURN a; END;
               PROCEDURE p(a INT) IS BEGIN cnt := cnt + a; END p;
             END;",
        ) else {
            panic!("expected package body");
        };
        assert_eq!(body.items.len(), 3);
        assert!(matches!(body.items[0], PackageBodyItem::Declare(_)));
        assert!(matches!(body.items[2], PackageBodyItem::Procedure(_)));
    }

    #[test]
    fn test_alter_and_replace_prefixes() {
        assert!(matches!(
            stmt("ALTER PROCEDURE p AS BEGIN NULL; END"),
            Statement::CreateProcedure(ref p) if p.prefix == RoutinePrefix::Alter
        ));
        assert!(matches!(
            stmt("REPLACE FUNCTION f RETURNS INT RETURN 1"),
            Statement::CreateFunction(ref f) if f.prefix == RoutinePrefix::Replace
        ));
    }

    #[test]
    fn test_error_context() {
        let err = Parser::from_sql("CREATE PROCEDURE p (a INT")
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.context.map(|c| c.rule), Some("CREATE PROCEDURE"));
        assert!(err.is_premature_end());

        let err = Parser::from_sql("CREATE PROCEDURE p AS BEGIN PRINT 1;")
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.context.map(|c| c.rule), Some("BEGIN"));
    }
}
