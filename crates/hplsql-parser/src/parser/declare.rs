//! DECLARE statements, declare sections and their items.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    CursorQuery, CursorReturn, DeclareItem, HandlerCondition, HandlerKind, ReturnTarget,
    Statement,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// `DECLARE item; ... BEGIN ... END` or `DECLARE item, ...`.
    ///
    /// The block form is tried first; if the items are not followed by
    /// `BEGIN`, the cursor is restored and a plain DECLARE is parsed.
    pub(crate) fn parse_declare(&mut self) -> Result<Statement, ParseError> {
        if let Some(declarations) = self.speculate("declare section", Self::parse_declare_section) {
            return Ok(Statement::Block(self.parse_begin_end_block(declarations)?));
        }
        self.expect_keyword(Keyword::Declare)?;
        let items = self.comma_separated(Self::parse_declare_item)?;
        Ok(Statement::Declare(items))
    }

    /// `DECLARE item; [DECLARE] item; ...` up to a `BEGIN`.
    fn parse_declare_section(&mut self) -> Result<Vec<DeclareItem>, ParseError> {
        self.expect_keyword(Keyword::Declare)?;
        self.parse_declarations_until_begin()
    }

    /// `;`-terminated declare items, each optionally led by `DECLARE`,
    /// stopping at `BEGIN`. At least one item is required.
    pub(crate) fn parse_declarations_until_begin(
        &mut self,
    ) -> Result<Vec<DeclareItem>, ParseError> {
        let mut items = Vec::new();
        loop {
            items.push(self.parse_declare_item()?);
            self.expect(&TokenKind::Semicolon)?;
            if self.check_keyword(Keyword::Begin)
                && !self.check_keyword_nth(1, Keyword::Transaction)
            {
                return Ok(items);
            }
            self.eat_keyword(Keyword::Declare);
        }
    }

    /// One declaration: cursor, handler, condition, temporary table or variable.
    pub(crate) fn parse_declare_item(&mut self) -> Result<DeclareItem, ParseError> {
        let kw = self.current().as_keyword();
        let next = self.peek_nth(1).as_keyword();

        if matches!(kw, Some(Keyword::Continue | Keyword::Exit)) && next == Some(Keyword::Handler) {
            return self.parse_handler_declaration();
        }
        if kw == Some(Keyword::Cursor) && self.is_identifier_part(1) {
            self.advance();
            let name = self.parse_ident()?;
            return self.parse_cursor_rest(name);
        }
        let temporary = kw == Some(Keyword::Temporary)
            || (kw == Some(Keyword::Global) && next == Some(Keyword::Temporary));
        if temporary {
            return self.parse_temporary_table_declaration();
        }

        if self.is_identifier_part(0) {
            match next {
                Some(Keyword::Cursor) => {
                    let name = self.parse_ident()?;
                    self.advance();
                    return self.parse_cursor_rest(name);
                }
                Some(Keyword::Condition) => {
                    let name = self.parse_ident()?;
                    self.advance();
                    return Ok(DeclareItem::Condition(name));
                }
                _ => {}
            }
        }
        self.parse_variable_declaration()
    }

    /// `a, b [CONSTANT] [AS] type attrs [default]`
    fn parse_variable_declaration(&mut self) -> Result<DeclareItem, ParseError> {
        let mut names = vec![self.parse_ident()?];
        while self.check(&TokenKind::Comma) && self.is_identifier_part(1) && self.names_continue() {
            self.advance();
            names.push(self.parse_ident()?);
        }
        let constant = self.eat_keyword(Keyword::Constant);
        self.eat_keyword(Keyword::As);
        let data_type = self.parse_data_type()?;
        let attrs = self.parse_type_attrs()?;
        let default = self.parse_default_value()?;
        Ok(DeclareItem::Variable {
            names,
            constant,
            data_type,
            attrs,
            default,
        })
    }

    /// After `name ,`: true if another name of the same list follows, as
    /// opposed to a new declaration. `a, b INT` shares one type, while in
    /// `a INT, b INT` the comma follows a type and never gets here.
    fn names_continue(&self) -> bool {
        !matches!(
            self.peek_nth(2).as_keyword(),
            Some(Keyword::Cursor | Keyword::Condition)
        )
    }

    /// `[WITH RETURN ...] (IS | AS | FOR) (select | expr)` after the cursor name.
    fn parse_cursor_rest(&mut self, name: crate::ast::Ident) -> Result<DeclareItem, ParseError> {
        let returns = self.parse_cursor_return()?;
        self.expect_one_of(&[Keyword::Is, Keyword::As, Keyword::For])?;
        let query = self.parse_cursor_query()?;
        Ok(DeclareItem::Cursor {
            name,
            returns,
            query,
        })
    }

    fn parse_cursor_return(&mut self) -> Result<Option<CursorReturn>, ParseError> {
        if self.eat_keyword(Keyword::Without) {
            self.expect_keyword(Keyword::Return)?;
            return Ok(Some(CursorReturn::WithoutReturn));
        }
        if !(self.check_keyword(Keyword::With) && self.check_keyword_nth(1, Keyword::Return)) {
            return Ok(None);
        }
        self.advance();
        self.advance();
        let only = self.eat_keyword(Keyword::Only);
        let to = if self.eat_keyword(Keyword::To) {
            match self.expect_one_of(&[Keyword::Caller, Keyword::Client])? {
                Keyword::Caller => Some(ReturnTarget::Caller),
                _ => Some(ReturnTarget::Client),
            }
        } else {
            None
        };
        Ok(Some(CursorReturn::WithReturn { only, to }))
    }

    /// A SELECT, or an expression holding dynamic SQL.
    pub(crate) fn parse_cursor_query(&mut self) -> Result<CursorQuery, ParseError> {
        if self.starts_select() {
            return Ok(CursorQuery::Select(Box::new(self.parse_select_stmt()?)));
        }
        Ok(CursorQuery::Expr(self.parse_expr()?))
    }

    /// `CONTINUE | EXIT HANDLER FOR condition stmt`
    fn parse_handler_declaration(&mut self) -> Result<DeclareItem, ParseError> {
        let kind = match self.expect_one_of(&[Keyword::Continue, Keyword::Exit])? {
            Keyword::Continue => HandlerKind::Continue,
            _ => HandlerKind::Exit,
        };
        self.expect_keyword(Keyword::Handler)?;
        self.expect_keyword(Keyword::For)?;
        let condition = if self.eat_keyword(Keyword::Sqlexception) {
            HandlerCondition::SqlException
        } else if self.eat_keyword(Keyword::Sqlwarning) {
            HandlerCondition::SqlWarning
        } else if self.eat_keyword(Keyword::Not) {
            self.expect_keyword(Keyword::Found)?;
            HandlerCondition::NotFound
        } else {
            HandlerCondition::Named(self.parse_ident()?)
        };
        let body = self.parse_single_block_stmt(false)?;
        Ok(DeclareItem::Handler {
            kind,
            condition,
            body: Box::new(body),
        })
    }

    /// `[GLOBAL] TEMPORARY TABLE name [pre-options] body [options]`
    fn parse_temporary_table_declaration(&mut self) -> Result<DeclareItem, ParseError> {
        let global = self.eat_keyword(Keyword::Global);
        self.expect_keyword(Keyword::Temporary)?;
        self.expect_keyword(Keyword::Table)?;
        let name = self.parse_ident()?;
        let pre_options = self.parse_table_pre_options()?;
        let body = self.parse_table_body()?;
        let options = self.parse_table_options()?;
        Ok(DeclareItem::TemporaryTable {
            global,
            name,
            pre_options,
            body,
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DefaultValue, TableBody, TypeName};

    fn stmt(sql: &str) -> Statement {
        Parser::from_sql(sql).parse_statement().unwrap()
    }

    fn decl_items(sql: &str) -> Vec<DeclareItem> {
        match stmt(sql) {
            Statement::Declare(items) => items,
            other => panic!("expected DECLARE, got {other:?}"),
        }
    }

    #[test]
    fn test_variables() {
        let items = decl_items("DECLARE a, b INT, c VARCHAR(10) DEFAULT 'x'");
        assert_eq!(items.len(), 2);
        assert!(matches!(
            &items[0],
            DeclareItem::Variable { names, data_type, .. }
                if names.len() == 2 && data_type.name == TypeName::Int
        ));
        assert!(matches!(
            &items[1],
            DeclareItem::Variable { default: Some(DefaultValue::Default(Some(_))), .. }
        ));
    }

    #[test]
    fn test_constant() {
        let items = decl_items("DECLARE pi CONSTANT NUMBER := 3.14");
        assert!(matches!(
            &items[0],
            DeclareItem::Variable { constant: true, default: Some(DefaultValue::Assign(_)), .. }
        ));
    }

    #[test]
    fn test_cursor_forms() {
        let items = decl_items("DECLARE c1 CURSOR WITH RETURN ONLY TO CLIENT FOR SELECT a FROM t");
        assert!(matches!(
            &items[0],
            DeclareItem::Cursor {
                returns: Some(CursorReturn::WithReturn { only: true, to: Some(ReturnTarget::Client) }),
                query: CursorQuery::Select(_),
                ..
            }
        ));
        let items = decl_items("DECLARE CURSOR c2 IS v_sql");
        assert!(matches!(
            &items[0],
            DeclareItem::Cursor { returns: None, query: CursorQuery::Expr(_), .. }
        ));
    }

    #[test]
    fn test_handlers() {
        let items = decl_items("DECLARE EXIT HANDLER FOR SQLEXCEPTION SET err = 1");
        assert!(matches!(
            &items[0],
            DeclareItem::Handler { kind: HandlerKind::Exit, condition: HandlerCondition::SqlException, .. }
        ));
        let items = decl_items("DECLARE CONTINUE HANDLER FOR NOT FOUND BEGIN SET done = 1; END");
        assert!(matches!(
            &items[0],
            DeclareItem::Handler { condition: HandlerCondition::NotFound, ref body, .. }
                if matches!(**body, Statement::Block(_))
        ));
    }

    #[test]
    fn test_condition_and_temp_table() {
        let items = decl_items("DECLARE overflow CONDITION");
        assert!(matches!(&items[0], DeclareItem::Condition(name) if name.name() == "overflow"));
        let items = decl_items("DECLARE GLOBAL TEMPORARY TABLE tmp (id INT, name STRING)");
        assert!(matches!(
            &items[0],
            DeclareItem::TemporaryTable { global: true, body: TableBody::Columns(cols), .. }
                if cols.len() == 2
        ));
    }

    #[test]
    fn test_declare_section_before_begin() {
        let Statement::Block(block) = stmt("DECLARE x INT; DECLARE y INT := 2; BEGIN PRINT x; END") else {
            panic!("expected block");
        };
        assert_eq!(block.declarations.len(), 2);
        assert_eq!(block.body.len(), 1);
    }

    #[test]
    fn test_declare_without_begin_is_a_statement() {
        let mut parser = Parser::from_sql("DECLARE x INT; SET x = 1;");
        let program = parser.parse_program().unwrap();
        assert!(matches!(program.block.statements[0], Statement::Declare(_)));
        assert!(matches!(program.block.statements[1], Statement::Assignment { set: true, .. }));
    }
}
