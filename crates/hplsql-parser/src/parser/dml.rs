//! Queries and data manipulation: SELECT, INSERT, UPDATE, DELETE, MERGE
//! and `VALUES ... INTO`.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    Cte, DeleteStmt, DirectorySource, Expr, FromClause, FullSelect, FullSelectItem, Ident,
    InsertDirectoryStmt, InsertMode, InsertSource, InsertStmt, IsolationLevel, Join, JoinKind,
    LockMode, MergeAction, MergeClause, MergeStmt, OrderItem, SelectAlias, SelectItem,
    SelectOption, SelectStmt, SetOperation, SetOperator, SetQuantifier, SortDirection, Statement,
    SubSelect, TableAlias, TableSource, TargetSource, TargetTable, UpdateStmt, ValuesIntoStmt,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// True at `SELECT`, `SEL` or a `WITH name` common table expression.
    pub(crate) fn starts_select(&self) -> bool {
        self.check_keyword(Keyword::Select)
            || self.check_keyword(Keyword::Sel)
            || (self.check_keyword(Keyword::With) && self.is_identifier_part(1))
    }

    /// True at `(` directly followed by a query.
    pub(crate) fn starts_nested_select(&self) -> bool {
        self.check(&TokenKind::LeftParen)
            && matches!(
                self.peek_nth(1).as_keyword(),
                Some(Keyword::Select | Keyword::Sel | Keyword::With)
            )
    }

    // SELECT

    /// Parses `[WITH cte, ...] fullselect`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if no query starts at the cursor.
    pub fn parse_select_stmt(&mut self) -> Result<SelectStmt, ParseError> {
        let ctes = if self.eat_keyword(Keyword::With) {
            self.comma_separated(Self::parse_cte)?
        } else {
            Vec::new()
        };
        let body = self.parse_fullselect()?;
        Ok(SelectStmt { ctes, body })
    }

    fn parse_cte(&mut self) -> Result<Cte, ParseError> {
        let name = self.parse_ident()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        self.expect_keyword(Keyword::As)?;
        self.expect(&TokenKind::LeftParen)?;
        let query = self.parse_fullselect()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Cte {
            name,
            columns,
            query,
        })
    }

    fn parse_fullselect(&mut self) -> Result<FullSelect, ParseError> {
        let first = self.parse_fullselect_item()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.current().as_keyword() {
                Some(Keyword::Union) => SetOperator::Union,
                Some(Keyword::Except) => SetOperator::Except,
                Some(Keyword::Intersect) => SetOperator::Intersect,
                _ => break,
            };
            self.advance();
            let all = self.eat_keyword(Keyword::All);
            let item = self.parse_fullselect_item()?;
            rest.push(SetOperation { op, all, item });
        }
        Ok(FullSelect { first, rest })
    }

    fn parse_fullselect_item(&mut self) -> Result<FullSelectItem, ParseError> {
        if self.eat(&TokenKind::LeftParen) {
            let nested = self.parse_fullselect()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(FullSelectItem::Nested(Box::new(nested)));
        }
        Ok(FullSelectItem::Select(Box::new(self.parse_subselect()?)))
    }

    fn parse_subselect(&mut self) -> Result<SubSelect, ParseError> {
        self.expect_one_of(&[Keyword::Select, Keyword::Sel])?;
        let mut select = SubSelect::default();

        if self.eat_keyword(Keyword::All) {
            select.quantifier = Some(SetQuantifier::All);
        } else if self.eat_keyword(Keyword::Distinct) {
            select.quantifier = Some(SetQuantifier::Distinct);
        }
        if self.eat_keyword(Keyword::Top) {
            select.top = Some(self.parse_top_count()?);
        }
        select.items = self.comma_separated(Self::parse_select_item)?;

        if self.eat_keyword(Keyword::Into) {
            select.into = self.parse_ident_list()?;
        }
        if self.eat_keyword(Keyword::From) {
            select.from = Some(self.parse_from_clause()?);
        }
        if self.eat_keyword(Keyword::Where) {
            select.where_clause = Some(self.parse_bool_expr()?);
        }
        if self.check_keyword(Keyword::Group) && self.check_keyword_nth(1, Keyword::By) {
            self.advance();
            self.advance();
            select.group_by = self.parse_expr_list()?;
        }
        if self.eat_keyword(Keyword::Having) {
            select.having = Some(self.parse_bool_expr()?);
        } else if self.eat_keyword(Keyword::Qualify) {
            select.qualify = Some(self.parse_bool_expr()?);
        }
        if self.check_keyword(Keyword::Order) && self.check_keyword_nth(1, Keyword::By) {
            self.advance();
            self.advance();
            select.order_by = self.parse_order_items()?;
        }
        select.options = self.parse_select_options()?;
        Ok(select)
    }

    /// The row count after `TOP`: a literal, a name or a parenthesised expression.
    fn parse_top_count(&mut self) -> Result<Expr, ParseError> {
        if let Some(literal) = self.try_literal() {
            return Ok(Expr::Literal(literal));
        }
        if self.eat(&TokenKind::LeftParen) {
            let expr = self.parse_expr()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::Paren(Box::new(expr)));
        }
        Ok(Expr::Ident(self.parse_ident()?))
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParseError> {
        if self.eat(&TokenKind::Star) {
            return Ok(SelectItem::Wildcard { qualifier: None });
        }
        if self.is_identifier_part(0) {
            let qualified = self.speculate("qualified wildcard", |p| {
                let qualifier = p.parse_ident()?;
                p.expect(&TokenKind::Dot)?;
                p.expect(&TokenKind::Star)?;
                Ok(qualifier)
            });
            if let Some(qualifier) = qualified {
                return Ok(SelectItem::Wildcard {
                    qualifier: Some(qualifier),
                });
            }
        }

        let target = if matches!(self.current().kind, TokenKind::Identifier(_))
            && self.check_nth(1, &TokenKind::Eq)
        {
            let target = Ident::new(self.parse_ident_part()?);
            self.advance();
            Some(target)
        } else {
            None
        };
        let expr = self.parse_expr()?;

        let alias = if self.check(&TokenKind::LeftParen) && self.check_keyword_nth(1, Keyword::Title)
        {
            self.advance();
            self.advance();
            let TokenKind::String(title) = self.current().kind.clone() else {
                return Err(self.error_here(&["string"]));
            };
            self.advance();
            self.expect(&TokenKind::RightParen)?;
            Some(SelectAlias::Title(title))
        } else {
            self.parse_optional_alias()?
                .map(|name| SelectAlias::Name(Ident::new(name)))
        };
        Ok(SelectItem::Expr {
            target,
            expr,
            alias,
        })
    }

    fn parse_from_clause(&mut self) -> Result<FromClause, ParseError> {
        let source = self.parse_table_source()?;
        let mut joins = Vec::new();
        loop {
            if self.eat(&TokenKind::Comma) {
                let source = self.parse_table_source()?;
                joins.push(Join {
                    kind: JoinKind::Comma,
                    source,
                    on: None,
                });
                continue;
            }
            let Some(kind) = self.parse_join_kind() else {
                break;
            };
            let source = self.parse_table_source()?;
            self.expect_keyword(Keyword::On)?;
            let on = self.parse_bool_expr()?;
            joins.push(Join {
                kind,
                source,
                on: Some(on),
            });
        }
        Ok(FromClause { source, joins })
    }

    /// `[INNER] JOIN` or `LEFT | RIGHT | FULL [OUTER] JOIN`.
    fn parse_join_kind(&mut self) -> Option<JoinKind> {
        let (kind, words) = match self.current().as_keyword() {
            Some(Keyword::Join) => (JoinKind::Inner, 0),
            Some(Keyword::Inner) if self.check_keyword_nth(1, Keyword::Join) => (JoinKind::Inner, 1),
            Some(kw @ (Keyword::Left | Keyword::Right | Keyword::Full)) => {
                let kind = match kw {
                    Keyword::Left => JoinKind::Left,
                    Keyword::Right => JoinKind::Right,
                    _ => JoinKind::Full,
                };
                if self.check_keyword_nth(1, Keyword::Join) {
                    (kind, 1)
                } else if self.check_keyword_nth(1, Keyword::Outer)
                    && self.check_keyword_nth(2, Keyword::Join)
                {
                    (kind, 2)
                } else {
                    return None;
                }
            }
            _ => return None,
        };
        for _ in 0..=words {
            self.advance();
        }
        Some(kind)
    }

    fn parse_table_source(&mut self) -> Result<TableSource, ParseError> {
        if self.eat(&TokenKind::LeftParen) {
            let query = self.parse_select_stmt()?;
            self.expect(&TokenKind::RightParen)?;
            let alias = self.parse_table_alias()?;
            return Ok(TableSource::Subquery {
                query: Box::new(query),
                alias,
            });
        }
        if self.check_keyword(Keyword::Table) {
            self.advance();
            self.expect(&TokenKind::LeftParen)?;
            self.expect_keyword(Keyword::Values)?;
            let rows = self.comma_separated(Self::parse_values_row)?;
            self.expect(&TokenKind::RightParen)?;
            let Some(alias) = self.parse_table_alias()? else {
                return Err(self.error_here(&["alias"]));
            };
            return Ok(TableSource::Values { rows, alias });
        }
        let name = self.parse_ident()?;
        let alias = self.parse_table_alias()?;
        Ok(TableSource::Table { name, alias })
    }

    /// `[AS] alias [( col, ... )]`
    fn parse_table_alias(&mut self) -> Result<Option<TableAlias>, ParseError> {
        let Some(name) = self.parse_optional_alias()? else {
            return Ok(None);
        };
        let columns = if self.check(&TokenKind::LeftParen) && self.is_identifier_part(1) {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        Ok(Some(TableAlias {
            name: Ident::new(name),
            columns,
        }))
    }

    /// A row written as a parenthesised list, or a single bare expression.
    fn parse_values_row(&mut self) -> Result<Vec<Expr>, ParseError> {
        if self.eat(&TokenKind::LeftParen) {
            let row = self.parse_expr_list()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(row);
        }
        Ok(vec![self.parse_expr()?])
    }

    /// `expr [ASC | DESC], ...`
    pub(crate) fn parse_order_items(&mut self) -> Result<Vec<OrderItem>, ParseError> {
        self.comma_separated(|p| {
            let expr = p.parse_expr()?;
            let direction = if p.eat_keyword(Keyword::Asc) {
                Some(SortDirection::Asc)
            } else if p.eat_keyword(Keyword::Desc) {
                Some(SortDirection::Desc)
            } else {
                None
            };
            Ok(OrderItem { expr, direction })
        })
    }

    fn parse_select_options(&mut self) -> Result<Vec<SelectOption>, ParseError> {
        let mut options = Vec::new();
        loop {
            if self.eat_keyword(Keyword::Limit) {
                options.push(SelectOption::Limit(self.parse_expr()?));
                continue;
            }
            let level = match self.peek_nth(1).as_keyword() {
                Some(Keyword::Rr) => IsolationLevel::Rr,
                Some(Keyword::Rs) => IsolationLevel::Rs,
                Some(Keyword::Cs) => IsolationLevel::Cs,
                Some(Keyword::Ur) => IsolationLevel::Ur,
                _ => break,
            };
            if !self.check_keyword(Keyword::With) {
                break;
            }
            self.advance();
            self.advance();
            let lock = if self.eat_keyword(Keyword::Use) {
                self.expect_keyword(Keyword::And)?;
                self.expect_keyword(Keyword::Keep)?;
                let lock = match self.current().as_keyword() {
                    Some(Keyword::Exclusive) => LockMode::Exclusive,
                    Some(Keyword::Update) => LockMode::Update,
                    Some(Keyword::Share) => LockMode::Share,
                    _ => return Err(self.error_here(&["EXCLUSIVE", "UPDATE", "SHARE"])),
                };
                self.advance();
                self.expect_keyword(Keyword::Locks)?;
                Some(lock)
            } else {
                None
            };
            options.push(SelectOption::Isolation { level, lock });
        }
        Ok(options)
    }

    // INSERT

    /// Dispatches between `INSERT ... DIRECTORY` and the table forms.
    pub(crate) fn parse_insert_any(&mut self) -> Result<Statement, ParseError> {
        let directory = self.check_keyword_nth(1, Keyword::Overwrite)
            && (self.check_keyword_nth(2, Keyword::Local)
                || self.check_keyword_nth(2, Keyword::Directory));
        if directory {
            return Ok(Statement::InsertDirectory(Box::new(
                self.parse_insert_directory()?,
            )));
        }
        Ok(Statement::Insert(Box::new(self.parse_insert()?)))
    }

    pub(crate) fn parse_insert(&mut self) -> Result<InsertStmt, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        let mode = if self.eat_keyword(Keyword::Overwrite) {
            self.expect_keyword(Keyword::Table)?;
            InsertMode::OverwriteTable
        } else {
            self.expect_keyword(Keyword::Into)?;
            if self.eat_keyword(Keyword::Table) {
                InsertMode::IntoTable
            } else {
                InsertMode::Into
            }
        };
        let table = self.parse_ident()?;
        let columns = if self.check(&TokenKind::LeftParen) && !self.starts_nested_select() {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        let source = if self.eat_keyword(Keyword::Values) {
            InsertSource::Values(self.comma_separated(Self::parse_paren_expr_row)?)
        } else {
            InsertSource::Select(Box::new(self.parse_select_stmt()?))
        };
        Ok(InsertStmt {
            mode,
            table,
            columns,
            source,
        })
    }

    fn parse_paren_expr_row(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let row = self.parse_expr_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(row)
    }

    fn parse_insert_directory(&mut self) -> Result<InsertDirectoryStmt, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Overwrite)?;
        let local = self.eat_keyword(Keyword::Local);
        self.expect_keyword(Keyword::Directory)?;
        let path = self.parse_file_or_expr()?;
        let source = if self.starts_select() || self.starts_nested_select() {
            DirectorySource::Select(Box::new(self.parse_select_stmt()?))
        } else {
            DirectorySource::Expr(self.parse_expr()?)
        };
        Ok(InsertDirectoryStmt {
            local,
            path,
            source,
        })
    }

    /// A bare file path, kept as a string literal, or an expression.
    pub(crate) fn parse_file_or_expr(&mut self) -> Result<Expr, ParseError> {
        if let TokenKind::FilePath(path) = self.current().kind.clone() {
            self.advance();
            return Ok(Expr::string(path));
        }
        self.parse_expr()
    }

    // UPDATE

    pub(crate) fn parse_update(&mut self) -> Result<UpdateStmt, ParseError> {
        self.expect_keyword(Keyword::Update)?;
        let (source, from) = if self.eat(&TokenKind::LeftParen) {
            let query = self.parse_select_stmt()?;
            self.expect(&TokenKind::RightParen)?;
            (TargetSource::Subquery(Box::new(query)), None)
        } else {
            let table = self.parse_ident()?;
            let from = if self.eat_keyword(Keyword::From) {
                Some(self.parse_from_clause()?)
            } else {
                None
            };
            (TargetSource::Table(table), from)
        };
        let alias = self.parse_optional_alias()?.map(Ident::new);
        self.expect_keyword(Keyword::Set)?;
        let assignments = self.comma_separated(Self::parse_assignment_item)?;
        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_bool_expr()?)
        } else {
            None
        };
        let upsert = if self.check_keyword(Keyword::Else) && self.check_keyword_nth(1, Keyword::Insert)
        {
            self.advance();
            Some(Box::new(self.parse_insert()?))
        } else {
            None
        };
        Ok(UpdateStmt {
            target: TargetTable { source, alias },
            from,
            assignments,
            where_clause,
            upsert,
        })
    }

    // DELETE

    pub(crate) fn parse_delete(&mut self) -> Result<DeleteStmt, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.eat_keyword(Keyword::From);
        let table = self.parse_ident()?;
        let alias = self.parse_optional_alias()?.map(Ident::new);
        let mut stmt = DeleteStmt {
            table,
            alias,
            where_clause: None,
            all: false,
        };
        if self.eat_keyword(Keyword::Where) {
            stmt.where_clause = Some(self.parse_bool_expr()?);
        } else {
            stmt.all = self.eat_keyword(Keyword::All);
        }
        Ok(stmt)
    }

    // MERGE

    pub(crate) fn parse_merge(&mut self) -> Result<MergeStmt, ParseError> {
        self.expect_keyword(Keyword::Merge)?;
        self.expect_keyword(Keyword::Into)?;
        let target = self.parse_merge_table()?;
        self.expect_keyword(Keyword::Using)?;
        let source = self.parse_merge_table()?;
        self.expect_keyword(Keyword::On)?;
        let on = self.parse_bool_expr()?;

        let mut clauses = Vec::new();
        loop {
            if self.check_keyword(Keyword::Else) && self.check_keyword_nth(1, Keyword::Ignore) {
                self.advance();
                self.advance();
                clauses.push(MergeClause::ElseIgnore);
                continue;
            }
            if !self.eat_keyword(Keyword::When) {
                break;
            }
            let matched = !self.eat_keyword(Keyword::Not);
            self.expect_keyword(Keyword::Matched)?;
            let condition = if self.eat_keyword(Keyword::And) {
                Some(self.parse_bool_expr()?)
            } else {
                None
            };
            self.expect_keyword(Keyword::Then)?;
            let action = self.parse_merge_action()?;
            clauses.push(MergeClause::When {
                matched,
                condition,
                action,
            });
        }
        if clauses.is_empty() {
            return Err(self.error_here(&["WHEN"]));
        }
        Ok(MergeStmt {
            target,
            source,
            on,
            clauses,
        })
    }

    fn parse_merge_table(&mut self) -> Result<TargetTable, ParseError> {
        let source = if self.eat(&TokenKind::LeftParen) {
            let query = self.parse_select_stmt()?;
            self.expect(&TokenKind::RightParen)?;
            TargetSource::Subquery(Box::new(query))
        } else {
            TargetSource::Table(self.parse_ident()?)
        };
        let alias = self.parse_optional_alias()?.map(Ident::new);
        Ok(TargetTable { source, alias })
    }

    fn parse_merge_action(&mut self) -> Result<MergeAction, ParseError> {
        match self.current().as_keyword() {
            Some(Keyword::Insert) => {
                self.advance();
                let columns = if self.check(&TokenKind::LeftParen) {
                    self.parse_paren_ident_list()?
                } else {
                    Vec::new()
                };
                self.expect_keyword(Keyword::Values)?;
                let values = self.parse_paren_expr_row()?;
                Ok(MergeAction::Insert { columns, values })
            }
            Some(Keyword::Update) => {
                self.advance();
                self.expect_keyword(Keyword::Set)?;
                let assignments = self.comma_separated(Self::parse_assignment_item)?;
                let where_clause = if self.eat_keyword(Keyword::Where) {
                    Some(self.parse_bool_expr()?)
                } else {
                    None
                };
                Ok(MergeAction::Update {
                    assignments,
                    where_clause,
                })
            }
            Some(Keyword::Delete) => {
                self.advance();
                Ok(MergeAction::Delete)
            }
            _ => Err(self.error_here(&["INSERT", "UPDATE", "DELETE"])),
        }
    }

    // VALUES ... INTO

    pub(crate) fn parse_values_into(&mut self) -> Result<ValuesIntoStmt, ParseError> {
        self.expect_keyword(Keyword::Values)?;
        let paren = self.eat(&TokenKind::LeftParen);
        let values = self.parse_expr_list()?;
        if paren {
            self.expect(&TokenKind::RightParen)?;
        }
        self.expect_keyword(Keyword::Into)?;
        let paren = self.eat(&TokenKind::LeftParen);
        let targets = self.parse_ident_list()?;
        if paren {
            self.expect(&TokenKind::RightParen)?;
        }
        Ok(ValuesIntoStmt { values, targets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BoolExpr;

    fn select(sql: &str) -> SubSelect {
        let stmt = Parser::from_sql(sql).parse_select_stmt().unwrap();
        match stmt.body.first {
            FullSelectItem::Select(sub) => *sub,
            FullSelectItem::Nested(_) => panic!("expected a plain select"),
        }
    }

    #[test]
    fn test_select_clauses() {
        let sub = select(
            "SELECT DISTINCT TOP 10 a, t.*, b AS x FROM t WHERE a > 1 GROUP BY a HAVING COUNT(*) > 1 ORDER BY a DESC LIMIT 5",
        );
        assert_eq!(sub.quantifier, Some(SetQuantifier::Distinct));
        assert_eq!(sub.top, Some(Expr::integer(10)));
        assert_eq!(sub.items.len(), 3);
        assert!(matches!(
            sub.items[1],
            SelectItem::Wildcard { qualifier: Some(_) }
        ));
        assert!(sub.where_clause.is_some());
        assert_eq!(sub.group_by.len(), 1);
        assert!(sub.having.is_some());
        assert_eq!(sub.order_by[0].direction, Some(SortDirection::Desc));
        assert_eq!(sub.options, vec![SelectOption::Limit(Expr::integer(5))]);
    }

    #[test]
    fn test_top_then_star() {
        let sub = select("SELECT TOP 1 * FROM t");
        assert_eq!(sub.items, vec![SelectItem::Wildcard { qualifier: None }]);
    }

    #[test]
    fn test_select_item_forms() {
        let sub = select("SEL @v = a + 1, b (TITLE 'Bee'), c d FROM t");
        assert!(matches!(
            &sub.items[0],
            SelectItem::Expr { target: Some(t), .. } if t.name() == "@v"
        ));
        assert!(matches!(
            &sub.items[1],
            SelectItem::Expr { alias: Some(SelectAlias::Title(title)), .. } if title == "Bee"
        ));
        assert!(matches!(
            &sub.items[2],
            SelectItem::Expr { alias: Some(SelectAlias::Name(_)), .. }
        ));
    }

    #[test]
    fn test_joins() {
        let sub = select("SELECT * FROM a x LEFT OUTER JOIN b y ON x.id = y.id, c RIGHT JOIN d ON 1 = 1");
        let from = sub.from.unwrap();
        let kinds: Vec<JoinKind> = from.joins.iter().map(|j| j.kind).collect();
        assert_eq!(kinds, vec![JoinKind::Left, JoinKind::Comma, JoinKind::Right]);
    }

    #[test]
    fn test_right_as_alias() {
        let sub = select("SELECT * FROM t right");
        let from = sub.from.unwrap();
        assert!(matches!(
            from.source,
            TableSource::Table { alias: Some(ref a), .. } if a.name.name() == "right"
        ));
    }

    #[test]
    fn test_values_table_source() {
        let sub = select("SELECT * FROM TABLE (VALUES (1, 'a'), (2, 'b')) AS v (n, s)");
        let from = sub.from.unwrap();
        assert!(matches!(
            from.source,
            TableSource::Values { ref rows, ref alias } if rows.len() == 2 && alias.columns.len() == 2
        ));
    }

    #[test]
    fn test_set_operations_and_ctes() {
        let stmt = Parser::from_sql(
            "WITH c (x) AS (SELECT 1) SELECT x FROM c UNION ALL (SELECT 2)",
        )
        .parse_select_stmt()
        .unwrap();
        assert_eq!(stmt.ctes.len(), 1);
        assert_eq!(stmt.body.rest.len(), 1);
        assert!(stmt.body.rest[0].all);
        assert!(matches!(stmt.body.rest[0].item, FullSelectItem::Nested(_)));
    }

    #[test]
    fn test_isolation_option() {
        let sub = select("SELECT a FROM t WITH RS USE AND KEEP EXCLUSIVE LOCKS");
        assert_eq!(
            sub.options,
            vec![SelectOption::Isolation {
                level: IsolationLevel::Rs,
                lock: Some(LockMode::Exclusive),
            }]
        );
    }

    #[test]
    fn test_update_with_upsert() {
        let stmt = Parser::from_sql("UPDATE t SET a = 1, (b, c) = (2, 3) WHERE id = 1 ELSE INSERT INTO t VALUES (1, 2, 3)")
            .parse_update()
            .unwrap();
        assert_eq!(stmt.assignments.len(), 2);
        assert!(stmt.upsert.is_some());
    }

    #[test]
    fn test_delete_all() {
        let stmt = Parser::from_sql("DELETE FROM t ALL").parse_delete().unwrap();
        assert!(stmt.all);
        assert_eq!(stmt.alias, None);
    }

    #[test]
    fn test_merge() {
        let stmt = Parser::from_sql(
            "MERGE INTO t USING s ON t.id = s.id \
             WHEN MATCHED AND s.flag = 1 THEN UPDATE SET t.v = s.v \
             WHEN NOT MATCHED THEN INSERT (id, v) VALUES (s.id, s.v) \
             ELSE IGNORE",
        )
        .parse_merge()
        .unwrap();
        assert_eq!(stmt.clauses.len(), 3);
        assert!(matches!(
            stmt.clauses[0],
            MergeClause::When { matched: true, condition: Some(BoolExpr::Compare { .. }), .. }
        ));
        assert_eq!(stmt.clauses[2], MergeClause::ElseIgnore);
    }

    #[test]
    fn test_insert_forms() {
        let stmt = Parser::from_sql("INSERT INTO TABLE t (a, b) VALUES (1, 2), (3, 4)")
            .parse_insert()
            .unwrap();
        assert_eq!(stmt.mode, InsertMode::IntoTable);
        assert!(matches!(stmt.source, InsertSource::Values(ref rows) if rows.len() == 2));

        let stmt = Parser::from_sql("INSERT OVERWRITE TABLE t SELECT * FROM s")
            .parse_insert()
            .unwrap();
        assert_eq!(stmt.mode, InsertMode::OverwriteTable);
    }

    #[test]
    fn test_values_into() {
        let stmt = Parser::from_sql("VALUES (1, 2) INTO (a, b)")
            .parse_values_into()
            .unwrap();
        assert_eq!(stmt.values.len(), 2);
        assert_eq!(stmt.targets.len(), 2);
    }
}
