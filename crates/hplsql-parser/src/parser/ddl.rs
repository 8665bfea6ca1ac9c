//! Data definition: tables, table options, indexes, databases, DROP and TRUNCATE.
//!
//! Table options of every dialect are accepted by one loop that tries each
//! fragment in turn, so fragments may repeat and appear in any order.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    AlterTableStmt, ColumnConstraint, ColumnDef, CreateDatabaseStmt, CreateIndexStmt,
    CreateTableStmt, CreateTableTypeStmt, DatabaseOption, Db2TableOption, DropStmt, DropTarget,
    FkAction, FkEvent, HiveTableOption, Ident, IndexColumn, MsSqlTableOption, MySqlTableOption,
    OracleTableOption, ReferentialAction, RoutinePrefix, RowFormatField, SortDirection,
    Statement, TableBody, TableConstraint, TableConstraintKind, TableElement, TableKind,
    TableOption, TeradataTableOption, VolatileSet,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// `CREATE [OR REPLACE] ...`
    pub(crate) fn parse_create(&mut self) -> Result<Statement, ParseError> {
        let start = self.position();
        self.expect_keyword(Keyword::Create)?;
        let or_replace = self.eat_keyword(Keyword::Or);
        if or_replace {
            self.expect_keyword(Keyword::Replace)?;
        }

        match self.current().as_keyword() {
            Some(Keyword::Function | Keyword::Procedure | Keyword::Proc | Keyword::Package) => {
                self.parse_routine(RoutinePrefix::Create { or_replace }, start)
            }
            Some(Keyword::Database | Keyword::Schema) => self.parse_create_database(),
            Some(Keyword::Unique | Keyword::Index) => self.parse_create_index(),
            _ => self.parse_create_table(),
        }
    }

    // CREATE TABLE

    fn parse_table_kind(&mut self) -> Result<TableKind, ParseError> {
        if self.eat_keyword(Keyword::Local) {
            self.expect_keyword(Keyword::Temporary)?;
            return Ok(TableKind::LocalTemporary);
        }
        let set = if self.check_keyword_nth(1, Keyword::Volatile) {
            match self.current().as_keyword() {
                Some(Keyword::Set) => Some(VolatileSet::Set),
                Some(Keyword::Multiset) => Some(VolatileSet::Multiset),
                _ => None,
            }
        } else {
            None
        };
        if set.is_some() {
            self.advance();
        }
        if self.eat_keyword(Keyword::Volatile) {
            return Ok(TableKind::Volatile { set });
        }
        Ok(TableKind::Regular)
    }

    /// `[kind] TABLE [IF NOT EXISTS] name [pre-options] body [options]`
    fn parse_create_table(&mut self) -> Result<Statement, ParseError> {
        let kind = self.parse_table_kind()?;
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.check_keyword(Keyword::If);
        if if_not_exists {
            self.advance();
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
        }
        let name = self.parse_ident()?;
        let pre_options = self.parse_table_pre_options()?;
        let body = self.parse_table_body()?;
        let options = self.parse_table_options()?;
        Ok(Statement::CreateTable(Box::new(CreateTableStmt {
            kind,
            if_not_exists,
            name,
            pre_options,
            body,
            options,
        })))
    }

    /// Teradata `, [NO] LOG` and `, [NO] FALLBACK` between the name and the body.
    pub(crate) fn parse_table_pre_options(&mut self) -> Result<Vec<TableOption>, ParseError> {
        let mut options = Vec::new();
        while self.check(&TokenKind::Comma) {
            let negated = self.check_keyword_nth(1, Keyword::No);
            let word = self.peek_nth(1 + usize::from(negated)).as_keyword();
            let option = match word {
                Some(Keyword::Log) => TeradataTableOption::Log(!negated),
                Some(Keyword::Fallback) => TeradataTableOption::Fallback(!negated),
                _ => break,
            };
            self.advance();
            if negated {
                self.advance();
            }
            self.advance();
            options.push(TableOption::Teradata(option));
        }
        Ok(options)
    }

    /// `( element, ... )`, `AS select`, `AS ( select )` or `LIKE name`.
    pub(crate) fn parse_table_body(&mut self) -> Result<TableBody, ParseError> {
        if self.eat_keyword(Keyword::Like) {
            return Ok(TableBody::Like(self.parse_ident()?));
        }
        if self.eat_keyword(Keyword::As) {
            let paren = self.starts_nested_select();
            if paren {
                self.advance();
            }
            let query = self.parse_select_stmt()?;
            if paren {
                self.expect(&TokenKind::RightParen)?;
            }
            return Ok(TableBody::AsSelect(Box::new(query)));
        }
        self.expect(&TokenKind::LeftParen)?;
        let elements = self.comma_separated(Self::parse_table_element)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(TableBody::Columns(elements))
    }

    fn starts_table_constraint(&self) -> bool {
        match self.current().as_keyword() {
            Some(Keyword::Constraint | Keyword::Foreign) => true,
            Some(Keyword::Primary) => self.check_keyword_nth(1, Keyword::Key),
            _ => false,
        }
    }

    fn parse_table_element(&mut self) -> Result<TableElement, ParseError> {
        if self.starts_table_constraint() {
            return Ok(TableElement::Constraint(self.parse_table_constraint()?));
        }
        Ok(TableElement::Column(self.parse_column_def()?))
    }

    /// `name type attrs constraints`
    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = Ident::new(self.parse_ident_part()?);
        let data_type = self.parse_data_type()?;
        let attrs = self.parse_type_attrs()?;
        let mut constraints = Vec::new();
        while let Some(constraint) = self.parse_column_constraint()? {
            constraints.push(constraint);
        }
        Ok(ColumnDef {
            name,
            data_type,
            attrs,
            constraints,
        })
    }

    /// One inline constraint, optionally named. The name is not kept.
    fn parse_column_constraint(&mut self) -> Result<Option<ColumnConstraint>, ParseError> {
        if self.eat_keyword(Keyword::Constraint) {
            self.parse_ident()?;
        }
        if let Some(default) = self.parse_default_value()? {
            return Ok(Some(ColumnConstraint::Default(default)));
        }
        let constraint = match self.current().as_keyword() {
            Some(Keyword::Not) if self.check_keyword_nth(1, Keyword::Null) => {
                self.advance();
                self.advance();
                ColumnConstraint::NotNull
            }
            Some(Keyword::Null) => {
                self.advance();
                ColumnConstraint::Null
            }
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ColumnConstraint::PrimaryKey
            }
            Some(Keyword::Unique) => {
                self.advance();
                ColumnConstraint::Unique
            }
            Some(Keyword::References) => {
                self.advance();
                let table = self.parse_ident()?;
                self.expect(&TokenKind::LeftParen)?;
                let column = self.parse_ident()?;
                self.expect(&TokenKind::RightParen)?;
                let actions = self.parse_fk_actions()?;
                ColumnConstraint::References {
                    table,
                    column,
                    actions,
                }
            }
            Some(Keyword::Identity) => {
                self.advance();
                let mut args = Vec::new();
                if self.eat(&TokenKind::LeftParen) {
                    args = self.comma_separated(Self::parse_int_literal)?;
                    self.expect(&TokenKind::RightParen)?;
                }
                ColumnConstraint::Identity(args)
            }
            Some(Keyword::AutoIncrement) => {
                self.advance();
                ColumnConstraint::AutoIncrement
            }
            Some(Keyword::Enable) => {
                self.advance();
                ColumnConstraint::Enable
            }
            _ => return Ok(None),
        };
        Ok(Some(constraint))
    }

    /// `ON UPDATE|DELETE action ...`
    fn parse_fk_actions(&mut self) -> Result<Vec<FkAction>, ParseError> {
        let mut actions = Vec::new();
        while self.check_keyword(Keyword::On)
            && matches!(
                self.peek_nth(1).as_keyword(),
                Some(Keyword::Update | Keyword::Delete)
            )
        {
            self.advance();
            let event = if self.eat_keyword(Keyword::Update) {
                FkEvent::Update
            } else {
                self.advance();
                FkEvent::Delete
            };
            let action = match self.current().as_keyword() {
                Some(Keyword::No) => {
                    self.advance();
                    self.expect_keyword(Keyword::Action)?;
                    ReferentialAction::NoAction
                }
                Some(Keyword::Restrict) => {
                    self.advance();
                    ReferentialAction::Restrict
                }
                Some(Keyword::Cascade) => {
                    self.advance();
                    ReferentialAction::Cascade
                }
                Some(Keyword::Set) => {
                    self.advance();
                    if self.eat_keyword(Keyword::Null) {
                        ReferentialAction::SetNull
                    } else {
                        self.expect_keyword(Keyword::Default)?;
                        ReferentialAction::SetDefault
                    }
                }
                _ => {
                    return Err(self.error_here(&["NO ACTION", "RESTRICT", "SET", "CASCADE"]));
                }
            };
            actions.push(FkAction { event, action });
        }
        Ok(actions)
    }

    /// `[CONSTRAINT name] PRIMARY KEY ... | FOREIGN KEY ...`
    fn parse_table_constraint(&mut self) -> Result<TableConstraint, ParseError> {
        let name = if self.eat_keyword(Keyword::Constraint) {
            Some(self.parse_ident()?)
        } else {
            None
        };
        let kind = if self.eat_keyword(Keyword::Primary) {
            self.expect_keyword(Keyword::Key)?;
            let clustered = self.eat_keyword(Keyword::Clustered);
            self.expect(&TokenKind::LeftParen)?;
            let columns = self.comma_separated(Self::parse_index_column)?;
            self.expect(&TokenKind::RightParen)?;
            TableConstraintKind::PrimaryKey { clustered, columns }
        } else {
            self.expect_keyword(Keyword::Foreign)?;
            self.expect_keyword(Keyword::Key)?;
            let columns = self.parse_paren_ident_list()?;
            self.expect_keyword(Keyword::References)?;
            let table = self.parse_ident()?;
            let ref_columns = self.parse_paren_ident_list()?;
            let actions = self.parse_fk_actions()?;
            TableConstraintKind::ForeignKey {
                columns,
                table,
                ref_columns,
                actions,
            }
        };
        Ok(TableConstraint { name, kind })
    }

    fn parse_index_column(&mut self) -> Result<IndexColumn, ParseError> {
        let name = self.parse_ident()?;
        let direction = if self.eat_keyword(Keyword::Asc) {
            Some(SortDirection::Asc)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(SortDirection::Desc)
        } else {
            None
        };
        Ok(IndexColumn { name, direction })
    }

    // Table options

    /// Options after the table body, in any order.
    pub(crate) fn parse_table_options(&mut self) -> Result<Vec<TableOption>, ParseError> {
        let mut options = Vec::new();
        while let Some(option) = self.parse_table_option()? {
            options.push(option);
        }
        Ok(options)
    }

    fn parse_table_option(&mut self) -> Result<Option<TableOption>, ParseError> {
        if let Some(option) = self.parse_generic_option()? {
            return Ok(Some(option));
        }
        if let Some(option) = self.parse_oracle_option()? {
            return Ok(Some(TableOption::Oracle(option)));
        }
        if let Some(option) = self.parse_db2_option()? {
            return Ok(Some(TableOption::Db2(option)));
        }
        if let Some(option) = self.parse_teradata_option()? {
            return Ok(Some(TableOption::Teradata(option)));
        }
        if let Some(option) = self.parse_hive_option()? {
            return Ok(Some(TableOption::Hive(option)));
        }
        if let Some(option) = self.parse_mssql_option()? {
            return Ok(Some(TableOption::MsSql(option)));
        }
        Ok(self.parse_mysql_option()?.map(TableOption::MySql))
    }

    /// `ON COMMIT DELETE|PRESERVE ROWS`
    fn parse_generic_option(&mut self) -> Result<Option<TableOption>, ParseError> {
        if !(self.check_keyword(Keyword::On) && self.check_keyword_nth(1, Keyword::Commit)) {
            return Ok(None);
        }
        self.advance();
        self.advance();
        let preserve_rows =
            self.expect_one_of(&[Keyword::Delete, Keyword::Preserve])? == Keyword::Preserve;
        self.expect_keyword(Keyword::Rows)?;
        Ok(Some(TableOption::OnCommit { preserve_rows }))
    }

    fn parse_oracle_option(&mut self) -> Result<Option<OracleTableOption>, ParseError> {
        let option = match self.current().as_keyword() {
            Some(Keyword::Segment) if self.check_keyword_nth(1, Keyword::Creation) => {
                self.advance();
                self.advance();
                let immediate = self.expect_one_of(&[Keyword::Immediate, Keyword::Deferred])?
                    == Keyword::Immediate;
                OracleTableOption::SegmentCreation { immediate }
            }
            Some(kw @ (Keyword::Pctfree | Keyword::Pctused | Keyword::Initrans | Keyword::Maxtrans))
                if matches!(self.peek_nth(1).kind, TokenKind::Integer(_)) =>
            {
                self.advance();
                let value = self.parse_int_literal()?;
                match kw {
                    Keyword::Pctfree => OracleTableOption::PctFree(value),
                    Keyword::Pctused => OracleTableOption::PctUsed(value),
                    Keyword::Initrans => OracleTableOption::InitTrans(value),
                    _ => OracleTableOption::MaxTrans(value),
                }
            }
            Some(Keyword::Nocompress) => {
                self.advance();
                OracleTableOption::NoCompress
            }
            Some(Keyword::Logging) => {
                self.advance();
                OracleTableOption::Logging
            }
            Some(Keyword::Nologging) => {
                self.advance();
                OracleTableOption::NoLogging
            }
            Some(Keyword::Storage) if self.check_nth(1, &TokenKind::LeftParen) => {
                self.advance();
                OracleTableOption::Storage(self.parse_raw_parenthesized()?)
            }
            Some(Keyword::Tablespace) => {
                self.advance();
                OracleTableOption::Tablespace(self.parse_ident()?)
            }
            _ => return Ok(None),
        };
        Ok(Some(option))
    }

    /// `( ... )` with nesting, as the raw text of each inner token.
    fn parse_raw_parenthesized(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut depth = 1_usize;
        let mut items = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::Eof => return Err(self.error_here(&["`)`"])),
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return Ok(items);
                    }
                }
                _ => {}
            }
            items.push(self.next_token().text);
        }
    }

    fn parse_db2_option(&mut self) -> Result<Option<Db2TableOption>, ParseError> {
        let kw = self.current().as_keyword();
        let next = self.peek_nth(1).as_keyword();
        let option = match (kw, next) {
            (Some(Keyword::In), _) if self.is_identifier_part(1) => {
                self.advance();
                Db2TableOption::In {
                    index: false,
                    tablespace: self.parse_ident()?,
                }
            }
            (Some(Keyword::Index), Some(Keyword::In)) => {
                self.advance();
                self.advance();
                Db2TableOption::In {
                    index: true,
                    tablespace: self.parse_ident()?,
                }
            }
            (Some(Keyword::With), Some(Keyword::Replace)) => {
                self.advance();
                self.advance();
                Db2TableOption::WithReplace
            }
            (Some(Keyword::With), Some(Keyword::Restrict)) => {
                self.advance();
                self.advance();
                self.expect_keyword(Keyword::On)?;
                self.expect_keyword(Keyword::Drop)?;
                Db2TableOption::WithRestrictOnDrop
            }
            (Some(Keyword::Distribute), Some(Keyword::By)) => {
                self.advance();
                self.advance();
                self.expect_keyword(Keyword::Hash)?;
                Db2TableOption::DistributeByHash(self.parse_paren_ident_list()?)
            }
            (Some(Keyword::Logged), _) => {
                self.advance();
                Db2TableOption::Logged
            }
            (Some(Keyword::Not), Some(Keyword::Logged)) => {
                self.advance();
                self.advance();
                Db2TableOption::NotLogged
            }
            (Some(Keyword::Compress), Some(Keyword::Yes | Keyword::No)) => {
                self.advance();
                Db2TableOption::Compress(self.expect_one_of(&[Keyword::Yes, Keyword::No])? == Keyword::Yes)
            }
            (Some(Keyword::Definition), Some(Keyword::Only)) => {
                self.advance();
                self.advance();
                Db2TableOption::DefinitionOnly
            }
            _ => return Ok(None),
        };
        Ok(Some(option))
    }

    fn parse_teradata_option(&mut self) -> Result<Option<TeradataTableOption>, ParseError> {
        let unique = self.check_keyword(Keyword::Unique);
        let primary_at = usize::from(unique);
        if self.check_keyword_nth(primary_at, Keyword::Primary)
            && self.check_keyword_nth(primary_at + 1, Keyword::Index)
        {
            for _ in 0..=primary_at + 1 {
                self.advance();
            }
            let columns = self.parse_paren_ident_list()?;
            return Ok(Some(TeradataTableOption::PrimaryIndex { unique, columns }));
        }
        if self.check_keyword(Keyword::With) && self.check_keyword_nth(1, Keyword::Data) {
            self.advance();
            self.advance();
            return Ok(Some(TeradataTableOption::WithData));
        }
        Ok(None)
    }

    fn parse_hive_option(&mut self) -> Result<Option<HiveTableOption>, ParseError> {
        if self.check_keyword(Keyword::Stored) && self.check_keyword_nth(1, Keyword::As) {
            self.advance();
            self.advance();
            return Ok(Some(HiveTableOption::StoredAs(self.parse_ident()?)));
        }
        if !(self.check_keyword(Keyword::Row) && self.check_keyword_nth(1, Keyword::Format)) {
            return Ok(None);
        }
        self.advance();
        self.advance();
        self.expect_keyword(Keyword::Delimited)?;
        let mut fields = Vec::new();
        while let Some(field) = self.parse_row_format_field()? {
            fields.push(field);
        }
        Ok(Some(HiveTableOption::RowFormatDelimited(fields)))
    }

    fn parse_row_format_field(&mut self) -> Result<Option<RowFormatField>, ParseError> {
        let field = match self.current().as_keyword() {
            Some(Keyword::Fields) => {
                self.advance();
                let value = self.parse_terminated_by()?;
                let escaped_by = if self.eat_keyword(Keyword::Escaped) {
                    self.expect_keyword(Keyword::By)?;
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                RowFormatField::FieldsTerminatedBy { value, escaped_by }
            }
            Some(Keyword::Collection) => {
                self.advance();
                self.expect_keyword(Keyword::Items)?;
                RowFormatField::CollectionItemsTerminatedBy(self.parse_terminated_by()?)
            }
            Some(Keyword::Map) => {
                self.advance();
                self.expect_keyword(Keyword::Keys)?;
                RowFormatField::MapKeysTerminatedBy(self.parse_terminated_by()?)
            }
            Some(Keyword::Lines) => {
                self.advance();
                RowFormatField::LinesTerminatedBy(self.parse_terminated_by()?)
            }
            Some(Keyword::Null) if self.check_keyword_nth(1, Keyword::Defined) => {
                self.advance();
                self.advance();
                self.expect_keyword(Keyword::As)?;
                RowFormatField::NullDefinedAs(self.parse_expr()?)
            }
            _ => return Ok(None),
        };
        Ok(Some(field))
    }

    fn parse_terminated_by(&mut self) -> Result<crate::ast::Expr, ParseError> {
        self.expect_keyword(Keyword::Terminated)?;
        self.expect_keyword(Keyword::By)?;
        self.parse_expr()
    }

    fn parse_mssql_option(&mut self) -> Result<Option<MsSqlTableOption>, ParseError> {
        if self.check_keyword(Keyword::On) && self.is_identifier_part(1) {
            self.advance();
            return Ok(Some(MsSqlTableOption::OnFilegroup(self.parse_ident()?)));
        }
        if self.eat_keyword(Keyword::TextimageOn) {
            return Ok(Some(MsSqlTableOption::TextImageOn(self.parse_ident()?)));
        }
        Ok(None)
    }

    fn parse_mysql_option(&mut self) -> Result<Option<MySqlTableOption>, ParseError> {
        let default = self.check_keyword(Keyword::Default)
            && matches!(
                self.peek_nth(1).as_keyword(),
                Some(Keyword::Character | Keyword::Charset)
            );
        if default {
            self.advance();
        }
        let option = match self.current().as_keyword() {
            Some(Keyword::AutoIncrement) => {
                self.advance();
                self.eat(&TokenKind::Eq);
                MySqlTableOption::AutoIncrement(self.parse_expr()?)
            }
            Some(Keyword::Comment) => {
                self.advance();
                self.eat(&TokenKind::Eq);
                MySqlTableOption::Comment(self.parse_expr()?)
            }
            Some(Keyword::Character) if self.check_keyword_nth(1, Keyword::Set) => {
                self.advance();
                self.advance();
                self.eat(&TokenKind::Eq);
                MySqlTableOption::CharacterSet {
                    default,
                    value: self.parse_expr()?,
                }
            }
            Some(Keyword::Charset) => {
                self.advance();
                self.eat(&TokenKind::Eq);
                MySqlTableOption::CharacterSet {
                    default,
                    value: self.parse_expr()?,
                }
            }
            Some(Keyword::Engine) => {
                self.advance();
                self.eat(&TokenKind::Eq);
                MySqlTableOption::Engine(self.parse_expr()?)
            }
            _ => return Ok(None),
        };
        Ok(Some(option))
    }

    // Other DDL

    /// `TYPE name IS TABLE OF type [INDEX BY type]`
    pub(crate) fn parse_create_table_type(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Type)?;
        let name = self.parse_ident()?;
        self.expect_keyword(Keyword::Is)?;
        self.expect_keyword(Keyword::Table)?;
        self.expect_keyword(Keyword::Of)?;
        let element_type = self.parse_data_type()?;
        let index_by = if self.eat_keyword(Keyword::Index) {
            self.expect_keyword(Keyword::By)?;
            Some(self.parse_data_type()?)
        } else {
            None
        };
        Ok(Statement::CreateTableType(CreateTableTypeStmt {
            name,
            element_type,
            index_by,
        }))
    }

    /// `ALTER TABLE t ADD ...` or `ALTER FUNCTION|PROCEDURE ...`
    pub(crate) fn parse_alter(&mut self) -> Result<Statement, ParseError> {
        let start = self.position();
        self.expect_keyword(Keyword::Alter)?;
        if matches!(
            self.current().as_keyword(),
            Some(Keyword::Function | Keyword::Procedure | Keyword::Proc)
        ) {
            return self.parse_routine(RoutinePrefix::Alter, start);
        }
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_ident()?;
        self.expect_keyword(Keyword::Add)?;

        let named_default = self.check_keyword(Keyword::Default)
            || (self.check_keyword(Keyword::Constraint) && self.check_keyword_nth(2, Keyword::Default));
        let constraint = if named_default {
            let name = if self.eat_keyword(Keyword::Constraint) {
                Some(self.parse_ident()?)
            } else {
                None
            };
            self.expect_keyword(Keyword::Default)?;
            let value = self.parse_expr()?;
            self.expect_keyword(Keyword::For)?;
            let column = self.parse_ident()?;
            TableConstraint {
                name,
                kind: TableConstraintKind::Default { value, column },
            }
        } else {
            self.parse_table_constraint()?
        };
        Ok(Statement::AlterTable(AlterTableStmt { table, constraint }))
    }

    /// `CREATE DATABASE|SCHEMA [IF NOT EXISTS] name [COMMENT e] [LOCATION e]`
    fn parse_create_database(&mut self) -> Result<Statement, ParseError> {
        let schema = self.expect_one_of(&[Keyword::Database, Keyword::Schema])? == Keyword::Schema;
        let if_not_exists = self.check_keyword(Keyword::If);
        if if_not_exists {
            self.advance();
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
        }
        let name = self.parse_expr()?;
        let mut options = Vec::new();
        loop {
            if self.eat_keyword(Keyword::Comment) {
                options.push(DatabaseOption::Comment(self.parse_expr()?));
            } else if self.eat_keyword(Keyword::Location) {
                options.push(DatabaseOption::Location(self.parse_expr()?));
            } else {
                break;
            }
        }
        Ok(Statement::CreateDatabase(CreateDatabaseStmt {
            schema,
            if_not_exists,
            name,
            options,
        }))
    }

    /// `CREATE [UNIQUE] INDEX name ON table (col [ASC|DESC], ...)`
    fn parse_create_index(&mut self) -> Result<Statement, ParseError> {
        let unique = self.eat_keyword(Keyword::Unique);
        self.expect_keyword(Keyword::Index)?;
        let name = self.parse_ident()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_ident()?;
        self.expect(&TokenKind::LeftParen)?;
        let columns = self.comma_separated(Self::parse_index_column)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Statement::CreateIndex(CreateIndexStmt {
            unique,
            name,
            table,
            columns,
        }))
    }

    /// `DROP TABLE|PACKAGE|PROCEDURE|FUNCTION|DATABASE|SCHEMA [IF EXISTS] name`
    pub(crate) fn parse_drop(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        let kind = self.expect_one_of(&[
            Keyword::Table,
            Keyword::Package,
            Keyword::Procedure,
            Keyword::Function,
            Keyword::Database,
            Keyword::Schema,
        ])?;
        let if_exists = self.check_keyword(Keyword::If);
        if if_exists {
            self.advance();
            self.expect_keyword(Keyword::Exists)?;
        }
        let target = match kind {
            Keyword::Table => DropTarget::Table(self.parse_ident()?),
            Keyword::Package => DropTarget::Package(self.parse_ident()?),
            Keyword::Procedure => DropTarget::Procedure(self.parse_ident()?),
            Keyword::Function => DropTarget::Function(self.parse_ident()?),
            Keyword::Database => DropTarget::Database(self.parse_expr()?),
            _ => DropTarget::Schema(self.parse_expr()?),
        };
        Ok(Statement::Drop(DropStmt { target, if_exists }))
    }

    /// `TRUNCATE [TABLE] name`
    pub(crate) fn parse_truncate(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Truncate)?;
        self.eat_keyword(Keyword::Table);
        Ok(Statement::Truncate(self.parse_ident()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    fn create_table(sql: &str) -> CreateTableStmt {
        match Parser::from_sql(sql).parse_statement().unwrap() {
            Statement::CreateTable(stmt) => *stmt,
            other => panic!("expected CREATE TABLE, got {other:?}"),
        }
    }

    fn columns(body: &TableBody) -> &[TableElement] {
        match body {
            TableBody::Columns(elements) => elements,
            other => panic!("expected columns, got {other:?}"),
        }
    }

    #[test]
    fn test_columns_and_constraints() {
        let stmt = create_table(
            "CREATE TABLE IF NOT EXISTS t (
                id INT NOT NULL PRIMARY KEY,
                parent INT REFERENCES t (id) ON DELETE CASCADE,
                code VARCHAR(10) DEFAULT 'x',
                CONSTRAINT pk PRIMARY KEY CLUSTERED (id ASC, code)
            )",
        );
        assert!(stmt.if_not_exists);
        let elements = columns(&stmt.body);
        assert_eq!(elements.len(), 4);
        assert!(matches!(
            &elements[0],
            TableElement::Column(ColumnDef { constraints, .. })
                if constraints == &vec![ColumnConstraint::PrimaryKey]
        ));
        assert!(matches!(
            &elements[1],
            TableElement::Column(ColumnDef { constraints, .. })
                if matches!(&constraints[0], ColumnConstraint::References { actions, .. } if actions.len() == 1)
        ));
        assert!(matches!(
            &elements[3],
            TableElement::Constraint(TableConstraint {
                name: Some(_),
                kind: TableConstraintKind::PrimaryKey { clustered: true, .. },
            })
        ));
    }

    #[test]
    fn test_option_dialect_tags() {
        let stmt = create_table(
            "CREATE TABLE t (a INT)
                SEGMENT CREATION IMMEDIATE PCTFREE 10 NOCOMPRESS
                STORAGE (INITIAL 65536 NEXT 1048576) TABLESPACE users
                ENGINE = InnoDB",
        );
        let dialects: Vec<Dialect> = stmt.options.iter().map(TableOption::dialect).collect();
        assert_eq!(
            dialects,
            vec![
                Dialect::Oracle,
                Dialect::Oracle,
                Dialect::Oracle,
                Dialect::Oracle,
                Dialect::Oracle,
                Dialect::MySql,
            ]
        );
        assert!(matches!(
            &stmt.options[3],
            TableOption::Oracle(OracleTableOption::Storage(items)) if items.len() == 4
        ));
    }

    #[test]
    fn test_options_in_any_order() {
        let stmt = create_table(
            "CREATE TABLE t (a INT) NOT LOGGED DISTRIBUTE BY HASH (a) IN ts1 COMPRESS YES NOT LOGGED",
        );
        assert_eq!(stmt.options.len(), 5);
        assert!(stmt.options.iter().all(|o| o.dialect() == Dialect::Db2));
    }

    #[test]
    fn test_teradata_volatile() {
        let stmt = create_table(
            "CREATE MULTISET VOLATILE TABLE t, NO LOG, NO FALLBACK AS (SELECT a FROM s) WITH DATA UNIQUE PRIMARY INDEX (a) ON COMMIT PRESERVE ROWS",
        );
        assert_eq!(
            stmt.kind,
            TableKind::Volatile {
                set: Some(VolatileSet::Multiset)
            }
        );
        assert_eq!(
            stmt.pre_options,
            vec![
                TableOption::Teradata(TeradataTableOption::Log(false)),
                TableOption::Teradata(TeradataTableOption::Fallback(false)),
            ]
        );
        assert!(matches!(stmt.body, TableBody::AsSelect(_)));
        assert_eq!(stmt.options.len(), 3);
        assert_eq!(stmt.options[2], TableOption::OnCommit { preserve_rows: true });
    }

    #[test]
    fn test_hive_and_mssql_options() {
        let stmt = create_table(
            "CREATE TABLE t (a STRING) ROW FORMAT DELIMITED FIELDS TERMINATED BY ',' LINES TERMINATED BY '\\n' STORED AS TEXTFILE",
        );
        assert!(matches!(
            &stmt.options[0],
            TableOption::Hive(HiveTableOption::RowFormatDelimited(fields)) if fields.len() == 2
        ));
        assert!(matches!(&stmt.options[1], TableOption::Hive(HiveTableOption::StoredAs(_))));

        let stmt = create_table("CREATE TABLE t (a INT) ON [PRIMARY] TEXTIMAGE_ON [PRIMARY]");
        assert!(stmt.options.iter().all(|o| o.dialect() == Dialect::MsSql));
    }

    #[test]
    fn test_other_ddl() {
        let parse = |sql: &str| Parser::from_sql(sql).parse_statement().unwrap();
        assert!(matches!(
            parse("ALTER TABLE t ADD CONSTRAINT fk FOREIGN KEY (a) REFERENCES p (id)"),
            Statement::AlterTable(_)
        ));
        assert!(matches!(
            parse("ALTER TABLE t ADD CONSTRAINT df DEFAULT 0 FOR qty"),
            Statement::AlterTable(AlterTableStmt {
                constraint: TableConstraint { kind: TableConstraintKind::Default { .. }, .. },
                ..
            })
        ));
        assert!(matches!(
            parse("CREATE DATABASE IF NOT EXISTS sales COMMENT 'c' LOCATION '/data'"),
            Statement::CreateDatabase(CreateDatabaseStmt { if_not_exists: true, ref options, .. })
                if options.len() == 2
        ));
        assert!(matches!(
            parse("CREATE UNIQUE INDEX ix ON t (a DESC)"),
            Statement::CreateIndex(CreateIndexStmt { unique: true, .. })
        ));
        assert!(matches!(
            parse("DROP TABLE IF EXISTS t"),
            Statement::Drop(DropStmt { if_exists: true, target: DropTarget::Table(_) })
        ));
        assert!(matches!(parse("TRUNCATE TABLE t"), Statement::Truncate(_)));
        assert!(matches!(
            parse("TYPE tab_t IS TABLE OF VARCHAR(10) INDEX BY BINARY_INTEGER"),
            Statement::CreateTableType(CreateTableTypeStmt { index_by: Some(_), .. })
        ));
    }
}
