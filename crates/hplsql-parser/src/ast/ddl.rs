//! Data-definition AST types: tables, indexes, databases and routines.

use super::expression::{Expr, Ident};
use super::query::{SelectStmt, SortDirection};
use super::statement::{BeginEndBlock, Block, DeclareItem};
use super::types::{DataType, DefaultValue, TypeAttr};
use crate::dialect::Dialect;

/// How a table is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Regular,
    /// `CREATE LOCAL TEMPORARY TABLE`
    LocalTemporary,
    /// Teradata `CREATE [SET|MULTISET] VOLATILE TABLE`
    Volatile { set: Option<VolatileSet> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolatileSet {
    Set,
    Multiset,
}

/// `CREATE TABLE`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStmt {
    pub kind: TableKind,
    pub if_not_exists: bool,
    pub name: Ident,
    /// Options written between the name and the definition.
    pub pre_options: Vec<TableOption>,
    pub body: TableBody,
    pub options: Vec<TableOption>,
}

/// The definition part shared by CREATE TABLE and temporary table declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Columns(Vec<TableElement>),
    AsSelect(Box<SelectStmt>),
    Like(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableElement {
    Column(ColumnDef),
    Constraint(TableConstraint),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: Ident,
    pub data_type: DataType,
    pub attrs: Vec<TypeAttr>,
    pub constraints: Vec<ColumnConstraint>,
}

/// Inline column constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    Default(DefaultValue),
    Null,
    NotNull,
    PrimaryKey,
    Unique,
    References {
        table: Ident,
        column: Ident,
        actions: Vec<FkAction>,
    },
    /// `IDENTITY (seed, step, ...)`
    Identity(Vec<i64>),
    AutoIncrement,
    Enable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FkEvent {
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    NoAction,
    Restrict,
    SetNull,
    SetDefault,
    Cascade,
}

/// `ON UPDATE|DELETE action`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FkAction {
    pub event: FkEvent,
    pub action: ReferentialAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumn {
    pub name: Ident,
    pub direction: Option<SortDirection>,
}

/// A table-level constraint, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    pub name: Option<Ident>,
    pub kind: TableConstraintKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintKind {
    PrimaryKey {
        clustered: bool,
        columns: Vec<IndexColumn>,
    },
    ForeignKey {
        columns: Vec<Ident>,
        table: Ident,
        ref_columns: Vec<Ident>,
        actions: Vec<FkAction>,
    },
    /// SQL Server `DEFAULT expr FOR column`, only via ALTER TABLE.
    Default { value: Expr, column: Ident },
}

/// One table option, tagged by the dialect it comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TableOption {
    /// `ON COMMIT DELETE|PRESERVE ROWS`
    OnCommit { preserve_rows: bool },
    Oracle(OracleTableOption),
    Db2(Db2TableOption),
    Teradata(TeradataTableOption),
    Hive(HiveTableOption),
    MsSql(MsSqlTableOption),
    MySql(MySqlTableOption),
}

impl TableOption {
    /// Returns the dialect this option belongs to.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        match self {
            Self::OnCommit { .. } => Dialect::Generic,
            Self::Oracle(_) => Dialect::Oracle,
            Self::Db2(_) => Dialect::Db2,
            Self::Teradata(_) => Dialect::Teradata,
            Self::Hive(_) => Dialect::Hive,
            Self::MsSql(_) => Dialect::MsSql,
            Self::MySql(_) => Dialect::MySql,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleTableOption {
    SegmentCreation { immediate: bool },
    PctFree(i64),
    PctUsed(i64),
    InitTrans(i64),
    MaxTrans(i64),
    NoCompress,
    Logging,
    NoLogging,
    /// `STORAGE ( ... )`, items kept as written.
    Storage(Vec<String>),
    Tablespace(Ident),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Db2TableOption {
    /// `[INDEX] IN tablespace`
    In { index: bool, tablespace: Ident },
    WithReplace,
    DistributeByHash(Vec<Ident>),
    Logged,
    NotLogged,
    Compress(bool),
    DefinitionOnly,
    WithRestrictOnDrop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeradataTableOption {
    PrimaryIndex { unique: bool, columns: Vec<Ident> },
    WithData,
    /// `, [NO] LOG`
    Log(bool),
    /// `, [NO] FALLBACK`
    Fallback(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HiveTableOption {
    RowFormatDelimited(Vec<RowFormatField>),
    StoredAs(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowFormatField {
    FieldsTerminatedBy {
        value: Expr,
        escaped_by: Option<Expr>,
    },
    CollectionItemsTerminatedBy(Expr),
    MapKeysTerminatedBy(Expr),
    LinesTerminatedBy(Expr),
    NullDefinedAs(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsSqlTableOption {
    OnFilegroup(Ident),
    TextImageOn(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MySqlTableOption {
    AutoIncrement(Expr),
    Comment(Expr),
    CharacterSet { default: bool, value: Expr },
    Engine(Expr),
}

/// `TYPE name IS TABLE OF type [INDEX BY type]`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableTypeStmt {
    pub name: Ident,
    pub element_type: DataType,
    pub index_by: Option<DataType>,
}

/// `ALTER TABLE t ADD [CONSTRAINT name] ...`
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableStmt {
    pub table: Ident,
    pub constraint: TableConstraint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseOption {
    Comment(Expr),
    Location(Expr),
}

/// `CREATE DATABASE|SCHEMA [IF NOT EXISTS] name options`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDatabaseStmt {
    pub schema: bool,
    pub if_not_exists: bool,
    pub name: Expr,
    pub options: Vec<DatabaseOption>,
}

/// `CREATE [UNIQUE] INDEX name ON table (cols)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndexStmt {
    pub unique: bool,
    pub name: Ident,
    pub table: Ident,
    pub columns: Vec<IndexColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    Table(Ident),
    Package(Ident),
    Procedure(Ident),
    Function(Ident),
    Database(Expr),
    Schema(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropStmt {
    pub target: DropTarget,
    pub if_exists: bool,
}

/// The keyword prefix of a routine definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutinePrefix {
    /// Nested inside a package body.
    #[default]
    None,
    Alter,
    Create { or_replace: bool },
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    In,
    Out,
    InOut,
}

/// A routine parameter; the mode may precede or follow the name.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineParam {
    pub name: Ident,
    pub mode: Option<ParamMode>,
    pub data_type: DataType,
    pub attrs: Vec<TypeAttr>,
    pub default: Option<DefaultValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityMode {
    Creator,
    Definer,
    Invoker,
    Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineOption {
    LanguageSql,
    SqlSecurity(SecurityMode),
    /// `[DYNAMIC] RESULT SETS n`
    ResultSets { dynamic: bool, count: i64 },
}

/// The executable part of a routine.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutineBody {
    /// `BEGIN ... END`
    Block(BeginEndBlock),
    /// Statements without an enclosing BEGIN/END.
    Statements(Block),
}

/// `CREATE FUNCTION`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFunctionStmt {
    pub prefix: RoutinePrefix,
    pub name: Ident,
    pub params: Vec<RoutineParam>,
    pub returns: DataType,
    /// Declarations between `AS|IS` and `BEGIN`.
    pub declarations: Vec<DeclareItem>,
    pub body: RoutineBody,
}

/// `CREATE PROCEDURE`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProcedureStmt {
    pub prefix: RoutinePrefix,
    pub name: Ident,
    pub params: Vec<RoutineParam>,
    pub options: Vec<RoutineOption>,
    pub declarations: Vec<DeclareItem>,
    pub label: Option<String>,
    pub body: RoutineBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PackageSpecItem {
    Variable {
        name: Ident,
        data_type: DataType,
        attrs: Vec<TypeAttr>,
    },
    Function {
        name: Ident,
        params: Vec<RoutineParam>,
        returns: DataType,
    },
    Procedure {
        name: Ident,
        params: Vec<RoutineParam>,
    },
}

/// `CREATE PACKAGE name AS spec END`
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePackageStmt {
    pub prefix: RoutinePrefix,
    pub name: Ident,
    pub items: Vec<PackageSpecItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PackageBodyItem {
    Declare(DeclareItem),
    Function(CreateFunctionStmt),
    Procedure(CreateProcedureStmt),
}

/// `CREATE PACKAGE BODY name AS body END`
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePackageBodyStmt {
    pub prefix: RoutinePrefix,
    pub name: Ident,
    pub items: Vec<PackageBodyItem>,
}
