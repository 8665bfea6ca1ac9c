//! Statement, block and program AST types.

use super::ddl::{
    AlterTableStmt, CreateDatabaseStmt, CreateFunctionStmt, CreateIndexStmt,
    CreatePackageBodyStmt, CreatePackageStmt, CreateProcedureStmt, CreateTableStmt,
    CreateTableTypeStmt, DropStmt, TableBody, TableOption,
};
use super::expression::{BoolExpr, Expr, FuncArg, Ident};
use super::query::{
    Assignment, DeleteStmt, InsertDirectoryStmt, InsertStmt, MergeStmt, SelectStmt,
    UpdateStmt, ValuesIntoStmt,
};
use super::types::{DataType, DefaultValue, TypeAttr};

/// The root of a parse: every top-level statement in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub block: Block,
}

/// A sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    /// Creates a block from statements.
    #[must_use]
    pub const fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Returns the number of statements in the block.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if the block has no statements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// `[DECLARE ...] BEGIN ... [EXCEPTION ...] END`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BeginEndBlock {
    pub declarations: Vec<DeclareItem>,
    pub body: Block,
    pub handlers: Vec<ExceptionHandler>,
}

/// `WHEN name THEN block` inside an EXCEPTION section.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionHandler {
    pub condition: Ident,
    pub body: Block,
}

/// Where a cursor declared `WITH RETURN` sends its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnTarget {
    Caller,
    Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorReturn {
    WithReturn {
        only: bool,
        to: Option<ReturnTarget>,
    },
    WithoutReturn,
}

/// The query a cursor iterates: a SELECT or a dynamic SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CursorQuery {
    Select(Box<SelectStmt>),
    Expr(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Continue,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerCondition {
    SqlException,
    SqlWarning,
    NotFound,
    Named(Ident),
}

/// One item of a DECLARE statement or declare section.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclareItem {
    Variable {
        names: Vec<Ident>,
        constant: bool,
        data_type: DataType,
        attrs: Vec<TypeAttr>,
        default: Option<DefaultValue>,
    },
    Condition(Ident),
    Cursor {
        name: Ident,
        returns: Option<CursorReturn>,
        query: CursorQuery,
    },
    Handler {
        kind: HandlerKind,
        condition: HandlerCondition,
        body: Box<Statement>,
    },
    TemporaryTable {
        global: bool,
        name: Ident,
        pre_options: Vec<TableOption>,
        body: TableBody,
        options: Vec<TableOption>,
    },
}

/// Which IF syntax was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfForm {
    /// `IF c THEN ... [ELSIF ...] [ELSE ...] END IF`
    PlSql,
    /// `IF c stmt [ELSE stmt]`
    TSql,
    /// `.IF c THEN stmt`
    Bteq,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    pub condition: BoolExpr,
    pub body: Block,
}

/// All three IF forms share this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub form: IfForm,
    pub condition: BoolExpr,
    pub then_branch: Block,
    pub elseifs: Vec<ElseIf>,
    pub else_branch: Option<Block>,
}

/// `WHILE cond DO|LOOP|THEN|BEGIN block END [WHILE|LOOP]`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: BoolExpr,
    pub body: Block,
}

/// `FOR rec IN (select) LOOP block END LOOP`
#[derive(Debug, Clone, PartialEq)]
pub struct ForCursorStmt {
    pub record: Ident,
    pub query: Box<SelectStmt>,
    pub body: Block,
}

/// `FOR i IN [REVERSE] a..b [BY|STEP n] LOOP block END LOOP`
#[derive(Debug, Clone, PartialEq)]
pub struct ForRangeStmt {
    pub index: Ident,
    pub reverse: bool,
    pub low: Expr,
    pub high: Expr,
    pub step: Option<Expr>,
    pub body: Block,
}

/// Session options set with `SET`.
#[derive(Debug, Clone, PartialEq)]
pub enum SetOption {
    CurrentSchema(Expr),
    /// SQL Server flag `ON|OFF`.
    MsSql { option: MsSqlSessionOption, on: bool },
    /// Teradata `QUERY_BAND = value|NONE [UPDATE] FOR TRANSACTION|SESSION`.
    QueryBand {
        value: Option<Expr>,
        update: bool,
        session: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsSqlSessionOption {
    AnsiNulls,
    AnsiPadding,
    NoCount,
    QuotedIdentifier,
    XactAbort,
}

/// `FETCH [FROM] c [BULK COLLECT] INTO v, ... [LIMIT n]`
#[derive(Debug, Clone, PartialEq)]
pub struct FetchStmt {
    pub cursor: Ident,
    pub bulk_collect: bool,
    pub into: Vec<Ident>,
    pub limit: Option<Expr>,
}

/// `EXEC|EXECUTE [IMMEDIATE] target [args] [INTO ...] [USING ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct ExecStmt {
    pub immediate: bool,
    pub target: Expr,
    pub args: Vec<FuncArg>,
    pub into: Vec<Ident>,
    pub using: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticsItem {
    /// `EXCEPTION n target = MESSAGE_TEXT`
    MessageText { condition: i64 },
    /// `target = ROW_COUNT`
    RowCount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDiagnosticsStmt {
    pub target: Ident,
    pub item: DiagnosticsItem,
}

/// A table or query operand of CMP and SUMMARY.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Table {
        name: Ident,
        where_clause: Option<BoolExpr>,
    },
    Query(Box<SelectStmt>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpKind {
    RowCount,
    Sum,
}

/// One side of a CMP statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CmpSource {
    pub source: DataSource,
    pub at: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CopyOption {
    At(Ident),
    BatchSize(Expr),
    Delimiter(Expr),
    SqlInsert(Ident),
}

/// `COPY table|(select) TO [HDFS] target options`
#[derive(Debug, Clone, PartialEq)]
pub struct CopyStmt {
    pub source: DataSource,
    pub hdfs: bool,
    pub target: Expr,
    pub options: Vec<CopyOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyFileOption {
    Delete,
    Ignore,
    Overwrite,
}

/// `COPY FROM LOCAL source, ... TO target options`
#[derive(Debug, Clone, PartialEq)]
pub struct CopyFromLocalStmt {
    pub sources: Vec<Expr>,
    pub target: Expr,
    pub options: Vec<CopyFileOption>,
}

/// A command-line style item of the HIVE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum HiveItem {
    /// `-e 'sql'` or `-f file`
    Option { name: String, value: Expr },
    /// `-hiveconf key=value`
    Conf { key: Ident, value: Expr },
    /// A bare `-flag`.
    Flag(String),
}

/// `MAP OBJECT name [TO target] [AT connection]`
#[derive(Debug, Clone, PartialEq)]
pub struct MapObjectStmt {
    pub source: Expr,
    pub target: Option<Expr>,
    pub at: Option<Expr>,
}

/// A parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    // Blocks and declarations
    Block(BeginEndBlock),
    Declare(Vec<DeclareItem>),

    // Assignment and session
    Assignment { set: bool, items: Vec<Assignment> },
    SetOption(SetOption),

    // Cursors
    /// `ALLOCATE c CURSOR FOR RESULT SET|PROCEDURE loc`
    AllocateCursor { cursor: Ident, source: Ident },
    /// `ASSOCIATE [RESULT SET] LOCATOR(S) (l, ...) WITH PROCEDURE p`
    AssociateLocator { locators: Vec<Ident>, procedure: Ident },
    Open { cursor: Ident, query: Option<CursorQuery> },
    Fetch(FetchStmt),
    Close(Ident),

    // Transactions
    BeginTransaction,
    EndTransaction,
    Commit { work: bool },
    Rollback { work: bool },

    // Control
    Break,
    Leave(Option<Ident>),
    Exit {
        label: Option<Ident>,
        condition: Option<BoolExpr>,
    },
    Return(Option<Expr>),
    Null,
    Label(String),
    Empty,

    // Routine calls
    Call { name: Ident, args: Vec<FuncArg> },
    Exec(Box<ExecStmt>),

    // Diagnostics
    GetDiagnostics(GetDiagnosticsStmt),
    Signal(Ident),
    Resignal {
        sqlstate: Option<Expr>,
        message: Option<Expr>,
    },
    Raise(Option<Ident>),

    // DDL
    CreateTable(Box<CreateTableStmt>),
    CreateTableType(CreateTableTypeStmt),
    AlterTable(AlterTableStmt),
    CreateDatabase(CreateDatabaseStmt),
    CreateIndex(CreateIndexStmt),
    CreateFunction(Box<CreateFunctionStmt>),
    CreateProcedure(Box<CreateProcedureStmt>),
    CreatePackage(CreatePackageStmt),
    CreatePackageBody(CreatePackageBodyStmt),
    Drop(DropStmt),
    Truncate(Ident),

    // DML
    Select(Box<SelectStmt>),
    Insert(Box<InsertStmt>),
    InsertDirectory(Box<InsertDirectoryStmt>),
    Update(Box<UpdateStmt>),
    Delete(DeleteStmt),
    Merge(Box<MergeStmt>),
    ValuesInto(ValuesIntoStmt),

    // Utility
    Describe(Ident),
    Use(Expr),
    Print(Expr),
    /// `[.]QUIT [expr]`
    Quit { dot: bool, code: Option<Expr> },
    Include(Expr),
    /// `GRANT EXECUTE ON PROCEDURE p, ... TO [ROLE] grantee`
    Grant { procedures: Vec<Ident>, role: bool, grantee: Ident },
    MapObject(MapObjectStmt),
    /// `COLLECT STATISTICS ON t [COLUMN (cols)]`
    CollectStats { table: Ident, columns: Vec<Ident> },
    Cmp {
        kind: CmpKind,
        left: CmpSource,
        right: CmpSource,
    },
    Copy(Box<CopyStmt>),
    CopyFromLocal(CopyFromLocalStmt),
    /// `SUMMARY [TOP n] ON source [LIMIT n]`
    Summary {
        top: Option<Expr>,
        source: DataSource,
        limit: Option<Expr>,
    },
    Hive(Vec<HiveItem>),
    /// `HOST expr`
    Host(Expr),
    /// `! command`, kept as the texts of its tokens.
    HostCommand(Vec<String>),
    Expr(Expr),

    // Control flow
    If(Box<IfStmt>),
    While(WhileStmt),
    ForCursor(ForCursorStmt),
    ForRange(Box<ForRangeStmt>),
    Loop(Block),
}

impl Statement {
    /// Returns a short name for the statement kind, used in logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Block(_) => "block",
            Self::Declare(_) => "declare",
            Self::Assignment { .. } => "assignment",
            Self::SetOption(_) => "set_option",
            Self::AllocateCursor { .. } => "allocate_cursor",
            Self::AssociateLocator { .. } => "associate_locator",
            Self::Open { .. } => "open",
            Self::Fetch(_) => "fetch",
            Self::Close(_) => "close",
            Self::BeginTransaction => "begin_transaction",
            Self::EndTransaction => "end_transaction",
            Self::Commit { .. } => "commit",
            Self::Rollback { .. } => "rollback",
            Self::Break => "break",
            Self::Leave(_) => "leave",
            Self::Exit { .. } => "exit",
            Self::Return(_) => "return",
            Self::Null => "null",
            Self::Label(_) => "label",
            Self::Empty => "empty",
            Self::Call { .. } => "call",
            Self::Exec(_) => "exec",
            Self::GetDiagnostics(_) => "get_diagnostics",
            Self::Signal(_) => "signal",
            Self::Resignal { .. } => "resignal",
            Self::Raise(_) => "raise",
            Self::CreateTable(_) => "create_table",
            Self::CreateTableType(_) => "create_table_type",
            Self::AlterTable(_) => "alter_table",
            Self::CreateDatabase(_) => "create_database",
            Self::CreateIndex(_) => "create_index",
            Self::CreateFunction(_) => "create_function",
            Self::CreateProcedure(_) => "create_procedure",
            Self::CreatePackage(_) => "create_package",
            Self::CreatePackageBody(_) => "create_package_body",
            Self::Drop(_) => "drop",
            Self::Truncate(_) => "truncate",
            Self::Select(_) => "select",
            Self::Insert(_) => "insert",
            Self::InsertDirectory(_) => "insert_directory",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::Merge(_) => "merge",
            Self::ValuesInto(_) => "values_into",
            Self::Describe(_) => "describe",
            Self::Use(_) => "use",
            Self::Print(_) => "print",
            Self::Quit { .. } => "quit",
            Self::Include(_) => "include",
            Self::Grant { .. } => "grant",
            Self::MapObject(_) => "map_object",
            Self::CollectStats { .. } => "collect_stats",
            Self::Cmp { .. } => "cmp",
            Self::Copy(_) => "copy",
            Self::CopyFromLocal(_) => "copy_from_local",
            Self::Summary { .. } => "summary",
            Self::Hive(_) => "hive",
            Self::Host(_) => "host",
            Self::HostCommand(_) => "host_command",
            Self::Expr(_) => "expr",
            Self::If(_) => "if",
            Self::While(_) => "while",
            Self::ForCursor(_) => "for_cursor",
            Self::ForRange(_) => "for_range",
            Self::Loop(_) => "loop",
        }
    }
}
