//! Parse tree types for HPL/SQL programs.
//!
//! Nodes own their children and are built bottom-up by the parser. They
//! carry no source positions, so two trees parsed from differently spaced
//! input compare equal.

mod ddl;
mod expression;
mod query;
mod statement;
mod types;

pub use ddl::{
    AlterTableStmt, ColumnConstraint, ColumnDef, CreateDatabaseStmt, CreateFunctionStmt,
    CreateIndexStmt, CreatePackageBodyStmt, CreatePackageStmt, CreateProcedureStmt,
    CreateTableStmt, CreateTableTypeStmt, DatabaseOption, Db2TableOption, DropStmt, DropTarget,
    FkAction, FkEvent, HiveTableOption, IndexColumn, MsSqlTableOption, MySqlTableOption,
    OracleTableOption, PackageBodyItem, PackageSpecItem, ParamMode, ReferentialAction,
    RoutineBody, RoutineOption, RoutineParam, RoutinePrefix, RowFormatField, SecurityMode,
    TableBody, TableConstraint, TableConstraintKind, TableElement, TableKind, TableOption,
    TeradataTableOption, VolatileSet,
};
pub use expression::{
    AggregateCall, AggregateFunc, BinaryOp, BoolExpr, CaseExpr, CompareOp, CursorAttr, Expr,
    FuncArg, FunctionCall, Ident, InList, IntervalUnit, Literal, LogicalOp, PartitionFilter,
    PartitionFunc, SearchedWhen, SetQuantifier, SimpleWhen, SpecialFunc, UnaryOp, WindowSpec,
};
pub use query::{
    Assignment, Cte, DeleteStmt, DirectorySource, FromClause, FullSelect, FullSelectItem,
    InsertDirectoryStmt, InsertMode, InsertSource, InsertStmt, IsolationLevel, Join, JoinKind,
    LockMode, MergeAction, MergeClause, MergeStmt, OrderItem, SelectAlias, SelectItem,
    SelectOption, SelectStmt, SetOperation, SetOperator, SortDirection, SubSelect, TableAlias,
    TableSource, TargetSource, TargetTable, UpdateStmt, ValuesIntoStmt,
};
pub use statement::{
    BeginEndBlock, Block, CmpKind, CmpSource, CopyFileOption, CopyFromLocalStmt, CopyOption,
    CopyStmt, CursorQuery, CursorReturn, DataSource, DeclareItem, DiagnosticsItem, ElseIf,
    ExceptionHandler, ExecStmt, FetchStmt, ForCursorStmt, ForRangeStmt, GetDiagnosticsStmt,
    HandlerCondition, HandlerKind, HiveItem, IfForm, IfStmt, MapObjectStmt, MsSqlSessionOption,
    Program, ReturnTarget, SetOption, Statement, WhileStmt,
};
pub use types::{
    DataType, DefaultValue, LengthUnit, LengthValue, TypeAnchor, TypeAttr, TypeLength, TypeName,
};
