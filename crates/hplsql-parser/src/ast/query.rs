//! Query and data-manipulation AST types.

use super::expression::{BoolExpr, Expr, Ident, SetQuantifier};

/// A complete SELECT statement: optional CTEs plus a full select.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub ctes: Vec<Cte>,
    pub body: FullSelect,
}

/// `name [(cols)] AS ( query )` in a WITH clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    pub name: Ident,
    pub columns: Vec<Ident>,
    pub query: FullSelect,
}

/// Subselects combined with set operators.
#[derive(Debug, Clone, PartialEq)]
pub struct FullSelect {
    pub first: FullSelectItem,
    pub rest: Vec<SetOperation>,
}

/// An operand of a set operation.
#[derive(Debug, Clone, PartialEq)]
pub enum FullSelectItem {
    Select(Box<SubSelect>),
    Nested(Box<FullSelect>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    Except,
    Intersect,
}

/// `UNION [ALL] item`
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    pub op: SetOperator,
    pub all: bool,
    pub item: FullSelectItem,
}

/// A single `SELECT ... FROM ... WHERE ...` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubSelect {
    pub quantifier: Option<SetQuantifier>,
    /// `TOP n`
    pub top: Option<Expr>,
    pub items: Vec<SelectItem>,
    /// `INTO var, ...`
    pub into: Vec<Ident>,
    pub from: Option<FromClause>,
    pub where_clause: Option<BoolExpr>,
    pub group_by: Vec<Expr>,
    pub having: Option<BoolExpr>,
    pub qualify: Option<BoolExpr>,
    pub order_by: Vec<OrderItem>,
    pub options: Vec<SelectOption>,
}

/// A select-list entry.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Expr {
        /// T-SQL `@var = expr`
        target: Option<Ident>,
        expr: Expr,
        alias: Option<SelectAlias>,
    },
    /// `*` or `t.*`
    Wildcard { qualifier: Option<Ident> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectAlias {
    Name(Ident),
    /// Teradata `(TITLE 'text')`
    Title(String),
}

/// `FROM source [join ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub source: TableSource,
    pub joins: Vec<Join>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `, source`
    Comma,
    Inner,
    Left,
    Right,
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub source: TableSource,
    pub on: Option<BoolExpr>,
}

/// A table reference in FROM.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    Table {
        name: Ident,
        alias: Option<TableAlias>,
    },
    Subquery {
        query: Box<SelectStmt>,
        alias: Option<TableAlias>,
    },
    /// `TABLE (VALUES (..), ..) AS alias (cols)`
    Values {
        rows: Vec<Vec<Expr>>,
        alias: TableAlias,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAlias {
    pub name: Ident,
    pub columns: Vec<Ident>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// An ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub expr: Expr,
    pub direction: Option<SortDirection>,
}

/// DB2 isolation clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    Rr,
    Rs,
    Cs,
    Ur,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Exclusive,
    Update,
    Share,
}

/// Trailing select options.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOption {
    Limit(Expr),
    /// `WITH RR|RS|CS|UR [USE AND KEEP mode LOCKS]`
    Isolation {
        level: IsolationLevel,
        lock: Option<LockMode>,
    },
}

/// One item of an assignment list.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// `x := expr`
    Single { target: Ident, value: Expr },
    /// `(a, b) = (e1, e2)`
    Multiple { targets: Vec<Ident>, values: Vec<Expr> },
    /// `(a, b) = (SELECT ...)`
    Select {
        targets: Vec<Ident>,
        query: Box<SelectStmt>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    Into,
    IntoTable,
    OverwriteTable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    Select(Box<SelectStmt>),
    Values(Vec<Vec<Expr>>),
}

/// `INSERT INTO t [(cols)] VALUES ... | select`
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStmt {
    pub mode: InsertMode,
    pub table: Ident,
    pub columns: Vec<Ident>,
    pub source: InsertSource,
}

/// What `INSERT OVERWRITE DIRECTORY` writes out.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectorySource {
    Select(Box<SelectStmt>),
    Expr(Expr),
}

/// `INSERT OVERWRITE [LOCAL] DIRECTORY path query`
#[derive(Debug, Clone, PartialEq)]
pub struct InsertDirectoryStmt {
    pub local: bool,
    pub path: Expr,
    pub source: DirectorySource,
}

/// A table or subquery used as an UPDATE or MERGE target.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSource {
    Table(Ident),
    Subquery(Box<SelectStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetTable {
    pub source: TargetSource,
    pub alias: Option<Ident>,
}

/// `UPDATE target [FROM ...] SET ... [WHERE ...] [ELSE insert]`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStmt {
    pub target: TargetTable,
    pub from: Option<FromClause>,
    pub assignments: Vec<Assignment>,
    pub where_clause: Option<BoolExpr>,
    /// Teradata upsert: `ELSE INSERT ...`
    pub upsert: Option<Box<InsertStmt>>,
}

/// `DELETE [FROM] t [alias] [WHERE ... | ALL]`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStmt {
    pub table: Ident,
    pub alias: Option<Ident>,
    pub where_clause: Option<BoolExpr>,
    pub all: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MergeAction {
    Insert { columns: Vec<Ident>, values: Vec<Expr> },
    Update {
        assignments: Vec<Assignment>,
        where_clause: Option<BoolExpr>,
    },
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MergeClause {
    /// `WHEN [NOT] MATCHED [AND cond] THEN action`
    When {
        matched: bool,
        condition: Option<BoolExpr>,
        action: MergeAction,
    },
    /// `ELSE IGNORE`
    ElseIgnore,
}

/// `MERGE INTO target USING source ON cond clauses`
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStmt {
    pub target: TargetTable,
    pub source: TargetTable,
    pub on: BoolExpr,
    pub clauses: Vec<MergeClause>,
}

/// `VALUES (e, ...) INTO (v, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesIntoStmt {
    pub values: Vec<Expr>,
    pub targets: Vec<Ident>,
}
