//! Expression AST types: names, literals, arithmetic and boolean expressions.

use core::fmt;

use super::query::{OrderItem, SelectStmt};
use super::types::DataType;

/// A possibly dot-qualified name such as `db.tbl.col`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    /// The name parts, outermost first.
    pub parts: Vec<String>,
}

impl Ident {
    /// Creates a single-part identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parts: vec![name.into()],
        }
    }

    /// Creates an identifier from its parts.
    #[must_use]
    pub const fn from_parts(parts: Vec<String>) -> Self {
        Self { parts }
    }

    /// Returns the last part (the unqualified name).
    #[must_use]
    pub fn name(&self) -> &str {
        self.parts.last().map_or("", String::as_str)
    }

    /// Returns true if the name has more than one part.
    #[must_use]
    pub const fn is_qualified(&self) -> bool {
        self.parts.len() > 1
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Decimal literal, exactly as written.
    Decimal(String),
    /// Single-quoted string literal.
    String(String),
    /// Double-quoted string literal.
    DoubleQuoted(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
    /// `DATE 'yyyy-mm-dd'`.
    Date(String),
    /// `TIMESTAMP 'yyyy-mm-dd hh:mi:ss'`.
    Timestamp(String),
}

/// Arithmetic operators, one precedence level each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Mul,
    Div,
    Add,
    Sub,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
        }
    }
}

/// Units accepted by `INTERVAL` and the postfix interval suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Day,
    Days,
    Microsecond,
    Microseconds,
    Second,
    Seconds,
}

impl IntervalUnit {
    /// Returns the SQL representation of the unit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Days => "DAYS",
            Self::Microsecond => "MICROSECOND",
            Self::Microseconds => "MICROSECONDS",
            Self::Second => "SECOND",
            Self::Seconds => "SECONDS",
        }
    }
}

/// Cursor attributes written as `cursor%ATTR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAttr {
    IsOpen,
    Found,
    NotFound,
}

/// `ALL` or `DISTINCT` inside an aggregate call or a select list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    All,
    Distinct,
}

/// Aggregate and window functions with dedicated grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Avg,
    Count,
    CountBig,
    CumeDist,
    DenseRank,
    FirstValue,
    Lag,
    LastValue,
    Lead,
    Max,
    Min,
    Rank,
    RowNumber,
    Stdev,
    Sum,
    Var,
    Variance,
}

/// `OVER (PARTITION BY ... ORDER BY ...)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowSpec {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderItem>,
}

/// An aggregate or window function call.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateCall {
    pub func: AggregateFunc,
    pub quantifier: Option<SetQuantifier>,
    pub args: Vec<Expr>,
    /// `COUNT(*)`
    pub star: bool,
    pub over: Option<WindowSpec>,
}

/// Hive partition metadata functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionFunc {
    MaxPartString,
    MinPartString,
    MaxPartInt,
    MinPartInt,
    MaxPartDate,
    MinPartDate,
    PartCount,
    PartLoc,
}

/// A `column = value` partition filter.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionFilter {
    pub column: Expr,
    pub value: Expr,
}

/// Built-in functions with their own syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecialFunc {
    ActivityCount,
    Cast {
        expr: Expr,
        data_type: DataType,
    },
    CurrentDate,
    CurrentTimestamp {
        precision: Option<Expr>,
    },
    CurrentUser,
    User,
    Sysdate,
    Trim(Expr),
    /// `SUBSTRING(expr FROM start [FOR length])`
    Substring {
        expr: Expr,
        from: Expr,
        length: Option<Expr>,
    },
    Partition {
        func: PartitionFunc,
        table: Expr,
        /// Result column for the MAX/MIN variants.
        column: Option<Expr>,
        filters: Vec<PartitionFilter>,
        /// Trailing host-name flag of `PART_LOC`.
        host: Option<Expr>,
    },
}

/// A function call argument, optionally named (`name => value`).
#[derive(Debug, Clone, PartialEq)]
pub struct FuncArg {
    pub name: Option<String>,
    pub value: Expr,
}

impl FuncArg {
    /// Creates a positional argument.
    #[must_use]
    pub const fn positional(value: Expr) -> Self {
        Self { name: None, value }
    }
}

/// A generic function call.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name.
    pub name: Ident,
    /// The arguments.
    pub args: Vec<FuncArg>,
}

/// One `WHEN value THEN result` arm of a simple CASE.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleWhen {
    pub value: Expr,
    pub result: Expr,
}

/// One `WHEN condition THEN result` arm of a searched CASE.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchedWhen {
    pub condition: BoolExpr,
    pub result: Expr,
}

/// A CASE expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseExpr {
    /// `CASE operand WHEN value THEN result ... END`
    Simple {
        operand: Expr,
        whens: Vec<SimpleWhen>,
        else_result: Option<Expr>,
    },
    /// `CASE WHEN condition THEN result ... END`
    Searched {
        whens: Vec<SearchedWhen>,
        else_result: Option<Expr>,
    },
}

/// A value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value.
    Literal(Literal),
    /// Column, variable or parameter name.
    Ident(Ident),
    /// Unary operation.
    Unary { op: UnaryOp, operand: Box<Self> },
    /// Binary arithmetic.
    Binary {
        left: Box<Self>,
        op: BinaryOp,
        right: Box<Self>,
    },
    /// `expr DAY`
    IntervalSuffix { expr: Box<Self>, unit: IntervalUnit },
    /// `INTERVAL expr DAYS`
    Interval { expr: Box<Self>, unit: IntervalUnit },
    /// Flat `a || b || c` chain.
    Concat(Vec<Self>),
    /// Parenthesized expression.
    Paren(Box<Self>),
    /// Scalar subquery.
    Subquery(Box<SelectStmt>),
    Case(Box<CaseExpr>),
    CursorAttribute { cursor: Ident, attr: CursorAttr },
    Aggregate(Box<AggregateCall>),
    Special(Box<SpecialFunc>),
    Function(FunctionCall),
}

impl Expr {
    /// Creates an integer literal expression.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a string literal expression.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a single-part identifier expression.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(Ident::new(name))
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a negation.
    #[must_use]
    pub fn negated(operand: Self) -> Self {
        Self::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        }
    }
}

/// AND / OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Comparison operators of a boolean atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// =
    Eq,
    /// ==
    EqEq,
    /// <>
    NotEq,
    /// !=
    BangEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
    Rlike,
    NotRlike,
    Regexp,
    NotRegexp,
}

impl CompareOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::EqEq => "==",
            Self::NotEq => "<>",
            Self::BangEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Rlike => "RLIKE",
            Self::NotRlike => "NOT RLIKE",
            Self::Regexp => "REGEXP",
            Self::NotRegexp => "NOT REGEXP",
        }
    }
}

/// Right-hand side of a single-value IN.
#[derive(Debug, Clone, PartialEq)]
pub enum InList {
    Values(Vec<Expr>),
    Subquery(Box<SelectStmt>),
}

/// A boolean expression (conditions of WHERE, IF, WHILE, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum BoolExpr {
    /// `[NOT] ( bool_expr )`
    Group { negated: bool, inner: Box<Self> },
    /// AND / OR chain link.
    Logical {
        left: Box<Self>,
        op: LogicalOp,
        right: Box<Self>,
    },
    /// `expr IS [NOT] NULL`
    IsNull { expr: Expr, negated: bool },
    /// `expr [NOT] BETWEEN low AND high`
    Between {
        expr: Expr,
        negated: bool,
        low: Expr,
        high: Expr,
    },
    /// `[NOT] EXISTS ( select )`
    Exists {
        negated: bool,
        subquery: Box<SelectStmt>,
    },
    /// `expr [NOT] IN ( list | select )`
    In {
        expr: Expr,
        negated: bool,
        list: InList,
    },
    /// `( a, b ) [NOT] IN ( select )`
    MultiIn {
        exprs: Vec<Expr>,
        negated: bool,
        subquery: Box<SelectStmt>,
    },
    /// `left op right`
    Compare {
        left: Expr,
        op: CompareOp,
        right: Expr,
    },
    /// A bare expression used as a condition.
    Expr(Expr),
}

impl BoolExpr {
    /// Creates an AND/OR node.
    #[must_use]
    pub fn logical(left: Self, op: LogicalOp, right: Self) -> Self {
        Self::Logical {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_display() {
        let ident = Ident::from_parts(vec!["db".into(), "tbl".into(), "col".into()]);
        assert_eq!(ident.to_string(), "db.tbl.col");
        assert_eq!(ident.name(), "col");
        assert!(ident.is_qualified());
        assert!(!Ident::new("x").is_qualified());
    }

    #[test]
    fn test_expr_helpers() {
        let expr = Expr::binary(Expr::negated(Expr::integer(2)), BinaryOp::Add, Expr::integer(3));
        assert!(matches!(
            expr,
            Expr::Binary { op: BinaryOp::Add, ref left, .. }
                if matches!(**left, Expr::Unary { op: UnaryOp::Neg, .. })
        ));
    }

    #[test]
    fn test_operator_text() {
        assert_eq!(BinaryOp::Div.as_str(), "/");
        assert_eq!(CompareOp::NotRlike.as_str(), "NOT RLIKE");
        assert_eq!(IntervalUnit::Microseconds.as_str(), "MICROSECONDS");
    }
}
