//! Operator precedence and keyword classification tables.
//!
//! Arithmetic uses precedence climbing over fixed levels. Each operator has
//! its own level, all left-associative, with `*` binding tightest. The
//! interval suffix (`expr DAY`) sits below every arithmetic operator.

use crate::ast::{AggregateFunc, BinaryOp, CompareOp, IntervalUnit, PartitionFunc};
use crate::lexer::{Keyword, TokenKind};

/// Level of the postfix interval suffix.
pub const INTERVAL_LEVEL: u8 = 1;
/// Level of `-`.
pub const SUB_LEVEL: u8 = 2;
/// Level of `+`.
pub const ADD_LEVEL: u8 = 3;
/// Level of `/`.
pub const DIV_LEVEL: u8 = 4;
/// Level of `*`, the tightest binary level.
pub const MUL_LEVEL: u8 = 5;

/// Returns the operator and its level for an arithmetic token.
#[must_use]
pub const fn binary_op_level(kind: &TokenKind) -> Option<(BinaryOp, u8)> {
    match kind {
        TokenKind::Star => Some((BinaryOp::Mul, MUL_LEVEL)),
        TokenKind::Slash => Some((BinaryOp::Div, DIV_LEVEL)),
        TokenKind::Plus => Some((BinaryOp::Add, ADD_LEVEL)),
        TokenKind::Minus => Some((BinaryOp::Sub, SUB_LEVEL)),
        _ => None,
    }
}

/// Returns the interval unit named by a token.
#[must_use]
pub const fn interval_unit(kind: &TokenKind) -> Option<IntervalUnit> {
    match kind {
        TokenKind::Keyword(Keyword::Day) => Some(IntervalUnit::Day),
        TokenKind::Keyword(Keyword::Days) => Some(IntervalUnit::Days),
        TokenKind::Keyword(Keyword::Microsecond) => Some(IntervalUnit::Microsecond),
        TokenKind::Keyword(Keyword::Microseconds) => Some(IntervalUnit::Microseconds),
        TokenKind::Keyword(Keyword::Second) => Some(IntervalUnit::Second),
        TokenKind::Keyword(Keyword::Seconds) => Some(IntervalUnit::Seconds),
        _ => None,
    }
}

/// Returns the comparison operator for a symbolic comparison token.
#[must_use]
pub const fn compare_op(kind: &TokenKind) -> Option<CompareOp> {
    match kind {
        TokenKind::Eq => Some(CompareOp::Eq),
        TokenKind::EqEq => Some(CompareOp::EqEq),
        TokenKind::NotEq => Some(CompareOp::NotEq),
        TokenKind::BangEq => Some(CompareOp::BangEq),
        TokenKind::Lt => Some(CompareOp::Lt),
        TokenKind::LtEq => Some(CompareOp::LtEq),
        TokenKind::Gt => Some(CompareOp::Gt),
        TokenKind::GtEq => Some(CompareOp::GtEq),
        _ => None,
    }
}

/// Returns the pattern-matching operator for `LIKE`, `RLIKE` or `REGEXP`.
#[must_use]
pub const fn pattern_op(keyword: Keyword, negated: bool) -> Option<CompareOp> {
    match (keyword, negated) {
        (Keyword::Like, false) => Some(CompareOp::Like),
        (Keyword::Like, true) => Some(CompareOp::NotLike),
        (Keyword::Rlike, false) => Some(CompareOp::Rlike),
        (Keyword::Rlike, true) => Some(CompareOp::NotRlike),
        (Keyword::Regexp, false) => Some(CompareOp::Regexp),
        (Keyword::Regexp, true) => Some(CompareOp::NotRegexp),
        _ => None,
    }
}

/// Returns the aggregate function named by a keyword.
#[must_use]
pub const fn aggregate_func(keyword: Keyword) -> Option<AggregateFunc> {
    let func = match keyword {
        Keyword::Avg => AggregateFunc::Avg,
        Keyword::Count => AggregateFunc::Count,
        Keyword::CountBig => AggregateFunc::CountBig,
        Keyword::CumeDist => AggregateFunc::CumeDist,
        Keyword::DenseRank => AggregateFunc::DenseRank,
        Keyword::FirstValue => AggregateFunc::FirstValue,
        Keyword::Lag => AggregateFunc::Lag,
        Keyword::LastValue => AggregateFunc::LastValue,
        Keyword::Lead => AggregateFunc::Lead,
        Keyword::Max => AggregateFunc::Max,
        Keyword::Min => AggregateFunc::Min,
        Keyword::Rank => AggregateFunc::Rank,
        Keyword::RowNumber => AggregateFunc::RowNumber,
        Keyword::Stdev => AggregateFunc::Stdev,
        Keyword::Sum => AggregateFunc::Sum,
        Keyword::Var => AggregateFunc::Var,
        Keyword::Variance => AggregateFunc::Variance,
        _ => return None,
    };
    Some(func)
}

/// Returns the partition metadata function named by a keyword.
#[must_use]
pub const fn partition_func(keyword: Keyword) -> Option<PartitionFunc> {
    let func = match keyword {
        Keyword::MaxPartString => PartitionFunc::MaxPartString,
        Keyword::MinPartString => PartitionFunc::MinPartString,
        Keyword::MaxPartInt => PartitionFunc::MaxPartInt,
        Keyword::MinPartInt => PartitionFunc::MinPartInt,
        Keyword::MaxPartDate => PartitionFunc::MaxPartDate,
        Keyword::MinPartDate => PartitionFunc::MinPartDate,
        Keyword::PartCount => PartitionFunc::PartCount,
        Keyword::PartLoc => PartitionFunc::PartLoc,
        _ => return None,
    };
    Some(func)
}
