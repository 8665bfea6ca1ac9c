//! Arithmetic, concatenation and identifier/keyword overlap, parsed
//! through whole statements.

mod common;

use common::parse_stmt;
use hplsql_parser::ast::{
    AggregateFunc, BinaryOp, Expr, FullSelectItem, Literal, SelectItem, Statement, SubSelect,
    TableSource,
};

fn printed(sql: &str) -> Expr {
    match parse_stmt(sql) {
        Statement::Print(expr) => expr,
        other => panic!("expected PRINT, got {other:?}"),
    }
}

fn subselect(sql: &str) -> SubSelect {
    let Statement::Select(stmt) = parse_stmt(sql) else {
        panic!("expected SELECT");
    };
    match stmt.body.first {
        FullSelectItem::Select(sub) => *sub,
        FullSelectItem::Nested(_) => panic!("expected a plain select"),
    }
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(
        printed("PRINT 2+3*4"),
        Expr::binary(
            Expr::integer(2),
            BinaryOp::Add,
            Expr::binary(Expr::integer(3), BinaryOp::Mul, Expr::integer(4)),
        )
    );
    assert_eq!(
        printed("PRINT 2*3+4"),
        Expr::binary(
            Expr::binary(Expr::integer(2), BinaryOp::Mul, Expr::integer(3)),
            BinaryOp::Add,
            Expr::integer(4),
        )
    );
}

#[test]
fn test_leading_minus() {
    assert_eq!(
        printed("PRINT -2+3"),
        Expr::binary(Expr::negated(Expr::integer(2)), BinaryOp::Add, Expr::integer(3))
    );
}

#[test]
fn test_division_and_subtraction_chain_left() {
    assert_eq!(
        printed("PRINT 12 / 3 / 2"),
        Expr::binary(
            Expr::binary(Expr::integer(12), BinaryOp::Div, Expr::integer(3)),
            BinaryOp::Div,
            Expr::integer(2),
        )
    );
}

#[test]
fn test_concat_chain_is_flat() {
    let Expr::Concat(items) = printed("PRINT 'a'||'b'||'c'") else {
        panic!("expected concat");
    };
    assert_eq!(
        items,
        vec![Expr::string("a"), Expr::string("b"), Expr::string("c")]
    );
}

#[test]
fn test_concat_binds_tighter_than_arithmetic() {
    assert_eq!(
        printed("PRINT 'n=' || n + 1"),
        Expr::binary(
            Expr::Concat(vec![Expr::string("n="), Expr::ident("n")]),
            BinaryOp::Add,
            Expr::integer(1),
        )
    );
}

#[test]
fn test_non_reserved_keyword_as_names() {
    let sub = subselect("SELECT count FROM count");
    assert!(matches!(
        &sub.items[0],
        SelectItem::Expr { expr: Expr::Ident(name), .. } if name.name() == "count"
    ));
    assert!(matches!(
        sub.from.map(|f| f.source),
        Some(TableSource::Table { ref name, .. }) if name.name() == "count"
    ));
}

#[test]
fn test_non_reserved_keyword_as_aggregate() {
    let sub = subselect("SELECT COUNT(DISTINCT id) FROM t");
    assert!(matches!(
        &sub.items[0],
        SelectItem::Expr { expr: Expr::Aggregate(call), .. }
            if call.func == AggregateFunc::Count && call.quantifier.is_some()
    ));
}

#[test]
fn test_qualified_names_and_literals() {
    assert!(matches!(
        printed("PRINT db.tbl.col"),
        Expr::Ident(ref name) if name.parts.len() == 3
    ));
    assert_eq!(printed("PRINT TRUE"), Expr::Literal(Literal::Boolean(true)));
    assert_eq!(printed("PRINT NULL"), Expr::Literal(Literal::Null));
    assert_eq!(
        printed("PRINT 1.50"),
        Expr::Literal(Literal::Decimal(String::from("1.50")))
    );
}

#[test]
fn test_case_and_function_call() {
    assert!(matches!(
        printed("PRINT CASE WHEN x > 0 THEN 'pos' ELSE 'neg' END"),
        Expr::Case(_)
    ));
    assert!(matches!(
        printed("PRINT my_func(a, 0) + 1"),
        Expr::Binary { ref left, .. } if matches!(**left, Expr::Function(_))
    ));
}
