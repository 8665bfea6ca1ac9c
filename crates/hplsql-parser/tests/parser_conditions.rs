//! Boolean expressions in statement conditions.

mod common;

use common::parse_stmt;
use hplsql_parser::ast::{BoolExpr, CompareOp, Expr, InList, LogicalOp, Statement};
use hplsql_parser::ParserConfig;

fn condition_of(stmt: Statement) -> BoolExpr {
    match stmt {
        Statement::If(stmt) => stmt.condition,
        Statement::While(stmt) => stmt.condition,
        other => panic!("expected IF or WHILE, got {other:?}"),
    }
}

fn cond(text: &str) -> BoolExpr {
    condition_of(parse_stmt(&format!("IF {text} THEN PRINT 1; END IF")))
}

#[test]
fn test_in_with_value_list() {
    assert!(matches!(
        cond("x IN (1,2,3)"),
        BoolExpr::In { list: InList::Values(ref values), negated: false, .. } if values.len() == 3
    ));
}

#[test]
fn test_in_with_subquery() {
    assert!(matches!(
        cond("x IN (SELECT y FROM t)"),
        BoolExpr::In { list: InList::Subquery(_), .. }
    ));
}

#[test]
fn test_multi_value_in() {
    assert!(matches!(
        cond("(a,b) IN (SELECT c, d FROM t)"),
        BoolExpr::MultiIn { ref exprs, negated: false, .. } if exprs.len() == 2
    ));
}

#[test]
fn test_and_or_are_left_associative_at_one_level() {
    let BoolExpr::Logical { left, op, right } = cond("a = 1 OR b = 2 AND c = 3") else {
        panic!("expected logical chain");
    };
    assert_eq!(op, LogicalOp::And);
    assert!(matches!(*left, BoolExpr::Logical { op: LogicalOp::Or, .. }));
    assert!(matches!(*right, BoolExpr::Compare { op: CompareOp::Eq, .. }));
}

#[test]
fn test_and_binds_tighter_when_configured() {
    let config = ParserConfig::new().with_and_binds_tighter(true);
    let program =
        hplsql_parser::parse_with_config("WHILE a = 1 OR b = 2 AND c = 3 DO PRINT 1; END WHILE", &config)
            .unwrap();
    let Statement::While(stmt) = &program.block.statements[0] else {
        panic!("expected WHILE");
    };
    assert!(matches!(
        &stmt.condition,
        BoolExpr::Logical { op: LogicalOp::Or, right, .. }
            if matches!(**right, BoolExpr::Logical { op: LogicalOp::And, .. })
    ));
}

#[test]
fn test_parenthesized_condition_versus_expression() {
    assert!(matches!(cond("(a = 1 OR b = 2)"), BoolExpr::Group { negated: false, .. }));
    assert!(matches!(
        cond("(a + 1) * 2 >= 4"),
        BoolExpr::Compare { op: CompareOp::GtEq, left: Expr::Binary { .. }, .. }
    ));
}

#[test]
fn test_between_inside_chain() {
    let BoolExpr::Logical { left, op, .. } = cond("x BETWEEN 1 AND 5 AND y IS NULL") else {
        panic!("expected logical chain");
    };
    assert_eq!(op, LogicalOp::And);
    assert!(matches!(*left, BoolExpr::Between { .. }));
}

#[test]
fn test_exists_and_like() {
    assert!(matches!(
        cond("NOT EXISTS (SELECT 1 FROM t)"),
        BoolExpr::Exists { negated: true, .. }
    ));
    assert!(matches!(
        cond("name LIKE 'a%'"),
        BoolExpr::Compare { op: CompareOp::Like, .. }
    ));
}
