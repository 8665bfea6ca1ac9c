//! Procedures, functions and packages, plus calls into them.

mod common;

use common::{parse, parse_stmt};
use hplsql_parser::ast::{
    CreateProcedureStmt, PackageBodyItem, ParamMode, RoutineBody, RoutinePrefix, Statement,
};

fn procedure(sql: &str) -> CreateProcedureStmt {
    match parse_stmt(sql) {
        Statement::CreateProcedure(proc) => *proc,
        other => panic!("expected procedure, got {other:?}"),
    }
}

#[test]
fn test_db2_style_procedure() {
    let proc = procedure(
        "CREATE PROCEDURE sales.report (IN p_year INT, OUT p_total DECIMAL(18,2))
           LANGUAGE SQL
           DYNAMIC RESULT SETS 1
         BEGIN
           DECLARE c1 CURSOR WITH RETURN FOR SELECT * FROM sales WHERE yr = p_year;
           SELECT SUM(amount) INTO p_total FROM sales WHERE yr = p_year;
           OPEN c1;
         END",
    );
    assert_eq!(proc.name.parts.len(), 2);
    assert_eq!(proc.params[1].mode, Some(ParamMode::Out));
    assert_eq!(proc.options.len(), 2);
    let RoutineBody::Block(block) = &proc.body else {
        panic!("expected BEGIN block");
    };
    assert_eq!(block.body.len(), 3);
}

#[test]
fn test_oracle_style_procedure() {
    let proc = procedure(
        "CREATE OR REPLACE PROCEDURE log_it (msg IN VARCHAR2, lvl IN OUT NUMBER := 1) IS
           ts TIMESTAMP;
         BEGIN
           ts := SYSDATE;
           INSERT INTO log_table VALUES (ts, msg, lvl);
         EXCEPTION
           WHEN OTHERS THEN NULL;
         END log_it;",
    );
    assert_eq!(proc.prefix, RoutinePrefix::Create { or_replace: true });
    assert_eq!(proc.params[0].mode, Some(ParamMode::In));
    assert_eq!(proc.params[1].mode, Some(ParamMode::InOut));
    assert!(proc.params[1].default.is_some());
    assert_eq!(proc.declarations.len(), 1);
    assert!(matches!(&proc.body, RoutineBody::Block(b) if b.handlers.len() == 1));
}

#[test]
fn test_tsql_style_procedure() {
    let program = parse(
        "CREATE PROCEDURE usp_get @id INT, @name VARCHAR(50) = NULL
         AS
           SELECT * FROM users WHERE id = @id;
           PRINT @name;
         GO
         EXEC usp_get 1, 'bob'",
    );
    assert_eq!(program.block.len(), 2);
    let Statement::CreateProcedure(proc) = &program.block.statements[0] else {
        panic!("expected procedure");
    };
    assert_eq!(proc.params.len(), 2);
    assert!(matches!(&proc.body, RoutineBody::Statements(b) if b.len() == 2));
    assert!(matches!(program.block.statements[1], Statement::Exec(_)));
}

#[test]
fn test_function_and_call() {
    let program = parse(
        "CREATE FUNCTION add_one (x INT) RETURNS INT
         BEGIN
           RETURN x + 1;
         END;
         CALL add_one(41);",
    );
    assert!(matches!(
        &program.block.statements[0],
        Statement::CreateFunction(f) if f.params.len() == 1
    ));
    assert!(matches!(
        &program.block.statements[1],
        Statement::Call { args, .. } if args.len() == 1
    ));
}

#[test]
fn test_package_body_members() {
    let Statement::CreatePackageBody(pkg) = parse_stmt(
        "CREATE OR REPLACE PACKAGE BODY counters AS
           total INT := 0;
           PROCEDURE bump (n INT) IS
           BEGIN
             total := total + n;
           END;
           FUNCTION current_total RETURN INT IS
           BEGIN
             RETURN total;
           END;
         END counters;",
    ) else {
        panic!("expected package body");
    };
    assert_eq!(pkg.items.len(), 3);
    assert!(matches!(pkg.items[1], PackageBodyItem::Procedure(ref p) if p.prefix == RoutinePrefix::None));
    assert!(matches!(pkg.items[2], PackageBodyItem::Function(_)));
}
