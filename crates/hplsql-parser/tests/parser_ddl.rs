//! CREATE/ALTER/DROP statements and per-dialect table options.

mod common;

use common::{parse, parse_stmt};
use hplsql_parser::ast::{
    CreateTableStmt, DeclareItem, DropTarget, Statement, TableBody, TableElement, TableKind,
    TableOption,
};
use hplsql_parser::Dialect;

fn create_table(sql: &str) -> CreateTableStmt {
    match parse_stmt(sql) {
        Statement::CreateTable(stmt) => *stmt,
        other => panic!("expected CREATE TABLE, got {other:?}"),
    }
}

fn option_dialects(stmt: &CreateTableStmt) -> Vec<Dialect> {
    stmt.options.iter().map(TableOption::dialect).collect()
}

#[test]
fn test_oracle_table() {
    let stmt = create_table(
        "CREATE TABLE emp (
           id NUMBER(10) NOT NULL,
           name VARCHAR2(100 CHAR),
           CONSTRAINT emp_pk PRIMARY KEY (id)
         )
         SEGMENT CREATION DEFERRED PCTFREE 10 PCTUSED 40 INITRANS 1 MAXTRANS 255
         NOCOMPRESS LOGGING
         STORAGE (INITIAL 65536 NEXT 1048576 MINEXTENTS 1 MAXEXTENTS 2147483645)
         TABLESPACE users",
    );
    assert!(matches!(&stmt.body, TableBody::Columns(cols) if cols.len() == 3));
    assert_eq!(stmt.options.len(), 9);
    assert!(option_dialects(&stmt).iter().all(|d| *d == Dialect::Oracle));
}

#[test]
fn test_db2_table() {
    let stmt = create_table(
        "CREATE TABLE t (a INT) IN ts_data INDEX IN ts_idx WITH REPLACE NOT LOGGED COMPRESS YES DEFINITION ONLY",
    );
    assert_eq!(stmt.options.len(), 6);
    assert!(option_dialects(&stmt).iter().all(|d| *d == Dialect::Db2));
}

#[test]
fn test_hive_table() {
    let stmt = create_table(
        "CREATE TABLE IF NOT EXISTS logs (ts STRING, msg STRING)
         ROW FORMAT DELIMITED
           FIELDS TERMINATED BY '\\t' ESCAPED BY '\\\\'
           COLLECTION ITEMS TERMINATED BY ','
           MAP KEYS TERMINATED BY ':'
           LINES TERMINATED BY '\\n'
           NULL DEFINED AS ''
         STORED AS ORC",
    );
    assert!(stmt.if_not_exists);
    assert_eq!(option_dialects(&stmt), vec![Dialect::Hive, Dialect::Hive]);
}

#[test]
fn test_mysql_table() {
    let stmt = create_table(
        "CREATE TABLE t (id INT AUTO_INCREMENT PRIMARY KEY)
         ENGINE=InnoDB AUTO_INCREMENT=10 DEFAULT CHARSET=utf8 COMMENT='rows'",
    );
    assert_eq!(option_dialects(&stmt), vec![Dialect::MySql; 4]);
}

#[test]
fn test_mssql_table() {
    let stmt = create_table("CREATE TABLE dbo.t (id INT IDENTITY(1,1) NOT NULL) ON [PRIMARY] TEXTIMAGE_ON [PRIMARY]");
    assert_eq!(stmt.name.parts, vec![String::from("dbo"), String::from("t")]);
    assert_eq!(option_dialects(&stmt), vec![Dialect::MsSql, Dialect::MsSql]);
}

#[test]
fn test_teradata_volatile_table() {
    let stmt = create_table(
        "CREATE SET VOLATILE TABLE vt, NO LOG (a INT, b INT) PRIMARY INDEX (a) ON COMMIT PRESERVE ROWS",
    );
    assert!(matches!(stmt.kind, TableKind::Volatile { set: Some(_) }));
    assert_eq!(stmt.pre_options.len(), 1);
    assert_eq!(
        option_dialects(&stmt),
        vec![Dialect::Teradata, Dialect::Generic]
    );
}

#[test]
fn test_mixed_dialect_options_in_any_order() {
    let stmt = create_table("CREATE TABLE t (a INT) STORED AS PARQUET TABLESPACE ts ENGINE = x STORED AS ORC");
    assert_eq!(
        option_dialects(&stmt),
        vec![Dialect::Hive, Dialect::Oracle, Dialect::MySql, Dialect::Hive]
    );
}

#[test]
fn test_table_bodies() {
    assert!(matches!(
        create_table("CREATE TABLE t2 AS SELECT * FROM t1").body,
        TableBody::AsSelect(_)
    ));
    assert!(matches!(
        create_table("CREATE TABLE t2 LIKE t1").body,
        TableBody::Like(_)
    ));
    assert_eq!(
        create_table("CREATE LOCAL TEMPORARY TABLE tmp (a INT)").kind,
        TableKind::LocalTemporary
    );
}

#[test]
fn test_foreign_keys() {
    let stmt = create_table(
        "CREATE TABLE c (
           pid INT,
           CONSTRAINT fk FOREIGN KEY (pid) REFERENCES p (id) ON DELETE SET NULL ON UPDATE NO ACTION
         )",
    );
    let TableBody::Columns(elements) = &stmt.body else {
        panic!("expected columns");
    };
    assert!(matches!(elements[1], TableElement::Constraint(_)));
}

#[test]
fn test_declared_temporary_table() {
    let Statement::Declare(items) =
        parse_stmt("DECLARE GLOBAL TEMPORARY TABLE session.tmp (id INT) WITH REPLACE ON COMMIT PRESERVE ROWS")
    else {
        panic!("expected DECLARE");
    };
    assert!(matches!(
        &items[0],
        DeclareItem::TemporaryTable { global: true, options, .. } if options.len() == 2
    ));
}

#[test]
fn test_drop_truncate_index_database() {
    let program = parse(
        "DROP TABLE IF EXISTS t;
         DROP PROCEDURE p;
         DROP DATABASE db;
         TRUNCATE TABLE t;
         CREATE INDEX ix ON t (a, b DESC);
         CREATE SCHEMA s;",
    );
    let statements = &program.block.statements;
    assert_eq!(statements.len(), 6);
    assert!(matches!(statements[1], Statement::Drop(ref d) if matches!(d.target, DropTarget::Procedure(_))));
    assert!(matches!(statements[2], Statement::Drop(ref d) if matches!(d.target, DropTarget::Database(_))));
    assert!(matches!(statements[3], Statement::Truncate(_)));
    assert!(matches!(statements[4], Statement::CreateIndex(ref i) if i.columns.len() == 2));
    assert!(matches!(statements[5], Statement::CreateDatabase(ref d) if d.schema));
}
