//! Queries and data modification statements.

mod common;

use common::{parse, parse_stmt};
use hplsql_parser::ast::{
    FullSelectItem, InsertMode, InsertSource, JoinKind, MergeClause, Statement, SubSelect,
};

fn subselect(stmt: Statement) -> SubSelect {
    let Statement::Select(select) = stmt else {
        panic!("expected SELECT, got {stmt:?}");
    };
    match select.body.first {
        FullSelectItem::Select(sub) => *sub,
        FullSelectItem::Nested(_) => panic!("expected a plain select"),
    }
}

#[test]
fn test_select_with_joins_and_clauses() {
    let sub = subselect(parse_stmt(
        "SELECT o.id, c.name, SUM(o.total) AS total
         FROM orders o
         INNER JOIN customers c ON o.cust_id = c.id
         LEFT JOIN regions r ON r.id = c.region_id
         WHERE o.status IN ('open', 'hold') AND o.total > 0
         GROUP BY o.id, c.name
         HAVING SUM(o.total) > 100
         ORDER BY total DESC",
    ));
    assert_eq!(sub.items.len(), 3);
    let joins: Vec<JoinKind> = sub.from.unwrap().joins.iter().map(|j| j.kind).collect();
    assert_eq!(joins, vec![JoinKind::Inner, JoinKind::Left]);
    assert_eq!(sub.group_by.len(), 2);
    assert!(sub.having.is_some());
    assert_eq!(sub.order_by.len(), 1);
}

#[test]
fn test_select_into_variables() {
    let sub = subselect(parse_stmt("SELECT a, b INTO v_a, v_b FROM t WHERE id = 1"));
    assert_eq!(sub.into.len(), 2);
}

#[test]
fn test_teradata_sel_and_qualify() {
    let sub = subselect(parse_stmt(
        "SEL a FROM t QUALIFY ROW_NUMBER() OVER (PARTITION BY a ORDER BY b) = 1",
    ));
    assert!(sub.qualify.is_some());
}

#[test]
fn test_union_of_nested_selects() {
    let Statement::Select(select) = parse_stmt("(SELECT 1) UNION (SELECT 2)") else {
        panic!("expected SELECT");
    };
    assert!(matches!(select.body.first, FullSelectItem::Nested(_)));
    assert_eq!(select.body.rest.len(), 1);
}

#[test]
fn test_insert_forms() {
    let program = parse(
        "INSERT INTO t (a, b) VALUES (1, 'x');
         INSERT OVERWRITE TABLE t SELECT * FROM s;
         INSERT OVERWRITE LOCAL DIRECTORY '/tmp/out' SELECT * FROM s;",
    );
    let statements = &program.block.statements;
    assert!(matches!(
        &statements[0],
        Statement::Insert(insert)
            if insert.mode == InsertMode::Into && matches!(insert.source, InsertSource::Values(_))
    ));
    assert!(matches!(
        &statements[1],
        Statement::Insert(insert) if insert.mode == InsertMode::OverwriteTable
    ));
    assert!(matches!(&statements[2], Statement::InsertDirectory(dir) if dir.local));
}

#[test]
fn test_update_delete_merge() {
    let program = parse(
        "UPDATE t SET a = a + 1 WHERE id = 5;
         DELETE FROM t WHERE a IS NULL;
         MERGE INTO t USING s ON t.id = s.id
           WHEN MATCHED THEN UPDATE SET t.v = s.v
           WHEN NOT MATCHED THEN INSERT VALUES (s.id, s.v);",
    );
    let statements = &program.block.statements;
    assert_eq!(statements.len(), 3);
    assert!(matches!(&statements[0], Statement::Update(u) if u.where_clause.is_some()));
    assert!(matches!(&statements[1], Statement::Delete(d) if !d.all));
    assert!(matches!(
        &statements[2],
        Statement::Merge(m) if m.clauses.len() == 2
            && matches!(m.clauses[1], MergeClause::When { matched: false, .. })
    ));
}

#[test]
fn test_assignment_forms() {
    let program = parse("SET a = 1, b = 2; c := 3; (d, e) = (4, 5);");
    let statements = &program.block.statements;
    assert!(matches!(&statements[0], Statement::Assignment { set: true, items } if items.len() == 2));
    assert!(matches!(&statements[1], Statement::Assignment { set: false, .. }));
    assert!(matches!(&statements[2], Statement::Assignment { set: false, .. }));
}
