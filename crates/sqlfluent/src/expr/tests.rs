use super::*;
use crate::args;
use crate::stmt::select;

#[test]
fn test_fragment_simple_passthrough() {
    let (sql, args) = expr("a = ? AND b = ?", [1, 2]).render().unwrap();
    assert_eq!(sql, "a = ? AND b = ?");
    assert_eq!(args, args![1, 2]);
}

#[test]
fn test_nested_fragment_is_spliced() {
    let inner = expr("nullif(a,?)", ["b"]);
    let (sql, args) = expr("count(?)", [inner]).render().unwrap();
    assert_eq!(sql, "count(nullif(a,?))");
    assert_eq!(args, args!["b"]);
}

#[test]
fn test_splice_keeps_positional_order() {
    let e = expr(
        "f(?, ?, ?)",
        args![1, expr("g(?, ?)", [2, 3]), 4],
    );
    let (sql, args) = e.render().unwrap();
    assert_eq!(sql, "f(?, g(?, ?), ?)");
    assert_eq!(args, args![1, 2, 3, 4]);
}

#[test]
fn test_escaped_marker_consumes_nothing() {
    let e = expr("data ??| array['x'] AND a = ? AND b = ?", args![expr("lower(?)", ["A"]), 2]);
    let (sql, args) = e.render().unwrap();
    assert_eq!(sql, "data ??| array['x'] AND a = lower(?) AND b = ?");
    assert_eq!(args, args!["A", 2]);

    // simple path keeps the template untouched as well
    let (sql, args) = expr("data ??| x = ?", [1]).render().unwrap();
    assert_eq!(sql, "data ??| x = ?");
    assert_eq!(args, args![1]);
}

#[test]
fn test_extra_markers_and_extra_values() {
    let (sql, args) = expr("a = ? AND b = ? AND c = ?", args![expr("1", args![])])
        .render()
        .unwrap();
    assert_eq!(sql, "a = 1 AND b = ? AND c = ?");
    assert!(args.is_empty());

    let (sql, args) = expr("a = ?", args![expr("x", args![]), 5, 6]).render().unwrap();
    assert_eq!(sql, "a = x");
    assert_eq!(args, args![5, 6]);
}

#[test]
fn test_concat() {
    let e = concat(args!["COALESCE(full_name,", expr("?", ["default"]), ")"]);
    let (sql, args) = e.render().unwrap();
    assert_eq!(sql, "COALESCE(full_name,?)");
    assert_eq!(args, args!["default"]);
}

#[test]
fn test_concat_rejects_plain_values() {
    let err = concat(args!["a = ", 1]).render().unwrap_err();
    assert!(matches!(err, SqlError::Composition(_)));
    assert!(err.to_string().contains("is not SQL text or an expression"));
}

#[test]
fn test_alias() {
    let (sql, args) = alias(expr("a > ?", [1]), "b").render().unwrap();
    assert_eq!(sql, "(a > ?) AS b");
    assert_eq!(args, args![1]);

    let sub = select().column("id").from("t");
    let (sql, _) = alias(Statement::from(sub), "s").render().unwrap();
    assert_eq!(sql, "(SELECT id FROM t) AS s");
}

#[test]
fn test_exists() {
    let sub = select().column("1").from("bar").where_(Eq::new().with("y", 2));
    let (sql, args) = exists(sub.clone()).render().unwrap();
    assert_eq!(sql, "EXISTS (SELECT 1 FROM bar WHERE y = ?)");
    assert_eq!(args, args![2]);
    assert_eq!(
        not_exists(sub).render().unwrap().0,
        "NOT EXISTS (SELECT 1 FROM bar WHERE y = ?)"
    );
}

#[test]
fn test_placeholders() {
    assert_eq!(placeholders(0), "");
    assert_eq!(placeholders(1), "?");
    assert_eq!(placeholders(3), "?,?,?");
}

#[test]
fn test_parity_of_markers_and_args() {
    let e = And::new()
        .with(Eq::new().with("a", 1).with("b", vec![1, 2, 3]).with("c", Value::Null))
        .with(expr("d ??| x AND e = ?", args![expr("f(?)", [9])]))
        .with(Or::new().with(Lt::new().with("g", 1)).with(Like::new().with("h", "x%")));
    let (sql, args) = e.render().unwrap();
    let markers = sql.replace("??", "").matches('?').count();
    assert_eq!(markers, args.len());
}
