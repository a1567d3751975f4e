//! Column map comparisons.
//!
//! Each map type turns `column -> value` pairs into comparisons joined by
//! ` AND `. Columns are kept in a `BTreeMap`, so output order is always the
//! lexicographic order of the column names.

use std::collections::{BTreeMap, HashMap};

use super::{Expr, FALSE_SQL, SqlWriter, TRUE_SQL};
use crate::error::{SqlError, SqlResult};
use crate::traits::Sqlizer;
use crate::value::Value;

/// Comparison operator applied by a [`ColumnMap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapOp {
    Eq,
    NotEq,
    Lt,
    LtOrEq,
    Gt,
    GtOrEq,
    Like,
    NotLike,
    ILike,
    NotILike,
}

impl MapOp {
    fn operator(self) -> &'static str {
        match self {
            MapOp::Eq => "=",
            MapOp::NotEq => "<>",
            MapOp::Lt => "<",
            MapOp::LtOrEq => "<=",
            MapOp::Gt => ">",
            MapOp::GtOrEq => ">=",
            MapOp::Like => "LIKE",
            MapOp::NotLike => "NOT LIKE",
            MapOp::ILike => "ILIKE",
            MapOp::NotILike => "NOT ILIKE",
        }
    }

    fn is_equality(self) -> bool {
        matches!(self, MapOp::Eq | MapOp::NotEq)
    }

    fn is_ordering(self) -> bool {
        matches!(self, MapOp::Lt | MapOp::LtOrEq | MapOp::Gt | MapOp::GtOrEq)
    }
}

/// A column map paired with its operator.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnMap {
    op: MapOp,
    columns: BTreeMap<String, Value>,
}

impl ColumnMap {
    pub fn op(&self) -> MapOp {
        self.op
    }

    pub(crate) fn render_into(&self, w: &mut SqlWriter) -> SqlResult<()> {
        render_map(self.op, &self.columns, w)
    }
}

fn render_map(op: MapOp, columns: &BTreeMap<String, Value>, w: &mut SqlWriter) -> SqlResult<()> {
    if columns.is_empty() {
        w.push_str(TRUE_SQL);
        return Ok(());
    }

    for (i, (column, value)) in columns.iter().enumerate() {
        if i > 0 {
            w.push_str(" AND ");
        }
        if op.is_equality() {
            write_equality(op == MapOp::NotEq, column, value, w)?;
        } else {
            check_comparable(op, value)?;
            w.push_str(column);
            w.push_str(" ");
            w.push_str(op.operator());
            w.push_str(" ");
            w.push_value(value)?;
        }
    }
    Ok(())
}

fn write_equality(negated: bool, column: &str, value: &Value, w: &mut SqlWriter) -> SqlResult<()> {
    if matches!(value, Value::List(items) if items.is_empty()) {
        w.push_str(if negated { TRUE_SQL } else { FALSE_SQL });
        return Ok(());
    }

    w.push_str(column);
    match value {
        Value::Null => w.push_str(if negated { " IS NOT NULL" } else { " IS NULL" }),
        Value::List(items) => {
            w.push_str(if negated { " NOT IN (" } else { " IN (" });
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    w.push_str(",");
                }
                w.push_value(item)?;
            }
            w.push_str(")");
        }
        other => {
            w.push_str(if negated { " <> " } else { " = " });
            w.push_value(other)?;
        }
    }
    Ok(())
}

fn check_comparable(op: MapOp, value: &Value) -> SqlResult<()> {
    let family = if op.is_ordering() {
        "less than or greater than"
    } else {
        "like"
    };
    match value {
        Value::Null => Err(SqlError::unsupported(format!(
            "cannot use null with {family} operators"
        ))),
        Value::List(_) => Err(SqlError::unsupported(format!(
            "cannot use array or slice with {family} operators"
        ))),
        _ => Ok(()),
    }
}

macro_rules! column_map {
    ($($(#[$meta:meta])* $name:ident => $op:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Debug, Default, PartialEq)]
            pub struct $name(BTreeMap<String, Value>);

            impl $name {
                /// Empty map; renders `(1=1)`.
                pub fn new() -> Self {
                    Self::default()
                }

                /// Add a column comparison.
                pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
                    self.0.insert(column.into(), value.into());
                    self
                }

                /// Add a column comparison in place.
                pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
                    self.0.insert(column.into(), value.into());
                }

                pub fn len(&self) -> usize {
                    self.0.len()
                }

                pub fn is_empty(&self) -> bool {
                    self.0.is_empty()
                }
            }

            impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for $name {
                fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
                }
            }

            impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for $name {
                fn from(pairs: [(K, V); N]) -> Self {
                    pairs.into_iter().collect()
                }
            }

            impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for $name {
                fn from(map: HashMap<K, V>) -> Self {
                    map.into_iter().collect()
                }
            }

            impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for $name {
                fn from(map: BTreeMap<K, V>) -> Self {
                    map.into_iter().collect()
                }
            }

            impl From<$name> for Expr {
                fn from(map: $name) -> Self {
                    Expr::Map(ColumnMap {
                        op: MapOp::$op,
                        columns: map.0,
                    })
                }
            }

            impl From<$name> for Value {
                fn from(map: $name) -> Self {
                    Value::from(Expr::from(map))
                }
            }

            impl Sqlizer for $name {
                fn render(&self) -> SqlResult<(String, Vec<Value>)> {
                    let mut w = SqlWriter::new();
                    render_map(MapOp::$op, &self.0, &mut w)?;
                    Ok(w.finish())
                }
            }
        )*
    };
}

column_map! {
    /// `column = ?`, `column IS NULL`, or `column IN (...)` for lists.
    Eq => Eq;
    /// `column <> ?`, `column IS NOT NULL`, or `column NOT IN (...)` for lists.
    NotEq => NotEq;
    /// `column < ?`
    Lt => Lt;
    /// `column <= ?`
    LtOrEq => LtOrEq;
    /// `column > ?`
    Gt => Gt;
    /// `column >= ?`
    GtOrEq => GtOrEq;
    /// `column LIKE ?`
    Like => Like;
    /// `column NOT LIKE ?`
    NotLike => NotLike;
    /// `column ILIKE ?`
    ILike => ILike;
    /// `column NOT ILIKE ?`
    NotILike => NotILike;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn test_eq_sorted_columns() {
        let (sql, args) = Eq::new().with("b", 2).with("a", 1).render().unwrap();
        assert_eq!(sql, "a = ? AND b = ?");
        assert_eq!(args, args![1, 2]);
    }

    #[test]
    fn test_eq_from_hashmap_is_deterministic() {
        let mut map = HashMap::new();
        for (i, col) in ["zeta", "alpha", "mid", "beta", "omega"].iter().enumerate() {
            map.insert(*col, i as i64);
        }
        let first = Eq::from(map.clone()).render().unwrap();
        for _ in 0..10 {
            assert_eq!(Eq::from(map.clone()).render().unwrap(), first);
        }
        assert_eq!(
            first.0,
            "alpha = ? AND beta = ? AND mid = ? AND omega = ? AND zeta = ?"
        );
    }

    #[test]
    fn test_eq_null_and_lists() {
        let (sql, args) = Eq::new()
            .with("deleted_at", Value::Null)
            .with("id", vec![1, 2, 3])
            .render()
            .unwrap();
        assert_eq!(sql, "deleted_at IS NULL AND id IN (?,?,?)");
        assert_eq!(args, args![1, 2, 3]);

        let (sql, _) = NotEq::new()
            .with("deleted_at", None::<i32>)
            .with("id", vec![1, 2])
            .render()
            .unwrap();
        assert_eq!(sql, "deleted_at IS NOT NULL AND id NOT IN (?,?)");
    }

    #[test]
    fn test_byte_buffer_binds_as_one_value() {
        let digest: Vec<u8> = vec![0xde, 0xad, 0xbe];
        let (sql, args) = Eq::new().with("hash", digest).render().unwrap();
        assert_eq!(sql, "hash = ?");
        assert_eq!(args, vec![Value::Bytes(vec![0xde, 0xad, 0xbe])]);

        let (sql, args) = NotEq::new().with("hash", &[0x01u8][..]).render().unwrap();
        assert_eq!(sql, "hash <> ?");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_empty_list_literals() {
        let (sql, args) = Eq::new().with("k", Vec::<i32>::new()).render().unwrap();
        assert_eq!(sql, "(1=0)");
        assert!(args.is_empty());

        let (sql, args) = NotEq::new().with("k", Vec::<i32>::new()).render().unwrap();
        assert_eq!(sql, "(1=1)");
        assert!(args.is_empty());

        let (sql, _) = Eq::new()
            .with("a", 1)
            .with("k", Vec::<i32>::new())
            .render()
            .unwrap();
        assert_eq!(sql, "a = ? AND (1=0)");
    }

    #[test]
    fn test_empty_map_is_true() {
        assert_eq!(Eq::new().render().unwrap().0, "(1=1)");
        assert_eq!(NotEq::new().render().unwrap().0, "(1=1)");
        assert_eq!(Lt::new().render().unwrap().0, "(1=1)");
        assert_eq!(NotILike::new().render().unwrap().0, "(1=1)");
    }

    #[test]
    fn test_ordering_operators() {
        let (sql, args) = Lt::from([("a", 1)]).render().unwrap();
        assert_eq!(sql, "a < ?");
        assert_eq!(args, args![1]);
        assert_eq!(LtOrEq::from([("a", 1)]).render().unwrap().0, "a <= ?");
        assert_eq!(Gt::from([("a", 1)]).render().unwrap().0, "a > ?");
        assert_eq!(GtOrEq::from([("a", 1)]).render().unwrap().0, "a >= ?");
    }

    #[test]
    fn test_ordering_rejects_null_and_lists() {
        let err = Lt::new().with("a", Value::Null).render().unwrap_err();
        assert!(err.is_unsupported());
        assert!(err.to_string().contains("cannot use null"));

        let err = Gt::new().with("a", vec![1, 2]).render().unwrap_err();
        assert!(err.to_string().contains("cannot use array or slice"));
    }

    #[test]
    fn test_pattern_operators() {
        assert_eq!(Like::from([("name", "%a%")]).render().unwrap().0, "name LIKE ?");
        assert_eq!(
            NotLike::from([("name", "%a%")]).render().unwrap().0,
            "name NOT LIKE ?"
        );
        assert_eq!(ILike::from([("name", "%a%")]).render().unwrap().0, "name ILIKE ?");
        assert_eq!(
            NotILike::from([("name", "%a%")]).render().unwrap().0,
            "name NOT ILIKE ?"
        );

        let err = Like::new().with("name", None::<String>).render().unwrap_err();
        assert!(err.to_string().contains("cannot use null with like operators"));
        let err = ILike::new().with("name", vec!["a"]).render().unwrap_err();
        assert!(err.to_string().contains("cannot use array or slice with like operators"));
    }

    #[test]
    fn test_expression_values_are_spliced() {
        let (sql, args) = Eq::new()
            .with("total", crate::expr("a + ?", [2]))
            .render()
            .unwrap();
        assert_eq!(sql, "total = a + ?");
        assert_eq!(args, args![2]);
    }
}
