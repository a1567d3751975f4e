//! UPDATE statement builder.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::Clause;
use crate::columns::ToColumns;
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, SqlWriter, expr};
use crate::placeholder::PlaceholderFormat;
use crate::value::Value;

/// UPDATE statement builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateBuilder {
    pub(super) format: PlaceholderFormat,
    prefixes: Clause,
    table: String,
    set_clauses: Arc<Vec<(String, Value)>>,
    from: Option<Arc<Expr>>,
    where_parts: Clause,
    order_bys: Clause,
    limit: Option<u64>,
    offset: Option<u64>,
    suffixes: Clause,
}

impl UpdateBuilder {
    /// Empty UPDATE; set a table and at least one column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder format applied by `to_sql`.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// Expression written before `UPDATE`.
    pub fn prefix(mut self, prefix: impl Into<Expr>) -> Self {
        self.prefixes.push(prefix);
        self
    }

    /// Target table.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// `column = value`; expressions, CASE and sub-selects are written inline.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.set_clauses).push((column.into(), value.into()));
        self
    }

    /// Add one SET clause per entry, in column-name order.
    pub fn set_map<I, K, V>(mut self, map: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let sorted: BTreeMap<String, Value> = map
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Arc::make_mut(&mut self.set_clauses).extend(sorted);
        self
    }

    /// Add the entity's columns in the order it lists them.
    pub fn set_columns(mut self, entity: &impl ToColumns) -> Self {
        Arc::make_mut(&mut self.set_clauses).extend(entity.to_columns());
        self
    }

    /// `UPDATE ... FROM <from>`
    pub fn from(mut self, from: impl Into<Expr>) -> Self {
        self.from = Some(Arc::new(from.into()));
        self
    }

    /// Add a WHERE part; parts are joined with AND. Blank fragments are ignored.
    pub fn where_(mut self, pred: impl Into<Expr>) -> Self {
        let pred = pred.into();
        if !pred.is_blank() {
            self.where_parts.push(pred);
        }
        self
    }

    /// WHERE part from SQL text and arguments.
    pub fn where_sql<V: Into<Value>>(self, sql: &str, args: impl IntoIterator<Item = V>) -> Self {
        self.where_(expr(sql, args))
    }

    /// Append ORDER BY entries.
    pub fn order_by<I, S>(mut self, order_bys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for order_by in order_bys {
            self.order_bys.push(order_by.into());
        }
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Expression written after the last clause, e.g. `RETURNING *`.
    pub fn suffix(mut self, suffix: impl Into<Expr>) -> Self {
        self.suffixes.push(suffix);
        self
    }

    pub(super) fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::incomplete("update", "a table"));
        }
        if self.set_clauses.is_empty() {
            return Err(SqlError::incomplete("update", "at least one set clause"));
        }

        if self.prefixes.write(w, "", " ")? {
            w.push_str(" ");
        }

        w.push_str("UPDATE ");
        w.push_str(&self.table);
        w.push_str(" SET ");
        for (i, (column, value)) in self.set_clauses.iter().enumerate() {
            if i > 0 {
                w.push_str(", ");
            }
            w.push_str(column);
            w.push_str(" = ");
            w.push_value(value)?;
        }

        if let Some(from) = &self.from {
            w.push_str(" FROM ");
            from.render_into(w)?;
        }

        self.where_parts.write(w, " WHERE ", " AND ")?;
        self.order_bys.write(w, " ORDER BY ", ", ")?;

        if let Some(limit) = self.limit {
            w.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            w.push_str(&format!(" OFFSET {offset}"));
        }

        self.suffixes.write(w, " ", " ")?;
        Ok(())
    }
}
