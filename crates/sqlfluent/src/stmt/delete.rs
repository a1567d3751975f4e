//! DELETE statement builder.

use super::Clause;
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, SqlWriter, expr};
use crate::placeholder::PlaceholderFormat;
use crate::value::Value;

/// DELETE statement builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteBuilder {
    pub(super) format: PlaceholderFormat,
    prefixes: Clause,
    table: String,
    where_parts: Clause,
    order_bys: Clause,
    limit: Option<u64>,
    offset: Option<u64>,
    suffixes: Clause,
}

impl DeleteBuilder {
    /// Empty DELETE; set a table with [`from`](Self::from).
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder format applied by `to_sql`.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// Expression written before `DELETE`.
    pub fn prefix(mut self, prefix: impl Into<Expr>) -> Self {
        self.prefixes.push(prefix);
        self
    }

    /// Target table.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
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

    /// Expression written after the last clause, e.g. `RETURNING id`.
    pub fn suffix(mut self, suffix: impl Into<Expr>) -> Self {
        self.suffixes.push(suffix);
        self
    }

    pub(super) fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::incomplete("delete", "a from table"));
        }

        if self.prefixes.write(w, "", " ")? {
            w.push_str(" ");
        }

        w.push_str("DELETE FROM ");
        w.push_str(&self.table);

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
