//! INSERT / REPLACE statement builder.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Clause, SelectBuilder};
use crate::columns::ToColumns;
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, SqlWriter};
use crate::placeholder::PlaceholderFormat;
use crate::value::Value;

/// INSERT statement builder.
///
/// Rows come either from [`values`](InsertBuilder::values) or from a nested
/// [`select`](InsertBuilder::select); when both are set the SELECT wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InsertBuilder {
    pub(super) format: PlaceholderFormat,
    verb: &'static str,
    prefixes: Clause,
    options: Clause,
    table: String,
    columns: Arc<Vec<String>>,
    values: Arc<Vec<Vec<Value>>>,
    select: Option<Arc<SelectBuilder>>,
    suffixes: Clause,
}

impl InsertBuilder {
    /// `verb` is the statement keyword, `INSERT` or `REPLACE`.
    pub(super) fn new(verb: &'static str) -> Self {
        Self {
            verb,
            ..Self::default()
        }
    }

    /// Placeholder format applied by `to_sql`.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// Expression written before the statement keyword.
    pub fn prefix(mut self, prefix: impl Into<Expr>) -> Self {
        self.prefixes.push(prefix);
        self
    }

    /// Keywords between the verb and `INTO`, e.g. `IGNORE`.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for option in options {
            self.options.push(option.into());
        }
        self
    }

    /// Target table.
    pub fn into_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Append target column names.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::make_mut(&mut self.columns).extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append one row. Expression values are written in place of `?`.
    pub fn values<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Arc::make_mut(&mut self.values).push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Replace columns and rows with a single row built from `map`, in
    /// column-name order.
    pub fn set_map<I, K, V>(self, map: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let sorted: BTreeMap<String, Value> = map
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.set_row(sorted.into_iter().collect())
    }

    /// Replace columns and rows with a single row from `entity`.
    pub fn set_columns(self, entity: &impl ToColumns) -> Self {
        self.set_row(entity.to_columns())
    }

    fn set_row(mut self, pairs: Vec<(String, Value)>) -> Self {
        let (columns, row): (Vec<String>, Vec<Value>) = pairs.into_iter().unzip();
        self.columns = Arc::new(columns);
        self.values = Arc::new(vec![row]);
        self
    }

    /// `INSERT INTO t (cols) (SELECT ...)`
    pub fn select(mut self, select: SelectBuilder) -> Self {
        self.select = Some(Arc::new(select));
        self
    }

    /// e.g. `RETURNING id`
    pub fn suffix(mut self, suffix: impl Into<Expr>) -> Self {
        self.suffixes.push(suffix);
        self
    }

    pub(super) fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::incomplete("insert", "a table"));
        }
        if self.values.is_empty() && self.select.is_none() {
            return Err(SqlError::incomplete(
                "insert",
                "at least one set of values or a select",
            ));
        }

        if self.prefixes.write(w, "", " ")? {
            w.push_str(" ");
        }

        w.push_str(self.verb);
        w.push_str(" ");
        if self.options.write(w, "", " ")? {
            w.push_str(" ");
        }
        w.push_str("INTO ");
        w.push_str(&self.table);
        w.push_str(" ");

        if !self.columns.is_empty() {
            w.push_str("(");
            w.push_str(&self.columns.join(","));
            w.push_str(") ");
        }

        match &self.select {
            Some(select) => {
                w.push_str("(");
                select.write_sql(w)?;
                w.push_str(")");
            }
            None => {
                w.push_str("VALUES ");
                for (r, row) in self.values.iter().enumerate() {
                    if r > 0 {
                        w.push_str(",");
                    }
                    w.push_str("(");
                    for (i, value) in row.iter().enumerate() {
                        if i > 0 {
                            w.push_str(",");
                        }
                        w.push_value(value)?;
                    }
                    w.push_str(")");
                }
            }
        }

        self.suffixes.write(w, " ", " ")?;
        Ok(())
    }
}
