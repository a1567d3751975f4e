//! CREATE TABLE builder.

use std::sync::Arc;

use super::Clause;
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, SqlWriter};
use crate::placeholder::PlaceholderFormat;

#[derive(Clone, Debug, PartialEq)]
struct ColumnDef {
    name: String,
    data_type: String,
    constraints: Vec<String>,
}

/// `CREATE TABLE [IF NOT EXISTS] t (col TYPE constraints, ..., PRIMARY KEY (...))`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateTableBuilder {
    pub(super) format: PlaceholderFormat,
    prefixes: Clause,
    if_not_exists: bool,
    table: String,
    columns: Arc<Vec<ColumnDef>>,
    primary_key: Vec<String>,
    suffixes: Clause,
}

impl CreateTableBuilder {
    /// Empty CREATE TABLE; set a table and at least one column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder format applied by `to_sql`.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// Expression written before `CREATE TABLE`.
    pub fn prefix(mut self, prefix: impl Into<Expr>) -> Self {
        self.prefixes.push(prefix);
        self
    }

    /// Table to create.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// `CREATE TABLE IF NOT EXISTS`.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Column definition, e.g. `column("id", "INT", ["NOT NULL"])`.
    pub fn column<I, S>(
        mut self,
        name: impl Into<String>,
        data_type: impl Into<String>,
        constraints: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::make_mut(&mut self.columns).push(ColumnDef {
            name: name.into(),
            data_type: data_type.into(),
            constraints: constraints.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Table-level `PRIMARY KEY (...)`.
    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Expression written after the column list.
    pub fn suffix(mut self, suffix: impl Into<Expr>) -> Self {
        self.suffixes.push(suffix);
        self
    }

    pub(super) fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::incomplete("create", "a table"));
        }
        if self.columns.is_empty() {
            return Err(SqlError::incomplete("create", "at least one column"));
        }

        if self.prefixes.write(w, "", " ")? {
            w.push_str(" ");
        }

        w.push_str("CREATE TABLE ");
        if self.if_not_exists {
            w.push_str("IF NOT EXISTS ");
        }
        w.push_str(&self.table);
        w.push_str(" (");

        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                w.push_str(", ");
            }
            w.push_str(&column.name);
            w.push_str(" ");
            w.push_str(&column.data_type);
            for constraint in &column.constraints {
                w.push_str(" ");
                w.push_str(constraint);
            }
        }

        if !self.primary_key.is_empty() {
            w.push_str(", PRIMARY KEY (");
            w.push_str(&self.primary_key.join(", "));
            w.push_str(")");
        }
        w.push_str(")");

        self.suffixes.write(w, " ", " ")?;
        Ok(())
    }
}
