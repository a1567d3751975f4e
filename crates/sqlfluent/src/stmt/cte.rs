//! Common table expressions (`WITH`).

use std::sync::Arc;

use super::{DeleteBuilder, InsertBuilder, SelectBuilder, Statement, UpdateBuilder};
use crate::error::{SqlError, SqlResult};
use crate::expr::SqlWriter;
use crate::placeholder::PlaceholderFormat;
use crate::traits::Sqlizer;
use crate::value::Value;

/// One named entry of a `WITH` list: `[RECURSIVE ]name[(columns)] AS (<query>)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cte {
    name: String,
    columns: Vec<String>,
    recursive: bool,
    statement: Arc<Statement>,
}

impl Cte {
    /// `name AS (<statement>)`.
    pub fn new(name: impl Into<String>, statement: impl Into<Statement>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            recursive: false,
            statement: Arc::new(statement.into()),
        }
    }

    /// Explicit column list, `name(a, b)`.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Mark this entry `RECURSIVE`.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.recursive {
            w.push_str("RECURSIVE ");
        }
        w.push_str(&self.name);
        if !self.columns.is_empty() {
            w.push_str("(");
            w.push_str(&self.columns.join(", "));
            w.push_str(")");
        }
        w.push_str(" AS (");
        self.statement.render_into(w)?;
        w.push_str(")");
        Ok(())
    }
}

impl Sqlizer for Cte {
    fn render(&self) -> SqlResult<(String, Vec<Value>)> {
        let mut w = SqlWriter::new();
        self.write_sql(&mut w)?;
        Ok(w.finish())
    }
}

pub(super) fn write_ctes(ctes: &[Cte], w: &mut SqlWriter) -> SqlResult<()> {
    for (i, cte) in ctes.iter().enumerate() {
        if i > 0 {
            w.push_str(", ");
        }
        cte.write_sql(w)?;
    }
    Ok(())
}

/// `WITH [RECURSIVE] <ctes>` followed by one final statement on a new line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WithBuilder {
    pub(super) format: PlaceholderFormat,
    recursive: bool,
    ctes: Arc<Vec<Cte>>,
    statement: Option<Arc<Statement>>,
}

impl WithBuilder {
    /// Empty WITH; add entries and a final statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder format applied by `to_sql`.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// Write `WITH RECURSIVE`.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Append a common table expression.
    pub fn cte(mut self, cte: Cte) -> Self {
        Arc::make_mut(&mut self.ctes).push(cte);
        self
    }

    /// Shorthand for `cte(Cte::new(name, query))`.
    pub fn cte_as(self, name: impl Into<String>, query: SelectBuilder) -> Self {
        self.cte(Cte::new(name, query))
    }

    /// Final SELECT.
    pub fn select(self, statement: SelectBuilder) -> Self {
        self.statement(statement)
    }

    /// Final INSERT.
    pub fn insert(self, statement: InsertBuilder) -> Self {
        self.statement(statement)
    }

    /// Final UPDATE.
    pub fn update(self, statement: UpdateBuilder) -> Self {
        self.statement(statement)
    }

    /// Final DELETE.
    pub fn delete(self, statement: DeleteBuilder) -> Self {
        self.statement(statement)
    }

    fn statement(mut self, statement: impl Into<Statement>) -> Self {
        self.statement = Some(Arc::new(statement.into()));
        self
    }

    pub(super) fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.ctes.is_empty() {
            return Err(SqlError::incomplete(
                "with",
                "at least one common table expression",
            ));
        }
        let Some(statement) = &self.statement else {
            return Err(SqlError::incomplete(
                "with",
                "a final select, insert, update or delete statement",
            ));
        };

        w.push_str("WITH ");
        if self.recursive {
            w.push_str("RECURSIVE ");
        }
        write_ctes(&self.ctes, w)?;
        w.push_str("\n");
        statement.render_into(w)
    }
}
