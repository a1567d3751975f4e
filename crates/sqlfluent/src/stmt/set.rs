//! Set operations over SELECT statements.

use std::sync::Arc;

use super::{SelectBuilder, Statement};
use crate::error::SqlResult;
use crate::expr::{SqlWriter, alias};
use crate::placeholder::PlaceholderFormat;

/// Set operator joining two queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetOp {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOp {
    pub fn keyword(self) -> &'static str {
        match self {
            SetOp::Union => "UNION",
            SetOp::UnionAll => "UNION ALL",
            SetOp::Intersect => "INTERSECT",
            SetOp::Except => "EXCEPT",
        }
    }
}

/// `A UNION (B) INTERSECT (C) ...`
///
/// Operands after the first are parenthesized. Their own placeholder formats
/// are ignored; the set's format applies to the whole statement.
#[derive(Clone, Debug, PartialEq)]
pub struct SetBuilder {
    pub(super) format: PlaceholderFormat,
    first: Arc<SelectBuilder>,
    rest: Arc<Vec<(SetOp, SelectBuilder)>>,
}

impl SetBuilder {
    /// Set operation whose left-most operand is `first`.
    pub fn new(first: SelectBuilder) -> Self {
        Self {
            format: PlaceholderFormat::default(),
            first: Arc::new(first),
            rest: Arc::default(),
        }
    }

    /// Placeholder format applied by `to_sql`.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// `UNION (<select>)`.
    pub fn union(self, select: SelectBuilder) -> Self {
        self.push(SetOp::Union, select)
    }

    /// `UNION ALL (<select>)`.
    pub fn union_all(self, select: SelectBuilder) -> Self {
        self.push(SetOp::UnionAll, select)
    }

    /// `INTERSECT (<select>)`.
    pub fn intersect(self, select: SelectBuilder) -> Self {
        self.push(SetOp::Intersect, select)
    }

    /// `EXCEPT (<select>)`.
    pub fn except(self, select: SelectBuilder) -> Self {
        self.push(SetOp::Except, select)
    }

    fn push(mut self, op: SetOp, select: SelectBuilder) -> Self {
        Arc::make_mut(&mut self.rest).push((op, select));
        self
    }

    pub(super) fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        self.first.write_sql(w)?;
        for (op, select) in self.rest.iter() {
            w.push_str(" ");
            w.push_str(op.keyword());
            w.push_str(" (");
            select.write_sql(w)?;
            w.push_str(")");
        }
        Ok(())
    }
}

/// `select` reading `FROM (<set>) AS <name>`.
pub fn select_from_set(select: SelectBuilder, set: SetBuilder, name: &str) -> SelectBuilder {
    select.from_expr(alias(Statement::Set(set), name))
}
