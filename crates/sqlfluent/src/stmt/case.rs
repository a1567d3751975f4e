//! CASE expression builder.

use std::sync::Arc;

use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, SqlWriter};

/// `CASE [value] WHEN ... THEN ... [ELSE ...] END`
///
/// Plain strings are written as SQL; use [`expr`](crate::expr()) to bind values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaseBuilder {
    value: Option<Arc<Expr>>,
    whens: Arc<Vec<(Expr, Expr)>>,
    else_: Option<Arc<Expr>>,
}

impl CaseBuilder {
    /// Searched CASE (no subject value).
    pub fn new() -> Self {
        Self::default()
    }

    /// Value compared against each WHEN.
    pub fn value(mut self, value: impl Into<Expr>) -> Self {
        self.value = Some(Arc::new(value.into()));
        self
    }

    /// `WHEN <when> THEN <then>`.
    pub fn when(mut self, when: impl Into<Expr>, then: impl Into<Expr>) -> Self {
        Arc::make_mut(&mut self.whens).push((when.into(), then.into()));
        self
    }

    /// `ELSE <result>`.
    pub fn else_(mut self, result: impl Into<Expr>) -> Self {
        self.else_ = Some(Arc::new(result.into()));
        self
    }

    pub(super) fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.whens.is_empty() {
            return Err(SqlError::incomplete("case", "at least one WHEN clause"));
        }

        w.push_str("CASE ");
        if let Some(value) = &self.value {
            value.render_into(w)?;
            w.push_str(" ");
        }
        for (when, then) in self.whens.iter() {
            w.push_str("WHEN ");
            when.render_into(w)?;
            w.push_str(" THEN ");
            then.render_into(w)?;
            w.push_str(" ");
        }
        if let Some(result) = &self.else_ {
            w.push_str("ELSE ");
            result.render_into(w)?;
            w.push_str(" ");
        }
        w.push_str("END");
        Ok(())
    }
}
