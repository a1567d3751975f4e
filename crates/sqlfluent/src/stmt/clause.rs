//! Clause containers shared by the statement builders.

use std::sync::Arc;

use crate::error::SqlResult;
use crate::expr::{Expr, SqlWriter, render_non_empty};

/// Ordered parts of one clause (WHERE parts, columns, joins, ...).
///
/// Parts live behind an `Arc`, so cloning a builder shares them; the first
/// push after a clone copies the list.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Clause(Arc<Vec<Expr>>);

impl Clause {
    pub(crate) fn push(&mut self, part: impl Into<Expr>) {
        Arc::make_mut(&mut self.0).push(part.into());
    }

    pub(crate) fn clear(&mut self) {
        self.0 = Arc::default();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.0.iter()
    }

    /// Write `keyword` and the parts joined by `sep`. Parts rendering to empty
    /// SQL are skipped; if none remain nothing is written and `false` returned.
    pub(crate) fn write(&self, w: &mut SqlWriter, keyword: &str, sep: &str) -> SqlResult<bool> {
        let rendered = render_non_empty(self.0.iter())?;
        if rendered.is_empty() {
            return Ok(false);
        }
        w.push_str(keyword);
        w.push_rendered(rendered, sep);
        Ok(true)
    }
}
