//! DROP TABLE builder.

use super::Clause;
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, SqlWriter};
use crate::placeholder::PlaceholderFormat;

/// `DROP TABLE [IF EXISTS] t`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DropTableBuilder {
    pub(super) format: PlaceholderFormat,
    prefixes: Clause,
    if_exists: bool,
    table: String,
    suffixes: Clause,
}

impl DropTableBuilder {
    /// Empty DROP TABLE; set a table before rendering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder format applied by `to_sql`.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// Expression written before `DROP TABLE`.
    pub fn prefix(mut self, prefix: impl Into<Expr>) -> Self {
        self.prefixes.push(prefix);
        self
    }

    /// Table to drop.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// `DROP TABLE IF EXISTS`.
    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Expression written after the table, e.g. `CASCADE`.
    pub fn suffix(mut self, suffix: impl Into<Expr>) -> Self {
        self.suffixes.push(suffix);
        self
    }

    pub(super) fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::incomplete("drop", "a table"));
        }

        if self.prefixes.write(w, "", " ")? {
            w.push_str(" ");
        }

        w.push_str("DROP TABLE ");
        if self.if_exists {
            w.push_str("IF EXISTS ");
        }
        w.push_str(&self.table);

        self.suffixes.write(w, " ", " ")?;
        Ok(())
    }
}
