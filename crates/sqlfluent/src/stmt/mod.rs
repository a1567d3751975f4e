//! Statement builders.
//!
//! Builders are plain values: every setter consumes the builder and returns
//! the updated one, and clause lists are shared between clones, so a base
//! query can be cloned and specialized cheaply.
//!
//! ```ignore
//! use sqlfluent::{Eq, PlaceholderFormat, Sqlizer, select};
//!
//! let base = select().columns(["id", "name"]).from("users");
//! let active = base.clone().where_(Eq::new().with("status", "active"));
//! let banned = base.where_(Eq::new().with("status", "banned"));
//!
//! let (sql, args) = active
//!     .placeholder_format(PlaceholderFormat::Dollar)
//!     .to_sql()?;
//! // SELECT id, name FROM users WHERE status = $1
//! ```

mod case;
mod clause;
mod create;
mod cte;
mod delete;
mod drop;
mod insert;
mod select;
mod set;
mod update;


pub use case::CaseBuilder;
pub use create::CreateTableBuilder;
pub use cte::{Cte, WithBuilder};
pub use delete::DeleteBuilder;
pub use drop::DropTableBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use set::{SetBuilder, SetOp, select_from_set};
pub use update::UpdateBuilder;

pub(crate) use clause::Clause;

use std::sync::Arc;

use crate::error::SqlResult;
use crate::expr::{Expr, SqlWriter};
use crate::placeholder::PlaceholderFormat;
use crate::traits::Sqlizer;
use crate::value::Value;

/// Any statement that can be embedded in an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Select(SelectBuilder),
    Insert(InsertBuilder),
    Update(UpdateBuilder),
    Delete(DeleteBuilder),
    CreateTable(CreateTableBuilder),
    DropTable(DropTableBuilder),
    Case(CaseBuilder),
    With(WithBuilder),
    Set(SetBuilder),
}

impl Statement {
    /// Short lowercase name of the statement kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Select(_) => "select",
            Statement::Insert(_) => "insert",
            Statement::Update(_) => "update",
            Statement::Delete(_) => "delete",
            Statement::CreateTable(_) => "create",
            Statement::DropTable(_) => "drop",
            Statement::Case(_) => "case",
            Statement::With(_) => "with",
            Statement::Set(_) => "set",
        }
    }

    pub(crate) fn is_case(&self) -> bool {
        matches!(self, Statement::Case(_))
    }

    /// Write the bare statement with neutral markers.
    pub(crate) fn render_into(&self, w: &mut SqlWriter) -> SqlResult<()> {
        match self {
            Statement::Select(b) => b.write_sql(w),
            Statement::Insert(b) => b.write_sql(w),
            Statement::Update(b) => b.write_sql(w),
            Statement::Delete(b) => b.write_sql(w),
            Statement::CreateTable(b) => b.write_sql(w),
            Statement::DropTable(b) => b.write_sql(w),
            Statement::Case(b) => b.write_sql(w),
            Statement::With(b) => b.write_sql(w),
            Statement::Set(b) => b.write_sql(w),
        }
    }
}

impl Sqlizer for Statement {
    fn render(&self) -> SqlResult<(String, Vec<Value>)> {
        let mut w = SqlWriter::new();
        self.render_into(&mut w)?;
        Ok(w.finish())
    }

    fn to_sql(&self) -> SqlResult<(String, Vec<Value>)> {
        match self {
            Statement::Select(b) => b.to_sql(),
            Statement::Insert(b) => b.to_sql(),
            Statement::Update(b) => b.to_sql(),
            Statement::Delete(b) => b.to_sql(),
            Statement::CreateTable(b) => b.to_sql(),
            Statement::DropTable(b) => b.to_sql(),
            Statement::Case(b) => b.to_sql(),
            Statement::With(b) => b.to_sql(),
            Statement::Set(b) => b.to_sql(),
        }
    }
}

/// Apply the placeholder format to a neutral render.
fn finish(
    kind: &'static str,
    format: PlaceholderFormat,
    rendered: (String, Vec<Value>),
) -> SqlResult<(String, Vec<Value>)> {
    let (sql, args) = rendered;
    let sql = format.replace_placeholders(&sql)?;
    tracing::trace!(
        target: "sqlfluent.sql",
        kind,
        sql = %sql,
        param_count = args.len(),
        "rendered statement"
    );
    Ok((sql, args))
}

macro_rules! statement {
    ($($builder:ident => $variant:ident, $kind:literal;)*) => {
        $(
            impl From<$builder> for Statement {
                fn from(b: $builder) -> Self {
                    Statement::$variant(b)
                }
            }

            impl From<$builder> for Expr {
                fn from(b: $builder) -> Self {
                    Expr::Statement(Arc::new(Statement::$variant(b)))
                }
            }

            impl From<$builder> for Value {
                fn from(b: $builder) -> Self {
                    Value::from(Expr::from(b))
                }
            }

            impl Sqlizer for $builder {
                fn render(&self) -> SqlResult<(String, Vec<Value>)> {
                    let mut w = SqlWriter::new();
                    self.write_sql(&mut w)?;
                    Ok(w.finish())
                }

                fn to_sql(&self) -> SqlResult<(String, Vec<Value>)> {
                    finish($kind, self.format, self.render()?)
                }
            }
        )*
    };
}

statement! {
    SelectBuilder => Select, "select";
    InsertBuilder => Insert, "insert";
    UpdateBuilder => Update, "update";
    DeleteBuilder => Delete, "delete";
    CreateTableBuilder => CreateTable, "create";
    DropTableBuilder => DropTable, "drop";
    WithBuilder => With, "with";
    SetBuilder => Set, "set";
}

impl From<CaseBuilder> for Statement {
    fn from(b: CaseBuilder) -> Self {
        Statement::Case(b)
    }
}

impl From<CaseBuilder> for Expr {
    fn from(b: CaseBuilder) -> Self {
        Expr::Statement(Arc::new(Statement::Case(b)))
    }
}

impl From<CaseBuilder> for Value {
    fn from(b: CaseBuilder) -> Self {
        Value::from(Expr::from(b))
    }
}

/// CASE has no placeholder format of its own; it is meant to be embedded.
impl Sqlizer for CaseBuilder {
    fn render(&self) -> SqlResult<(String, Vec<Value>)> {
        let mut w = SqlWriter::new();
        self.write_sql(&mut w)?;
        Ok(w.finish())
    }
}

/// Shared defaults for every statement it creates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatementBuilder {
    format: PlaceholderFormat,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder format given to new statements.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// `SELECT`; add columns with [`SelectBuilder::columns`].
    pub fn select(&self) -> SelectBuilder {
        SelectBuilder::new().placeholder_format(self.format)
    }

    pub fn insert(&self, table: impl Into<String>) -> InsertBuilder {
        InsertBuilder::new("INSERT")
            .into_table(table)
            .placeholder_format(self.format)
    }

    /// `REPLACE INTO` (MySQL, SQLite).
    pub fn replace(&self, table: impl Into<String>) -> InsertBuilder {
        InsertBuilder::new("REPLACE")
            .into_table(table)
            .placeholder_format(self.format)
    }

    pub fn update(&self, table: impl Into<String>) -> UpdateBuilder {
        UpdateBuilder::new()
            .table(table)
            .placeholder_format(self.format)
    }

    pub fn delete(&self, table: impl Into<String>) -> DeleteBuilder {
        DeleteBuilder::new()
            .from(table)
            .placeholder_format(self.format)
    }

    pub fn create_table(&self, table: impl Into<String>) -> CreateTableBuilder {
        CreateTableBuilder::new()
            .table(table)
            .placeholder_format(self.format)
    }

    pub fn drop_table(&self, table: impl Into<String>) -> DropTableBuilder {
        DropTableBuilder::new()
            .table(table)
            .placeholder_format(self.format)
    }

    /// CASE expressions are always nested, so they carry no format.
    pub fn case(&self) -> CaseBuilder {
        CaseBuilder::new()
    }

    pub fn with(&self) -> WithBuilder {
        WithBuilder::new().placeholder_format(self.format)
    }

    /// Set operation starting from `first`.
    pub fn set(&self, first: SelectBuilder) -> SetBuilder {
        SetBuilder::new(first).placeholder_format(self.format)
    }
}

/// `SELECT` with the default (`?`) placeholder format.
pub fn select() -> SelectBuilder {
    StatementBuilder::new().select()
}

/// `INSERT INTO <table>` with the default (`?`) placeholder format.
pub fn insert(table: impl Into<String>) -> InsertBuilder {
    StatementBuilder::new().insert(table)
}

/// `REPLACE INTO <table>` (MySQL, SQLite).
pub fn replace(table: impl Into<String>) -> InsertBuilder {
    StatementBuilder::new().replace(table)
}

/// `UPDATE <table>`.
pub fn update(table: impl Into<String>) -> UpdateBuilder {
    StatementBuilder::new().update(table)
}

/// `DELETE FROM <table>`.
pub fn delete(table: impl Into<String>) -> DeleteBuilder {
    StatementBuilder::new().delete(table)
}

/// `CREATE TABLE <table>`.
pub fn create_table(table: impl Into<String>) -> CreateTableBuilder {
    StatementBuilder::new().create_table(table)
}

/// `DROP TABLE <table>`.
pub fn drop_table(table: impl Into<String>) -> DropTableBuilder {
    StatementBuilder::new().drop_table(table)
}

/// `CASE WHEN ... THEN ... END`
pub fn case() -> CaseBuilder {
    CaseBuilder::new()
}

/// `CASE <value> WHEN ... THEN ... END`
pub fn case_value(value: impl Into<Expr>) -> CaseBuilder {
    CaseBuilder::new().value(value)
}

/// `WITH ...` common table expressions.
pub fn with() -> WithBuilder {
    StatementBuilder::new().with()
}

/// Set operation (UNION, INTERSECT, ...) starting from `first`.
///
/// The format defaults to the one configured on `first`.
pub fn set(first: SelectBuilder) -> SetBuilder {
    let format = first.format;
    SetBuilder::new(first).placeholder_format(format)
}
