//! Composable SQL expressions.
//!
//! Every predicate, column expression and nested statement reduces to an
//! [`Expr`]. Rendering walks the tree left to right, so the order of `?`
//! markers in the output always matches the order of the returned arguments.
//!
//! ```ignore
//! use sqlfluent::{Eq, Or, expr};
//!
//! let pred = Or::new()
//!     .with(Eq::new().with("status", "active"))
//!     .with(expr("score > ?", [10]));
//! // (status = ? OR score > ?)
//! ```

mod cond;
mod conj;

#[cfg(test)]
mod tests;

pub use cond::{Eq, Gt, GtOrEq, ILike, Like, Lt, LtOrEq, NotEq, NotILike, NotLike};
pub use cond::{ColumnMap, MapOp};
pub use conj::{And, Or};

use std::sync::Arc;

use crate::error::{SqlError, SqlResult};
use crate::stmt::{SelectBuilder, Statement};
use crate::traits::Sqlizer;
use crate::value::Value;

/// Portable always-true literal.
pub(crate) const TRUE_SQL: &str = "(1=1)";
/// Portable always-false literal.
pub(crate) const FALSE_SQL: &str = "(1=0)";

/// Output buffer shared by every render step.
#[derive(Debug, Default)]
pub(crate) struct SqlWriter {
    sql: String,
    args: Vec<Value>,
}

impl SqlWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub(crate) fn push_args(&mut self, args: impl IntoIterator<Item = Value>) {
        self.args.extend(args);
    }

    /// Write a bound value: nested expressions are spliced, anything else
    /// becomes a `?` marker.
    pub(crate) fn push_value(&mut self, value: &Value) -> SqlResult<()> {
        match value {
            Value::Expr(e) => e.render_into(self),
            other => {
                self.sql.push('?');
                self.args.push(other.clone());
                Ok(())
            }
        }
    }

    /// Write already rendered parts joined by `sep`.
    pub(crate) fn push_rendered(&mut self, rendered: Vec<(String, Vec<Value>)>, sep: &str) {
        for (i, (sql, args)) in rendered.into_iter().enumerate() {
            if i > 0 {
                self.sql.push_str(sep);
            }
            self.sql.push_str(&sql);
            self.args.extend(args);
        }
    }

    pub(crate) fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }
}

/// Render each expression, dropping the ones with empty SQL text.
pub(crate) fn render_non_empty<'a>(
    parts: impl IntoIterator<Item = &'a Expr>,
) -> SqlResult<Vec<(String, Vec<Value>)>> {
    let mut out = Vec::new();
    for part in parts {
        let (sql, args) = part.render()?;
        if !sql.is_empty() {
            out.push((sql, args));
        }
    }
    Ok(out)
}

/// Raw SQL text with positional arguments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fragment {
    sql: String,
    args: Vec<Value>,
}

impl Fragment {
    /// SQL text whose `?` markers take `args` in order.
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// The SQL text as given.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The arguments as given.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// True when there is neither SQL nor arguments.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty() && self.args.is_empty()
    }

    fn render_into(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if !self.args.iter().any(Value::is_expr) {
            w.push_str(&self.sql);
            w.push_args(self.args.iter().cloned());
            return Ok(());
        }

        let mut args = self.args.iter();
        let mut rest = self.sql.as_str();
        while let Some(pos) = rest.find('?') {
            w.push_str(&rest[..pos]);
            rest = &rest[pos..];

            // `??` stays escaped for the placeholder pass
            if rest.starts_with("??") {
                w.push_str("??");
                rest = &rest[2..];
                continue;
            }
            rest = &rest[1..];

            match args.next() {
                Some(value) => w.push_value(value)?,
                None => w.push_str("?"),
            }
        }
        w.push_str(rest);
        w.push_args(args.cloned());
        Ok(())
    }
}

/// A renderable SQL expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// SQL text whose `?` markers bind (or splice) `args` in order.
    Fragment(Fragment),
    /// Raw SQL text parts and nested expressions written back to back.
    Concat(Vec<Value>),
    /// Column map comparison (`Eq`, `Lt`, `Like`, ...).
    Map(ColumnMap),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    /// `(<expr>) AS <alias>`
    Alias { expr: Box<Expr>, alias: String },
    /// A nested statement, parenthesized unless it is a CASE.
    Statement(Arc<Statement>),
}

impl Expr {
    /// True for a fragment with neither SQL nor arguments.
    pub fn is_blank(&self) -> bool {
        matches!(self, Expr::Fragment(f) if f.is_empty())
    }

    pub(crate) fn render_into(&self, w: &mut SqlWriter) -> SqlResult<()> {
        match self {
            Expr::Fragment(fragment) => fragment.render_into(w),
            Expr::Concat(parts) => {
                for part in parts {
                    match part {
                        Value::Text(sql) => w.push_str(sql),
                        Value::Expr(e) => e.render_into(w)?,
                        other => {
                            return Err(SqlError::composition(format!(
                                "{other:?} is not SQL text or an expression"
                            )));
                        }
                    }
                }
                Ok(())
            }
            Expr::Map(map) => map.render_into(w),
            Expr::And(members) => conj::render_conj(members, " AND ", TRUE_SQL, w),
            Expr::Or(members) => conj::render_conj(members, " OR ", FALSE_SQL, w),
            Expr::Alias { expr, alias } => {
                if let Expr::Statement(stmt) = expr.as_ref()
                    && !stmt.is_case()
                {
                    expr.render_into(w)?;
                } else {
                    w.push_str("(");
                    expr.render_into(w)?;
                    w.push_str(")");
                }
                w.push_str(" AS ");
                w.push_str(alias);
                Ok(())
            }
            Expr::Statement(stmt) => {
                if stmt.is_case() {
                    return stmt.render_into(w);
                }
                w.push_str("(");
                stmt.render_into(w)?;
                w.push_str(")");
                Ok(())
            }
        }
    }
}

impl Sqlizer for Expr {
    fn render(&self) -> SqlResult<(String, Vec<Value>)> {
        let mut w = SqlWriter::new();
        self.render_into(&mut w)?;
        Ok(w.finish())
    }
}

impl From<&str> for Expr {
    fn from(sql: &str) -> Self {
        Expr::Fragment(Fragment::new(sql, Vec::new()))
    }
}

impl From<String> for Expr {
    fn from(sql: String) -> Self {
        Expr::Fragment(Fragment::new(sql, Vec::new()))
    }
}

impl From<Fragment> for Expr {
    fn from(fragment: Fragment) -> Self {
        Expr::Fragment(fragment)
    }
}

impl From<Statement> for Expr {
    fn from(stmt: Statement) -> Self {
        Expr::Statement(Arc::new(stmt))
    }
}

/// Build a fragment from SQL text and its arguments.
///
/// Arguments that are themselves expressions or statements are rendered in
/// place of their `?` marker; `??` is kept as an escaped literal `?`.
pub fn expr<V: Into<Value>>(sql: impl Into<String>, args: impl IntoIterator<Item = V>) -> Expr {
    Expr::Fragment(Fragment::new(
        sql,
        args.into_iter().map(Into::into).collect(),
    ))
}

/// Concatenate raw SQL text parts and expressions.
///
/// Rendering fails with [`SqlError::Composition`] if a part is any other value.
pub fn concat<V: Into<Value>>(parts: impl IntoIterator<Item = V>) -> Expr {
    Expr::Concat(parts.into_iter().map(Into::into).collect())
}

/// `(<expr>) AS <alias>`
pub fn alias(expr: impl Into<Expr>, alias: impl Into<String>) -> Expr {
    Expr::Alias {
        expr: Box::new(expr.into()),
        alias: alias.into(),
    }
}

/// `EXISTS (<select>)`
pub fn exists(select: SelectBuilder) -> Expr {
    expr("EXISTS ?", [select])
}

/// `NOT EXISTS (<select>)`
pub fn not_exists(select: SelectBuilder) -> Expr {
    expr("NOT EXISTS ?", [select])
}

/// `n` comma-separated `?` markers, e.g. `?,?,?`.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}
