//! SELECT statement builder.

use std::sync::Arc;

use super::cte::{Cte, write_ctes};
use super::{Clause, Statement};
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, SqlWriter, alias, expr};
use crate::placeholder::PlaceholderFormat;
use crate::value::Value;

/// SELECT statement builder.
///
/// Clause order: `[prefixes] [WITH ...] SELECT [DISTINCT] [options] columns
/// [FROM] [joins] [WHERE] [GROUP BY] [HAVING] [ORDER BY] [LIMIT] [OFFSET]
/// [suffixes] [UNION ...] [UNION ALL ...]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectBuilder {
    pub(super) format: PlaceholderFormat,
    prefixes: Clause,
    ctes: Arc<Vec<Cte>>,
    distinct: bool,
    options: Clause,
    columns: Clause,
    from: Option<Arc<Expr>>,
    joins: Clause,
    where_parts: Clause,
    group_bys: Clause,
    having_parts: Clause,
    order_bys: Clause,
    limit: Option<u64>,
    offset: Option<u64>,
    suffixes: Clause,
    unions: Clause,
    union_alls: Clause,
}

impl SelectBuilder {
    /// Empty SELECT; add columns before rendering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder format applied by `to_sql`.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    // ==================== Prefix / CTE ====================

    /// Expression written before everything else.
    pub fn prefix(mut self, prefix: impl Into<Expr>) -> Self {
        self.prefixes.push(prefix);
        self
    }

    /// Inline `WITH` entry.
    pub fn with(mut self, cte: Cte) -> Self {
        Arc::make_mut(&mut self.ctes).push(cte);
        self
    }

    // ==================== Columns ====================

    /// `SELECT DISTINCT`.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Keyword written after `SELECT [DISTINCT]`, e.g. `SQL_NO_CACHE`.
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

    /// Append result columns by name.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in columns {
            self.columns.push(column.into());
        }
        self
    }

    /// Append one result column: a name, an expression, a CASE or a sub-select.
    pub fn column(mut self, column: impl Into<Expr>) -> Self {
        self.columns.push(column);
        self
    }

    /// Drop every result column.
    pub fn remove_columns(mut self) -> Self {
        self.columns.clear();
        self
    }

    // ==================== FROM ====================

    /// `FROM <table>`; replaces any previous FROM.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.from = Some(Arc::new(Expr::from(table.into())));
        self
    }

    /// `FROM (<sub>) AS <alias>`
    pub fn from_select(mut self, sub: SelectBuilder, name: impl Into<String>) -> Self {
        self.from = Some(Arc::new(alias(Statement::Select(sub), name)));
        self
    }

    /// FROM an arbitrary expression.
    pub fn from_expr(mut self, from: impl Into<Expr>) -> Self {
        self.from = Some(Arc::new(from.into()));
        self
    }

    // ==================== JOIN ====================

    /// Raw join clause, keyword included.
    pub fn join_clause(mut self, join: impl Into<Expr>) -> Self {
        self.joins.push(join);
        self
    }

    /// `JOIN <join>`, e.g. `"orders o ON o.user_id = u.id"`.
    pub fn join(self, join: impl Into<Expr>) -> Self {
        self.join_with("JOIN", join)
    }

    /// `LEFT JOIN <join>`.
    pub fn left_join(self, join: impl Into<Expr>) -> Self {
        self.join_with("LEFT JOIN", join)
    }

    /// `RIGHT JOIN <join>`.
    pub fn right_join(self, join: impl Into<Expr>) -> Self {
        self.join_with("RIGHT JOIN", join)
    }

    /// `INNER JOIN <join>`.
    pub fn inner_join(self, join: impl Into<Expr>) -> Self {
        self.join_with("INNER JOIN", join)
    }

    /// `CROSS JOIN <join>`.
    pub fn cross_join(self, join: impl Into<Expr>) -> Self {
        self.join_with("CROSS JOIN", join)
    }

    /// `FULL JOIN <join>`.
    pub fn full_join(self, join: impl Into<Expr>) -> Self {
        self.join_with("FULL JOIN", join)
    }

    fn join_with(mut self, keyword: &str, join: impl Into<Expr>) -> Self {
        let join: Expr = join.into();
        self.joins
            .push(Expr::Concat(vec![Value::from(format!("{keyword} ")), Value::from(join)]));
        self
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

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

    /// Append GROUP BY expressions.
    pub fn group_by<I, S>(mut self, group_bys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for group_by in group_bys {
            self.group_bys.push(group_by.into());
        }
        self
    }

    /// Add a HAVING part; parts are joined with AND.
    pub fn having(mut self, pred: impl Into<Expr>) -> Self {
        let pred = pred.into();
        if !pred.is_blank() {
            self.having_parts.push(pred);
        }
        self
    }

    /// HAVING part from SQL text and arguments.
    pub fn having_sql<V: Into<Value>>(self, sql: &str, args: impl IntoIterator<Item = V>) -> Self {
        self.having(expr(sql, args))
    }

    // ==================== ORDER BY / LIMIT / OFFSET ====================

    /// Append ORDER BY entries, e.g. `"created_at DESC"`.
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

    /// ORDER BY entry with arguments, e.g. `expr("id = ? DESC", [1])`.
    pub fn order_by_clause(mut self, clause: impl Into<Expr>) -> Self {
        self.order_bys.push(clause);
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Clear LIMIT.
    pub fn remove_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Clear OFFSET.
    pub fn remove_offset(mut self) -> Self {
        self.offset = None;
        self
    }

    // ==================== Suffix / UNION ====================

    /// Expression written after the last clause, before any UNION.
    pub fn suffix(mut self, suffix: impl Into<Expr>) -> Self {
        self.suffixes.push(suffix);
        self
    }

    /// `UNION <query>`: SQL text or a sub-select, written without parentheses.
    pub fn union(mut self, other: impl Into<Expr>) -> Self {
        self.unions.push(other);
        self
    }

    /// `UNION ALL <query>`; always written after every [`union`](Self::union).
    pub fn union_all(mut self, other: impl Into<Expr>) -> Self {
        self.union_alls.push(other);
        self
    }

    pub(super) fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.columns.is_empty() {
            return Err(SqlError::incomplete("select", "at least one result column"));
        }

        if self.prefixes.write(w, "", " ")? {
            w.push_str(" ");
        }

        if !self.ctes.is_empty() {
            w.push_str("WITH ");
            write_ctes(&self.ctes, w)?;
            w.push_str(" ");
        }

        w.push_str("SELECT ");
        if self.distinct {
            w.push_str("DISTINCT ");
        }
        if self.options.write(w, "", " ")? {
            w.push_str(" ");
        }

        if !self.columns.write(w, "", ", ")? {
            return Err(SqlError::incomplete("select", "at least one result column"));
        }

        if let Some(from) = &self.from {
            w.push_str(" FROM ");
            from.render_into(w)?;
        }

        self.joins.write(w, " ", " ")?;
        self.where_parts.write(w, " WHERE ", " AND ")?;
        self.group_bys.write(w, " GROUP BY ", ", ")?;
        self.having_parts.write(w, " HAVING ", " AND ")?;
        self.order_bys.write(w, " ORDER BY ", ", ")?;

        if let Some(limit) = self.limit {
            w.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            w.push_str(&format!(" OFFSET {offset}"));
        }

        self.suffixes.write(w, " ", " ")?;

        write_union_parts(&self.unions, " UNION ", w)?;
        write_union_parts(&self.union_alls, " UNION ALL ", w)?;
        Ok(())
    }
}

fn write_union_parts(parts: &Clause, keyword: &str, w: &mut SqlWriter) -> SqlResult<()> {
    for part in parts.iter().filter(|p| !p.is_blank()) {
        w.push_str(keyword);
        match part {
            Expr::Statement(stmt) => stmt.render_into(w)?,
            other => other.render_into(w)?,
        }
    }
    Ok(())
}
