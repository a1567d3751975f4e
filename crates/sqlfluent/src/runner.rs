//! Execution adapter.
//!
//! Statements never talk to a database themselves. A [`Runner`] receives the
//! rendered SQL and arguments and executes them; [`exec_with`], [`query_with`]
//! and [`query_row_with`] render a statement and forward the result verbatim.
//!
//! ```ignore
//! use sqlfluent::{Eq, PlaceholderFormat, query_with, select};
//!
//! let stmt = select()
//!     .columns(["id", "name"])
//!     .from("users")
//!     .where_(Eq::new().with("status", "active"))
//!     .placeholder_format(PlaceholderFormat::Dollar);
//! let rows = query_with(&client, &stmt).await?;
//! ```

use std::future::Future;

use tokio_postgres::types::ToSql;
use tracing::Level;

use crate::error::{SqlError, SqlResult};
use crate::traits::Sqlizer;
use crate::value::Value;

/// Executes rendered SQL.
pub trait Runner: Sync {
    type Row: Send;

    /// Execute a statement, returning the number of affected rows.
    fn execute(&self, sql: &str, args: &[Value]) -> impl Future<Output = SqlResult<u64>> + Send;

    /// Execute a query, returning all rows.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl Future<Output = SqlResult<Vec<Self::Row>>> + Send;

    /// Execute a query returning exactly one row ([`SqlError::NotFound`] if none).
    fn query_row(&self, sql: &str, args: &[Value])
    -> impl Future<Output = SqlResult<Self::Row>> + Send;
}

pub(crate) fn params_ref(args: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    args.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

macro_rules! impl_postgres_runner {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Runner for $ty {
                type Row = tokio_postgres::Row;

                async fn execute(&self, sql: &str, args: &[Value]) -> SqlResult<u64> {
                    let params = params_ref(args);
                    Ok(<$ty>::execute(self, sql, &params).await?)
                }

                async fn query(&self, sql: &str, args: &[Value]) -> SqlResult<Vec<Self::Row>> {
                    let params = params_ref(args);
                    Ok(<$ty>::query(self, sql, &params).await?)
                }

                async fn query_row(&self, sql: &str, args: &[Value]) -> SqlResult<Self::Row> {
                    let params = params_ref(args);
                    <$ty>::query_opt(self, sql, &params)
                        .await?
                        .ok_or_else(|| SqlError::not_found("query_row returned no rows"))
                }
            }
        )*
    };
}

impl_postgres_runner!(tokio_postgres::Client, tokio_postgres::Transaction<'_>);

/// Render `stmt` and execute it on `runner`.
pub async fn exec_with<R, S>(runner: &R, stmt: &S) -> SqlResult<u64>
where
    R: Runner,
    S: Sqlizer + ?Sized,
{
    let (sql, args) = stmt.to_sql()?;
    runner.execute(&sql, &args).await
}

/// Render `stmt` and return all rows.
pub async fn query_with<R, S>(runner: &R, stmt: &S) -> SqlResult<Vec<R::Row>>
where
    R: Runner,
    S: Sqlizer + ?Sized,
{
    let (sql, args) = stmt.to_sql()?;
    runner.query(&sql, &args).await
}

/// Render `stmt` and return exactly one row.
pub async fn query_row_with<R, S>(runner: &R, stmt: &S) -> SqlResult<R::Row>
where
    R: Runner,
    S: Sqlizer + ?Sized,
{
    let (sql, args) = stmt.to_sql()?;
    runner.query_row(&sql, &args).await
}

/// The runner operation being logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Execute,
    Query,
    QueryRow,
}

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Logging options for [`LoggingRunner`].
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

/// Runner wrapper that emits every statement on the `sqlfluent.sql` target
/// before delegating.
#[derive(Debug, Clone)]
pub struct LoggingRunner<R> {
    inner: R,
    config: RunnerConfig,
}

impl<R: Runner> LoggingRunner<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            config: RunnerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn emit(&self, op: Operation, sql: &str, param_count: usize) {
        let sql = self.config.truncate_sql(sql);
        match self.config.level {
            Level::ERROR => tracing::error!(target: "sqlfluent.sql", ?op, param_count, sql = %sql),
            Level::WARN => tracing::warn!(target: "sqlfluent.sql", ?op, param_count, sql = %sql),
            Level::INFO => tracing::info!(target: "sqlfluent.sql", ?op, param_count, sql = %sql),
            Level::DEBUG => tracing::debug!(target: "sqlfluent.sql", ?op, param_count, sql = %sql),
            Level::TRACE => tracing::trace!(target: "sqlfluent.sql", ?op, param_count, sql = %sql),
        }
    }
}

impl<R: Runner> Runner for LoggingRunner<R> {
    type Row = R::Row;

    async fn execute(&self, sql: &str, args: &[Value]) -> SqlResult<u64> {
        self.emit(Operation::Execute, sql, args.len());
        self.inner.execute(sql, args).await
    }

    async fn query(&self, sql: &str, args: &[Value]) -> SqlResult<Vec<Self::Row>> {
        self.emit(Operation::Query, sql, args.len());
        self.inner.query(sql, args).await
    }

    async fn query_row(&self, sql: &str, args: &[Value]) -> SqlResult<Self::Row> {
        self.emit(Operation::QueryRow, sql, args.len());
        self.inner.query_row(sql, args).await
    }
}
