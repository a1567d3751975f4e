//! # sqlfluent
//!
//! A fluent, immutable SQL statement builder.
//!
//! ## Features
//!
//! - **Values, not strings**: every argument travels as a bound parameter, never spliced into SQL
//! - **Immutable builders**: each setter returns a new builder, so partial queries can be branched
//! - **Composable**: statements nest as subqueries, CTEs, `EXISTS` predicates and set operations
//! - **Placeholder formats**: `?`, `$n`, `:n` and `@pn`, applied once on the outermost statement
//! - **Runner adapter**: execute through `tokio-postgres` clients, with logging and a statement cache
//!
//! ```ignore
//! use sqlfluent::{Eq, Gt, Or, PlaceholderFormat, Sqlizer, select};
//!
//! let (sql, args) = select()
//!     .columns(["id", "name"])
//!     .from("users")
//!     .where_(Eq::new().with("status", "active"))
//!     .where_(Or::new().with(Gt::new().with("age", 18)).with("vip"))
//!     .order_by(["created_at DESC"])
//!     .limit(10)
//!     .placeholder_format(PlaceholderFormat::Dollar)
//!     .to_sql()?;
//! // SELECT id, name FROM users WHERE status = $1 AND (age > $2 OR vip)
//! //     ORDER BY created_at DESC LIMIT 10
//! ```

pub mod columns;
pub mod debug;
pub mod error;
pub mod expr;
pub mod placeholder;
pub mod runner;
pub mod stmt;
pub mod stmt_cache;
pub mod traits;
pub mod value;

pub use columns::ToColumns;
pub use debug::debug_sql;
pub use error::{SqlError, SqlResult};
pub use expr::{
    And, ColumnMap, Eq, Expr, Fragment, Gt, GtOrEq, ILike, Like, Lt, LtOrEq, MapOp, NotEq,
    NotILike, NotLike, Or, alias, concat, exists, expr, not_exists, placeholders,
};
pub use placeholder::PlaceholderFormat;
pub use runner::{
    LoggingRunner, Operation, Runner, RunnerConfig, exec_with, query_row_with, query_with,
};
pub use stmt::{
    CaseBuilder, CreateTableBuilder, Cte, DeleteBuilder, DropTableBuilder, InsertBuilder,
    SelectBuilder, SetBuilder, SetOp, Statement, StatementBuilder, UpdateBuilder, WithBuilder,
    case, case_value, create_table, delete, drop_table, insert, replace, select, select_from_set,
    set, update, with,
};
pub use stmt_cache::{CacheConfig, StatementCache, StmtCacher};
pub use traits::Sqlizer;
pub use value::Value;
