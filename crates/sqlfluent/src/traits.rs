//! Trait definitions for renderable SQL.

use crate::error::SqlResult;
use crate::value::Value;

/// Anything that renders into SQL text plus positional arguments.
///
/// `render` always emits neutral `?` markers so the result can be spliced into
/// an enclosing statement. Top-level statements override `to_sql` to rewrite
/// the markers into their configured [`PlaceholderFormat`](crate::PlaceholderFormat).
pub trait Sqlizer {
    /// Render with neutral `?` markers.
    fn render(&self) -> SqlResult<(String, Vec<Value>)>;

    /// Render the final SQL and arguments.
    fn to_sql(&self) -> SqlResult<(String, Vec<Value>)> {
        self.render()
    }

    /// Like [`to_sql`](Sqlizer::to_sql), for statements known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if rendering fails.
    fn must_sql(&self) -> (String, Vec<Value>) {
        match self.to_sql() {
            Ok(rendered) => rendered,
            Err(e) => panic!("failed to render SQL: {e}"),
        }
    }
}
