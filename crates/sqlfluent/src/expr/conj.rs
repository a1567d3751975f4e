//! AND / OR conjunctions.

use super::{Expr, SqlWriter, render_non_empty};
use crate::error::SqlResult;
use crate::traits::Sqlizer;
use crate::value::Value;

/// Members whose SQL renders empty are skipped; with no survivors the
/// conjunction collapses to `identity`.
pub(super) fn render_conj(
    members: &[Expr],
    joiner: &str,
    identity: &str,
    w: &mut SqlWriter,
) -> SqlResult<()> {
    let rendered = render_non_empty(members)?;
    if rendered.is_empty() {
        w.push_str(identity);
        return Ok(());
    }

    w.push_str("(");
    w.push_rendered(rendered, joiner);
    w.push_str(")");
    Ok(())
}

macro_rules! conjunction {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Debug, Default, PartialEq)]
            pub struct $name(Vec<Expr>);

            impl $name {
                /// Empty conjunction; renders its identity literal.
                pub fn new() -> Self {
                    Self::default()
                }

                /// Append a member expression.
                pub fn with(mut self, member: impl Into<Expr>) -> Self {
                    self.0.push(member.into());
                    self
                }

                /// Add a member in place.
                pub fn push(&mut self, member: impl Into<Expr>) {
                    self.0.push(member.into());
                }

                pub fn len(&self) -> usize {
                    self.0.len()
                }

                pub fn is_empty(&self) -> bool {
                    self.0.is_empty()
                }
            }

            impl<E: Into<Expr>> FromIterator<E> for $name {
                fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
                    Self(iter.into_iter().map(Into::into).collect())
                }
            }

            impl From<$name> for Expr {
                fn from(conj: $name) -> Self {
                    Expr::$name(conj.0)
                }
            }

            impl From<$name> for Value {
                fn from(conj: $name) -> Self {
                    Value::from(Expr::from(conj))
                }
            }

            impl Sqlizer for $name {
                fn render(&self) -> SqlResult<(String, Vec<Value>)> {
                    let mut w = SqlWriter::new();
                    Expr::$name(self.0.clone()).render_into(&mut w)?;
                    Ok(w.finish())
                }
            }
        )*
    };
}

conjunction! {
    /// `(a AND b AND ...)`; renders `(1=1)` when empty.
    And;
    /// `(a OR b OR ...)`; renders `(1=0)` when empty.
    Or;
}
