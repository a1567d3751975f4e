//! Explicit entity to column mapping.

use crate::value::Value;

/// Maps an entity onto `(column, value)` pairs for INSERT and UPDATE.
///
/// ```ignore
/// struct User { name: String, age: i32 }
///
/// impl ToColumns for User {
///     fn to_columns(&self) -> Vec<(String, Value)> {
///         vec![
///             ("name".into(), Value::from(&self.name)),
///             ("age".into(), Value::from(self.age)),
///         ]
///     }
/// }
///
/// let stmt = insert("users").set_columns(&user);
/// ```
pub trait ToColumns {
    /// Pairs in the order the columns should be written.
    fn to_columns(&self) -> Vec<(String, Value)>;
}

impl<T: ToColumns + ?Sized> ToColumns for &T {
    fn to_columns(&self) -> Vec<(String, Value)> {
        (**self).to_columns()
    }
}
