//! Debug rendering with arguments inlined.

use crate::traits::Sqlizer;
use crate::value::Value;

/// Render `s` with every argument inlined as a quoted literal.
///
/// Only meant for logs: the output is not safe to execute. Render failures and
/// marker/argument count mismatches come back as a bracketed message instead
/// of an error.
pub fn debug_sql<S: Sqlizer + ?Sized>(s: &S) -> String {
    let (sql, args) = match s.render() {
        Ok(rendered) => rendered,
        Err(e) => return format!("[to_sql error: {e}]"),
    };

    let mut out = String::with_capacity(sql.len() + args.len() * 8);
    let mut args_iter = args.iter();
    let mut rest = sql.as_str();

    while let Some(pos) = rest.find('?') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with("??") {
            out.push('?');
            rest = &rest[2..];
            continue;
        }
        rest = &rest[1..];

        match args_iter.next() {
            Some(value) => push_literal(&mut out, value),
            None => {
                return format!(
                    "[debug_sql error: too many placeholders in {sql:?} for {} args]",
                    args.len()
                );
            }
        }
    }

    if args_iter.next().is_some() {
        return format!(
            "[debug_sql error: not enough placeholders in {sql:?} for {} args]",
            args.len()
        );
    }

    out.push_str(rest);
    out
}

fn push_literal(out: &mut String, value: &Value) {
    if value.is_null() {
        out.push_str("NULL");
        return;
    }
    out.push('\'');
    out.push_str(&value.to_string().replace('\'', "''"));
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Eq, Lt, expr};
    use crate::{And, args};

    #[test]
    fn test_inlines_arguments() {
        let e = And::new()
            .with(Eq::new().with("x", 1).with("y", "text"))
            .with(expr("z = ?", ["?"]));
        assert_eq!(debug_sql(&e), "(x = '1' AND y = 'text' AND z = '?')");
    }

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(debug_sql(&expr("name = ?", ["O'Brien"])), "name = 'O''Brien'");
    }

    #[test]
    fn test_null_is_bare() {
        assert_eq!(debug_sql(&expr("a = ?", args![None::<i32>])), "a = NULL");
    }

    #[test]
    fn test_escape_collapses() {
        assert_eq!(debug_sql(&expr("a ??| b AND c = ?", [1])), "a ?| b AND c = '1'");
    }

    #[test]
    fn test_count_mismatch_is_reported() {
        let too_many = debug_sql(&expr("a = ? AND b = ?", [1]));
        assert!(too_many.starts_with("[debug_sql error: too many placeholders"));

        let not_enough = debug_sql(&expr("a = ?", [1, 2]));
        assert!(not_enough.starts_with("[debug_sql error: not enough placeholders"));
    }

    #[test]
    fn test_render_error_is_reported() {
        let out = debug_sql(&Lt::new().with("a", None::<i32>));
        assert!(out.starts_with("[to_sql error:"));
    }
}
