//! Placeholder formats.
//!
//! Statements render with neutral `?` markers; the top-level `to_sql` call
//! rewrites them once, left to right, into the target dialect. `??` is the
//! escape for a literal `?` and never consumes a number.

use std::fmt::Write;

use crate::error::SqlResult;

/// Target syntax for positional placeholders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaceholderFormat {
    /// `?` (MySQL, SQLite). The SQL is returned unchanged, `??` included.
    #[default]
    Question,
    /// `$1, $2, ...` (PostgreSQL)
    Dollar,
    /// `:1, :2, ...` (Oracle)
    Colon,
    /// `@p1, @p2, ...` (SQL Server)
    AtP,
}

impl PlaceholderFormat {
    /// Rewrite every `?` marker in `sql`.
    pub fn replace_placeholders(self, sql: &str) -> SqlResult<String> {
        match self {
            PlaceholderFormat::Question => Ok(sql.to_string()),
            PlaceholderFormat::Dollar => replace_numbered(sql, "$"),
            PlaceholderFormat::Colon => replace_numbered(sql, ":"),
            PlaceholderFormat::AtP => replace_numbered(sql, "@p"),
        }
    }
}

fn replace_numbered(sql: &str, prefix: &str) -> SqlResult<String> {
    let mut out = String::with_capacity(sql.len() + 16);
    let mut n = 0usize;
    let mut rest = sql;

    while let Some(pos) = rest.find('?') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with("??") {
            out.push('?');
            rest = &rest[2..];
            continue;
        }

        n += 1;
        write!(out, "{prefix}{n}")?;
        rest = &rest[1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_is_identity() {
        let sql = "x = ? AND y ??| z";
        assert_eq!(PlaceholderFormat::Question.replace_placeholders(sql).unwrap(), sql);
    }

    #[test]
    fn test_numbered_formats() {
        let sql = "x = ? AND y = ?";
        assert_eq!(
            PlaceholderFormat::Dollar.replace_placeholders(sql).unwrap(),
            "x = $1 AND y = $2"
        );
        assert_eq!(
            PlaceholderFormat::Colon.replace_placeholders(sql).unwrap(),
            "x = :1 AND y = :2"
        );
        assert_eq!(
            PlaceholderFormat::AtP.replace_placeholders(sql).unwrap(),
            "x = @p1 AND y = @p2"
        );
    }

    #[test]
    fn test_dollar_keeps_escaped_marker() {
        let sql = r#"SELECT uuid, "data" #> '{tags}' AS tags FROM nodes WHERE "data" -> 'tags' ??| array['?'] AND enabled = ?"#;
        let expected = r#"SELECT uuid, "data" #> '{tags}' AS tags FROM nodes WHERE "data" -> 'tags' ?| array['$1'] AND enabled = $2"#;
        assert_eq!(
            PlaceholderFormat::Dollar.replace_placeholders(sql).unwrap(),
            expected
        );
    }

    #[test]
    fn test_counter_is_per_call() {
        let f = PlaceholderFormat::Dollar;
        assert_eq!(f.replace_placeholders("?").unwrap(), "$1");
        assert_eq!(f.replace_placeholders("?").unwrap(), "$1");
    }

    #[test]
    fn test_no_markers() {
        assert_eq!(
            PlaceholderFormat::Colon.replace_placeholders("SELECT 1").unwrap(),
            "SELECT 1"
        );
    }
}
