//! Error types for sqlfluent

use thiserror::Error;

/// Result type alias for rendering and execution.
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors produced while rendering or executing statements.
#[derive(Debug, Error)]
pub enum SqlError {
    /// A clause required by the statement kind is missing.
    #[error("{statement} statements must have {missing}")]
    IncompleteStatement {
        statement: &'static str,
        missing: &'static str,
    },

    /// A bound value has a shape the operator cannot accept.
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// An expression part is neither SQL text nor a nested expression.
    #[error("Composition error: {0}")]
    Composition(String),

    /// Writing into the render buffer failed.
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl SqlError {
    /// Create an incomplete statement error
    pub fn incomplete(statement: &'static str, missing: &'static str) -> Self {
        Self::IncompleteStatement { statement, missing }
    }

    /// Create an unsupported value error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedValue(message.into())
    }

    /// Create a composition error
    pub fn composition(message: impl Into<String>) -> Self {
        Self::Composition(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is an incomplete statement error
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::IncompleteStatement { .. })
    }

    /// Check if this is an unsupported value error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedValue(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
