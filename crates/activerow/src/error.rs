//! Error types for activerow

use thiserror::Error;

/// Result type alias for activerow operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for query building and row persistence
#[derive(Debug, Error)]
pub enum OrmError {
    /// Statement assembly error (bad operator arity, unknown join kind, ...)
    #[error("Build error: {0}")]
    Build(String),

    /// Row not found. A normal outcome of single-row finders, not a failure
    /// of the database itself; callers branch on [`OrmError::is_not_found`].
    #[error("Not found: {0}")]
    NotFound(String),

    /// Driver-reported failure while preparing or executing a statement
    #[error("Database error: {0}")]
    Database(String),

    /// Field decode/coercion error
    #[error("Decode error on field '{field}': {message}")]
    Decode { field: String, message: String },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OrmError {
    /// Create a build error
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create a decode error for a specific field
    pub fn decode(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a database error
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for OrmError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => Self::NotFound("no rows returned".into()),
            other => Self::Database(other.to_string()),
        }
    }
}
