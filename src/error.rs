// Error taxonomy shared by the parser, store, rules and HTTP layer

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoanError {
    /// Malformed intake data or a record missing a required field
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Rule inputs that cannot be evaluated (e.g. zero loan duration)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown client, only raised when strict lookup is enabled
    #[error("Client not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;

impl LoanError {
    /// Stable machine-readable code, used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            LoanError::Validation(_) => "VALIDATION_ERROR",
            LoanError::InvalidInput(_) => "INVALID_INPUT",
            LoanError::NotFound(_) => "NOT_FOUND",
            LoanError::Database(_) | LoanError::Io { .. } => "INTERNAL_ERROR",
        }
    }
}
