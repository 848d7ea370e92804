// Defines the request-level error type and a result type alias using the thiserror crate.
use thiserror::Error;

use crate::services::StoreError;

// Make the response module public
pub mod response;

#[derive(Error, Debug)]
pub enum AppError {
    // Missing or unverifiable token; the caller never reached an identity
    #[error("{0}")]
    Unauthenticated(String),

    // Authenticated caller failing the ownership check
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    // New password identical to the one already stored
    #[error("{0}")]
    Conflict(String),

    // Bulk reassignment matched no creator-owned tasks
    #[error("No tasks found to assign!")]
    NoTasksToAssign,

    // The #[from] attribute converts a StoreError into an AppError::Store using the From trait.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    // Failure while signing a token; verification failures map to Unauthenticated instead
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
