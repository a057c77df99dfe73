//! Application error type
//!
//! Every failure surfaced by the engines maps 1:1 to an HTTP status in the
//! API layer. Nothing is retried internally; a store failure aborts the
//! request that triggered it.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Referenced user/set/task/question does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Authenticated user does not own the resource being mutated.
    #[error("{0}")]
    Forbidden(String),

    /// Missing or invalid credential.
    #[error("{0}")]
    Unauthorized(String),

    /// Missing required field or malformed payload.
    #[error("{0}")]
    InvalidInput(String),

    /// Duplicate registration identifier.
    #[error("{0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn forbidden(what: impl Into<String>) -> Self {
        Self::Forbidden(what.into())
    }

    pub fn unauthorized(what: impl Into<String>) -> Self {
        Self::Unauthorized(what.into())
    }

    pub fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidInput(what.into())
    }

    pub fn conflict(what: impl Into<String>) -> Self {
        Self::Conflict(what.into())
    }

    /// HTTP status code for this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::NotFound(_) => 404,
            AppError::Forbidden(_) => 403,
            AppError::Unauthorized(_) => 401,
            AppError::InvalidInput(_) => 400,
            AppError::Conflict(_) => 409,
            AppError::Storage(_) => 500,
        }
    }
}
