//! Error types for Bookstore Core

use thiserror::Error;

/// Result type for client-side validation
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Result type for session store operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Errors raised by client-side form checks, before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Price must be a non-negative number")]
    InvalidPrice,

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Basket is empty")]
    EmptyBasket,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Page size must be greater than zero")]
    InvalidPageSize,
}

/// Errors raised by session store backends
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session backend error: {0}")]
    Backend(String),

    #[error("Corrupt session data: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Corrupt(err.to_string())
    }
}
