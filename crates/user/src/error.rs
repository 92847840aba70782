use thiserror::Error;

/// Domain-specific errors for account operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("An account with this email already exists")]
    EmailAlreadyExists,

    /// Covers both unknown email and wrong password so that signin failures
    /// never reveal whether an account exists.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error("Password hashing failed: {0}")]
    HashingError(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type for account operations that may fail with [`UserError`].
pub type UserResult<T> = Result<T, UserError>;
