use thiserror::Error;

/// Domain-specific errors for event and membership operations.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found")]
    NotFound,

    #[error("Only the event creator can do this")]
    Forbidden,

    #[error("You have already joined this event")]
    AlreadyJoined,

    #[error("You cannot join an event you created")]
    OwnerCannotJoin,

    #[error("You have not joined this event")]
    NotJoined,

    /// A write that was re-read for confirmation did not show the expected
    /// state. Surfaced instead of assuming the store will catch up.
    #[error("Persistence inconsistency: write not visible on re-read")]
    PersistenceInconsistency,

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type for event operations that may fail with [`EventError`].
pub type EventResult<T> = Result<T, EventError>;
