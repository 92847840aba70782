use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use event_buddy_event::EventError;
use event_buddy_user::UserError;
use serde::Serialize;
use thiserror::Error;

/// Application-level errors, mapped to the JSON envelope at the route
/// boundary. Every failure becomes `{success: false, message}` with a real
/// status code; nothing crashes the process.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Not authenticated")]
    AuthRequired,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Persistence inconsistency")]
    PersistenceInconsistency,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(String),
}

/// The uniform failure envelope.
#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthRequired => (StatusCode::UNAUTHORIZED, "Not authenticated".to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::PersistenceInconsistency => {
                tracing::error!("post-write verification mismatch");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        let body = ErrorBody {
            success: false,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists => AppError::Conflict(err.to_string()),
            UserError::InvalidCredentials => AppError::Validation(err.to_string()),
            UserError::NotFound => AppError::NotFound(err.to_string()),
            UserError::ValidationError(msg) => AppError::Validation(msg),
            UserError::DatabaseError(e) => AppError::Database(e),
            UserError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound => AppError::NotFound(err.to_string()),
            EventError::Forbidden => AppError::Forbidden(err.to_string()),
            EventError::AlreadyJoined | EventError::OwnerCannotJoin | EventError::NotJoined => {
                AppError::Conflict(err.to_string())
            }
            EventError::PersistenceInconsistency => AppError::PersistenceInconsistency,
            EventError::ValidationError(msg) => AppError::Validation(msg),
            EventError::DatabaseError(e) => AppError::Database(e),
        }
    }
}
