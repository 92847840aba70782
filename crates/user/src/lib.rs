//! Account domain for Event Buddy: user records, password hashing and the
//! signup/signin operations backed by the `users` table.

mod account;
mod error;
mod password;
mod repository;

pub use account::{signin, signup, SignupInput};
pub use error::{UserError, UserResult};
pub use password::{hash_password, verify_password};
pub use repository::UserRepository;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted user account.
///
/// `cart_id` is a legacy field carried over from the first iteration of the
/// backend; nothing reads it today but it still travels in the session.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub cart_id: i64,
    pub created_at: DateTime<Utc>,
}
