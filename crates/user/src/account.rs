use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;
use crate::User;

/// Signup input validated before any database work.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupInput {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Create a new account.
///
/// Fails with [`UserError::EmailAlreadyExists`] when the email is taken. The
/// unique index on `users.email` backs up the pre-check, so a concurrent
/// signup race still yields the same error instead of a duplicate row.
pub async fn signup(pool: &SqlitePool, pepper: &str, input: SignupInput) -> UserResult<User> {
    input
        .validate()
        .map_err(|e| UserError::ValidationError(e.to_string()))?;

    let repo = UserRepository::new(pool.clone());

    if repo.find_by_email(&input.email).await?.is_some() {
        return Err(UserError::EmailAlreadyExists);
    }

    let password_hash = hash_password(&input.password, pepper)?;

    match repo.insert(&input.email, &password_hash).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user registered");
            Ok(user)
        }
        Err(UserError::DatabaseError(sqlx::Error::Database(db_err)))
            if db_err.is_unique_violation() =>
        {
            Err(UserError::EmailAlreadyExists)
        }
        Err(err) => Err(err),
    }
}

/// Authenticate an account by email and password.
///
/// Unknown email and wrong password are collapsed into a single
/// [`UserError::InvalidCredentials`] so responses cannot be used to probe
/// which emails are registered.
pub async fn signin(
    pool: &SqlitePool,
    pepper: &str,
    email: &str,
    password: &str,
) -> UserResult<User> {
    let repo = UserRepository::new(pool.clone());

    let user = repo
        .find_by_email(email)
        .await?
        .ok_or(UserError::InvalidCredentials)?;

    if !verify_password(password, pepper, &user.password_hash)? {
        return Err(UserError::InvalidCredentials);
    }

    Ok(user)
}
