use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::UserResult;
use crate::User;

/// Gateway to the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, cart_id, created_at FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a new account with no created or joined events.
    pub async fn insert(&self, email: &str, password_hash: &str) -> UserResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            cart_id: 0,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, email, password_hash, cart_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.cart_id)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }
}
