//! Event domain for Event Buddy: the event records themselves, the external
//! sequential id they are addressed by, owner-gated mutation, and attendee
//! membership (join/leave).

mod error;
mod membership;
mod model;
mod repository;

pub use error::{EventError, EventResult};
pub use membership::{join, leave, list_created, list_joined};
pub use model::{Event, EventPatch, NewEvent};
pub use repository::EventRepository;

/// Image used when an event is created without one. Matches what the mobile
/// form falls back to, so both ends render the same placeholder.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=No+Image";

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use crate::model::NewEvent;

    /// In-memory database with the subset of the schema this crate touches.
    /// A single connection, because every `:memory:` connection is its own
    /// database.
    pub async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE events (
                id TEXT PRIMARY KEY,
                our_id INTEGER NOT NULL UNIQUE,
                title TEXT NOT NULL,
                description TEXT,
                location TEXT,
                date TEXT,
                end_date TEXT,
                image TEXT NOT NULL,
                category TEXT,
                max_attendees INTEGER,
                created_by TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "CREATE TABLE memberships (
                user_id TEXT NOT NULL,
                event_id TEXT NOT NULL,
                joined_at TEXT NOT NULL,
                PRIMARY KEY (user_id, event_id)
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("CREATE TABLE counters (name TEXT PRIMARY KEY, value INTEGER NOT NULL)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO counters (name, value) VALUES ('event_our_id', 0)")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    pub fn new_event(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: None,
            location: None,
            date: None,
            end_date: None,
            image: None,
            category: None,
            max_attendees: None,
        }
    }
}
