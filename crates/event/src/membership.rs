//! Attendee membership: the join/leave relationship between users and events
//! they did not create.
//!
//! Both mutations re-read the membership row after the write and fail with
//! [`EventError::PersistenceInconsistency`] when the re-read does not show
//! the expected state. The original backend double-checked its writes this
//! way and the behavior is kept as-is.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{EventError, EventResult};
use crate::model::Event;
use crate::repository::EventRepository;

async fn membership_exists(pool: &SqlitePool, user_id: &str, event_id: &str) -> EventResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM memberships WHERE user_id = ?1 AND event_id = ?2",
    )
    .bind(user_id)
    .bind(event_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Join the event addressed by `our_id`.
pub async fn join(pool: &SqlitePool, user_id: &str, our_id: i64) -> EventResult<()> {
    let repo = EventRepository::new(pool.clone());
    let event = repo
        .find_by_our_id(our_id)
        .await?
        .ok_or(EventError::NotFound)?;

    if event.created_by == user_id {
        return Err(EventError::OwnerCannotJoin);
    }

    // The memberships primary key is (user_id, event_id); a duplicate join
    // surfaces as a unique violation, concurrent attempts included.
    let inserted =
        sqlx::query("INSERT INTO memberships (user_id, event_id, joined_at) VALUES (?1, ?2, ?3)")
            .bind(user_id)
            .bind(&event.id)
            .bind(Utc::now())
            .execute(pool)
            .await;

    match inserted {
        Ok(_) => {}
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(EventError::AlreadyJoined);
        }
        Err(err) => return Err(err.into()),
    }

    // Confirm the write landed before reporting success.
    if !membership_exists(pool, user_id, &event.id).await? {
        tracing::error!(user_id, our_id, "join write not visible on re-read");
        return Err(EventError::PersistenceInconsistency);
    }

    tracing::info!(user_id, our_id, "user joined event");

    Ok(())
}

/// Leave the event addressed by `our_id`.
pub async fn leave(pool: &SqlitePool, user_id: &str, our_id: i64) -> EventResult<()> {
    let repo = EventRepository::new(pool.clone());
    let event = repo
        .find_by_our_id(our_id)
        .await?
        .ok_or(EventError::NotFound)?;

    if !membership_exists(pool, user_id, &event.id).await? {
        return Err(EventError::NotJoined);
    }

    sqlx::query("DELETE FROM memberships WHERE user_id = ?1 AND event_id = ?2")
        .bind(user_id)
        .bind(&event.id)
        .execute(pool)
        .await?;

    // Confirm the removal landed before reporting success.
    if membership_exists(pool, user_id, &event.id).await? {
        tracing::error!(user_id, our_id, "leave write not visible on re-read");
        return Err(EventError::PersistenceInconsistency);
    }

    tracing::info!(user_id, our_id, "user left event");

    Ok(())
}

/// Events the user created, fully populated.
pub async fn list_created(pool: &SqlitePool, user_id: &str) -> EventResult<Vec<Event>> {
    let events = sqlx::query_as::<_, Event>(
        "SELECT id, our_id, title, description, location, date, end_date, image, category, \
         max_attendees, created_by, created_at FROM events WHERE created_by = ?1 ORDER BY our_id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(events)
}

/// Events the user joined, fully populated, in join order.
pub async fn list_joined(pool: &SqlitePool, user_id: &str) -> EventResult<Vec<Event>> {
    let events = sqlx::query_as::<_, Event>(
        "SELECT e.id, e.our_id, e.title, e.description, e.location, e.date, e.end_date, \
         e.image, e.category, e.max_attendees, e.created_by, e.created_at
         FROM events e
         INNER JOIN memberships m ON m.event_id = e.id
         WHERE m.user_id = ?1
         ORDER BY m.joined_at, e.our_id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(events)
}
