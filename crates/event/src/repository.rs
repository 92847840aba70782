use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::model::{Event, EventPatch, NewEvent};
use crate::PLACEHOLDER_IMAGE;

const SELECT_EVENT: &str = "SELECT id, our_id, title, description, location, date, end_date, \
     image, category, max_attendees, created_by, created_at FROM events";

/// Gateway to the `events` table (and the counter that mints external ids).
#[derive(Clone)]
pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create an event owned by `creator_id`.
    ///
    /// The external id comes from the persisted `counters` row, incremented
    /// inside the same transaction as the insert, so ids stay unique across
    /// restarts and concurrent requests. The creator link (`created_by`) is
    /// part of the inserted row, which makes "event exists without its
    /// creator link" unrepresentable.
    pub async fn create(&self, creator_id: &str, input: NewEvent) -> EventResult<Event> {
        input
            .validate()
            .map_err(|e| EventError::ValidationError(e.to_string()))?;

        let mut tx = self.pool.begin().await?;

        let our_id: i64 = sqlx::query_scalar(
            "UPDATE counters SET value = value + 1 WHERE name = 'event_our_id' RETURNING value",
        )
        .fetch_one(&mut *tx)
        .await?;

        let event = Event {
            id: Uuid::new_v4().to_string(),
            our_id,
            title: input.title,
            description: input.description,
            location: input.location,
            date: input.date,
            end_date: input.end_date,
            image: input
                .image
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            category: input.category,
            max_attendees: input.max_attendees,
            created_by: creator_id.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO events (id, our_id, title, description, location, date, end_date, \
             image, category, max_attendees, created_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .bind(&event.id)
        .bind(event.our_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date)
        .bind(event.end_date)
        .bind(&event.image)
        .bind(&event.category)
        .bind(event.max_attendees)
        .bind(&event.created_by)
        .bind(event.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(our_id = event.our_id, creator = %event.created_by, "event created");

        Ok(event)
    }

    pub async fn find_by_our_id(&self, our_id: i64) -> EventResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!("{SELECT_EVENT} WHERE our_id = ?1"))
            .bind(our_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    /// All events, insertion order. No matches is an empty list, not an error.
    pub async fn list_all(&self) -> EventResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!("{SELECT_EVENT} ORDER BY our_id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    /// All events sorted by start date ascending; undated events sort last.
    pub async fn list_sorted_by_date(&self) -> EventResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "{SELECT_EVENT} ORDER BY date IS NULL, date ASC, our_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Apply a patch to the event addressed by `our_id`, creator-only.
    pub async fn update(
        &self,
        caller_id: &str,
        our_id: i64,
        patch: EventPatch,
    ) -> EventResult<Event> {
        let mut event = self
            .find_by_our_id(our_id)
            .await?
            .ok_or(EventError::NotFound)?;

        if event.created_by != caller_id {
            return Err(EventError::Forbidden);
        }

        patch.apply_to(&mut event);

        sqlx::query(
            "UPDATE events SET title = ?1, description = ?2, location = ?3, date = ?4, \
             end_date = ?5, image = ?6, category = ?7, max_attendees = ?8 WHERE id = ?9",
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date)
        .bind(event.end_date)
        .bind(&event.image)
        .bind(&event.category)
        .bind(event.max_attendees)
        .bind(&event.id)
        .execute(&self.pool)
        .await?;

        tracing::info!(our_id, "event updated");

        Ok(event)
    }

    /// Delete the event addressed by `our_id`, creator-only.
    ///
    /// Membership rows referencing the event are pruned in the same
    /// transaction so no attendee keeps a dangling reference.
    pub async fn delete(&self, caller_id: &str, our_id: i64) -> EventResult<()> {
        let event = self
            .find_by_our_id(our_id)
            .await?
            .ok_or(EventError::NotFound)?;

        if event.created_by != caller_id {
            return Err(EventError::Forbidden);
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM memberships WHERE event_id = ?1")
            .bind(&event.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM events WHERE id = ?1")
            .bind(&event.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(our_id, "event deleted");

        Ok(())
    }
}
