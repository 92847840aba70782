use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A persisted event.
///
/// `our_id` is the external-facing key every client-visible operation uses;
/// `id` stays internal to the database and foreign keys.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(skip_serializing)]
    pub id: String,
    pub our_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image: String,
    pub category: Option<String>,
    pub max_attendees: Option<i64>,
    #[serde(skip_serializing)]
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// URL or uploaded filename. Falls back to the placeholder when absent.
    #[serde(alias = "imageUrl")]
    pub image: Option<String>,
    pub category: Option<String>,
    pub max_attendees: Option<i64>,
}

/// Partial update applied by the creator. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(alias = "imageUrl")]
    pub image: Option<String>,
    pub category: Option<String>,
    pub max_attendees: Option<i64>,
}

impl EventPatch {
    /// Apply this patch on top of an existing event, mirroring the original
    /// load-mutate-save flow.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(location) = &self.location {
            event.location = Some(location.clone());
        }
        if let Some(date) = self.date {
            event.date = Some(date);
        }
        if let Some(end_date) = self.end_date {
            event.end_date = Some(end_date);
        }
        if let Some(image) = &self.image {
            event.image = image.clone();
        }
        if let Some(category) = &self.category {
            event.category = Some(category.clone());
        }
        if let Some(max_attendees) = self.max_attendees {
            event.max_attendees = Some(max_attendees);
        }
    }
}
