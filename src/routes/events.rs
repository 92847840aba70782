//! Event CRUD route handlers.
//!
//! Listing and fetching keep both the GET-with-query and POST-with-body
//! variants the original API exposed; clients in the wild use both.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use axum_extra::extract::Query;
use event_buddy_event::{Event, EventPatch, EventRepository, NewEvent};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::AppError;
use crate::middleware::CurrentUser;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OurIdQuery {
    pub our_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OurIdBody {
    pub our_id: i64,
}

#[derive(Serialize)]
struct EventsResponse {
    success: bool,
    events: Vec<Event>,
}

#[derive(Serialize)]
struct EventResponse {
    success: bool,
    event: Event,
}

#[derive(Serialize)]
struct DeletedResponse {
    success: bool,
}

/// GET | POST / - every event, insertion order.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let events = EventRepository::new(state.pool).list_all().await?;

    Ok(Json(EventsResponse {
        success: true,
        events,
    }))
}

/// GET /sortedEvents - every event, start date ascending.
pub async fn sorted(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let events = EventRepository::new(state.pool).list_sorted_by_date().await?;

    Ok(Json(EventsResponse {
        success: true,
        events,
    }))
}

async fn find_one(state: AppState, our_id: i64) -> Result<Json<EventResponse>, AppError> {
    let event = EventRepository::new(state.pool)
        .find_by_our_id(our_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    Ok(Json(EventResponse {
        success: true,
        event,
    }))
}

/// GET /getSpecificEvent?ourId=N
pub async fn get_specific(
    State(state): State<AppState>,
    Query(query): Query<OurIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    find_one(state, query.our_id).await
}

/// POST /getSpecificEvent with `{ourId}` body
pub async fn get_specific_body(
    State(state): State<AppState>,
    Json(body): Json<OurIdBody>,
) -> Result<impl IntoResponse, AppError> {
    find_one(state, body.our_id).await
}

/// POST /addEvent - create an event owned by the session user.
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<NewEvent>,
) -> Result<impl IntoResponse, AppError> {
    let event = EventRepository::new(state.pool)
        .create(&user.user_id, input)
        .await?;

    Ok(Json(EventResponse {
        success: true,
        event,
    }))
}

async fn apply_update(
    state: AppState,
    user: CurrentUser,
    our_id: i64,
    patch: EventPatch,
) -> Result<Json<EventResponse>, AppError> {
    let event = EventRepository::new(state.pool)
        .update(&user.user_id, our_id, patch)
        .await?;

    Ok(Json(EventResponse {
        success: true,
        event,
    }))
}

/// POST /updateSpecificEvent?ourId=N - creator-only patch. The target id
/// always comes from the request.
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<OurIdQuery>,
    Json(patch): Json<EventPatch>,
) -> Result<impl IntoResponse, AppError> {
    apply_update(state, user, query.our_id, patch).await
}

/// GET /updateSpecificEvent?ourId=N - legacy bodyless variant. Patch fields
/// ride in the query string next to the id.
pub async fn update_query(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<OurIdQuery>,
    Query(patch): Query<EventPatch>,
) -> Result<impl IntoResponse, AppError> {
    apply_update(state, user, query.our_id, patch).await
}

/// GET | POST /deleteSpecificEvent?ourId=N - creator-only delete.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<OurIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    EventRepository::new(state.pool)
        .delete(&user.user_id, query.our_id)
        .await?;

    Ok(Json(DeletedResponse { success: true }))
}
