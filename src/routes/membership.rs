//! Join/leave and membership-listing route handlers.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use event_buddy_event::Event;
use serde::Serialize;

use super::events::OurIdBody;
use super::AppState;
use crate::error::AppError;
use crate::middleware::CurrentUser;

#[derive(Serialize)]
struct ToggleResponse {
    success: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedEventsResponse {
    success: bool,
    created_events: Vec<Event>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinedEventsResponse {
    success: bool,
    joined_events: Vec<Event>,
}

/// POST /joinEvent with `{ourId}` body.
pub async fn join(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<OurIdBody>,
) -> Result<impl IntoResponse, AppError> {
    event_buddy_event::join(&state.pool, &user.user_id, body.our_id).await?;

    Ok(Json(ToggleResponse { success: true }))
}

/// POST /leaveEvent with `{ourId}` body.
pub async fn leave(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<OurIdBody>,
) -> Result<impl IntoResponse, AppError> {
    event_buddy_event::leave(&state.pool, &user.user_id, body.our_id).await?;

    Ok(Json(ToggleResponse { success: true }))
}

/// GET /myCreatedEvents - populated events the session user created.
pub async fn my_created(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let created_events = event_buddy_event::list_created(&state.pool, &user.user_id).await?;

    Ok(Json(CreatedEventsResponse {
        success: true,
        created_events,
    }))
}

/// GET /myJoinedEvents - populated events the session user joined.
pub async fn my_joined(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let joined_events = event_buddy_event::list_joined(&state.pool, &user.user_id).await?;

    Ok(Json(JoinedEventsResponse {
        success: true,
        joined_events,
    }))
}
