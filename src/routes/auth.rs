//! Signup / signin / signout route handlers.
//!
//! The mobile client sends credentials as query parameters (`email`, `pass`)
//! on GET, so these endpoints keep that shape.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar, Query,
};
use event_buddy_user::SignupInput;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::session::{SessionUser, SESSION_COOKIE};

#[derive(Deserialize)]
pub struct CredentialsQuery {
    email: String,
    pass: String,
}

#[derive(Serialize)]
struct SignupResponse {
    success: bool,
}

#[derive(Serialize)]
struct SigninResponse {
    success: bool,
    login: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignoutResponse {
    success: bool,
    was_logged_in: bool,
}

/// GET /signup - create an account. No session is started.
pub async fn signup(
    State(state): State<AppState>,
    Query(query): Query<CredentialsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let input = SignupInput {
        email: query.email,
        password: query.pass,
    };

    let user = event_buddy_user::signup(&state.pool, &state.pepper, input).await?;

    info!(user_id = %user.id, "signup completed");

    Ok(Json(SignupResponse { success: true }))
}

/// GET /signin - authenticate and start a session.
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CredentialsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user =
        event_buddy_user::signin(&state.pool, &state.pepper, &query.email, &query.pass).await?;

    let token = state.sessions.create(SessionUser {
        user_id: user.id.clone(),
        email: user.email.clone(),
        cart_id: user.cart_id,
    });

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    info!(user_id = %user.id, "user signed in");

    Ok((
        jar.add(cookie),
        Json(SigninResponse {
            success: true,
            login: true,
        }),
    ))
}

/// GET /signout - end the session. Idempotent; reports whether one was
/// active.
pub async fn signout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let was_logged_in = jar
        .get(SESSION_COOKIE)
        .map(|cookie| state.sessions.remove(cookie.value()))
        .unwrap_or(false);

    info!(user_id = %user.user_id, "user signed out");

    Ok((
        jar.remove(Cookie::from(SESSION_COOKIE)),
        Json(SignoutResponse {
            success: true,
            was_logged_in,
        }),
    ))
}
