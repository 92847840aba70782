use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::routes::AppState;
use crate::session::SESSION_COOKIE;

/// Identity of the signed-in caller, injected as a request extension by the
/// session gate.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
    pub cart_id: i64,
}

/// Session gate for protected routes.
///
/// Resolves the session cookie against the server-side store and injects
/// [`CurrentUser`]. Missing or stale cookies short-circuit with the 401
/// envelope instead of the legacy 200-with-`success:false` shape.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        tracing::debug!("missing session cookie");
        return AppError::AuthRequired.into_response();
    };

    let Some(session) = state.sessions.get(cookie.value()) else {
        tracing::debug!("session cookie does not match an active session");
        return AppError::AuthRequired.into_response();
    };

    req.extensions_mut().insert(CurrentUser {
        user_id: session.user_id,
        email: session.email,
        cart_id: session.cart_id,
    });

    next.run(req).await
}
