use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::services::ServeDir;

mod auth;
mod events;
mod health;
mod membership;
mod upload;

use crate::config::UploadConfig;
use crate::middleware::auth_middleware;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sessions: SessionStore,
    pub pepper: String,
    pub upload: UploadConfig,
}

pub fn router(state: AppState) -> Router {
    // Uploads can exceed the default axum body limit, so the cap comes from
    // configuration instead.
    let upload_routes = Router::new()
        .route("/upload-image", post(upload::action))
        .layer(DefaultBodyLimit::max(state.upload.max_bytes));

    let protected = Router::new()
        .route("/signout", get(auth::signout))
        .route(
            "/getSpecificEvent",
            get(events::get_specific).post(events::get_specific_body),
        )
        .route("/addEvent", post(events::add))
        .route(
            "/updateSpecificEvent",
            get(events::update_query).post(events::update),
        )
        .route(
            "/deleteSpecificEvent",
            get(events::delete).post(events::delete),
        )
        .route("/joinEvent", post(membership::join))
        .route("/leaveEvent", post(membership::leave))
        .route("/myCreatedEvents", get(membership::my_created))
        .route("/myJoinedEvents", get(membership::my_joined))
        .merge(upload_routes)
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/signup", get(auth::signup))
        .route("/signin", get(auth::signin))
        .route("/", get(events::list).post(events::list))
        .route("/sortedEvents", get(events::sorted))
        .merge(protected)
        .nest_service("/images", ServeDir::new(&state.upload.dir))
        .with_state(state)
}
