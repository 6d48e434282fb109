pub mod public;
pub mod user;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::config::AppState;
use crate::middleware::logging::access_log;
use public::public_api_router;
use user::user_api_router;

pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", public_api_router(state.clone()))
        .nest("/api", user_api_router(state))
        .layer(middleware::from_fn(access_log))
        .layer(TraceLayer::new_for_http())
}

// The user object returned by register, login and check-auth; never the
// full row (the hash stays server-side).
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl UserResponse {
    pub fn new(user: &crate::entities::user::Model) -> UserResponse {
        UserResponse {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

pub(crate) fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
