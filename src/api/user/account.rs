use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::EntityTrait;
use serde_json::json;

use crate::api::{internal_error, UserResponse};
use crate::config::AppState;
use crate::entities::user::Entity as UserEntity;
use crate::middleware::auth::Claims;

//ROUTERS
pub fn account_router(state: AppState) -> Router {
    Router::new()
        .route("/check-auth", get(check_auth))
        .layer(Extension(state))
}

//ROUTES
async fn check_auth(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    match UserEntity::find_by_id(claims.user_id).one(&*state.db).await {
        Ok(Some(model)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "user": UserResponse::new(&model) })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid or missing token" })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to load user");
            internal_error()
        }
    }
}
