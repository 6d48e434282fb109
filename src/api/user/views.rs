use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;

use crate::config::AppState;
use crate::entities::product_view;
use crate::middleware::auth::Claims;

//ROUTERS
pub fn views_router(state: AppState) -> Router {
    Router::new()
        .route("/products/:id/view", post(log_view))
        .layer(Extension(state))
}

//ROUTES
// Best-effort analytics write: failures are logged server-side and never
// surfaced to the caller.
async fn log_view(
    Path(product_id): Path<i32>,
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let view = product_view::ActiveModel {
        user_id: Set(claims.user_id),
        product_id: Set(product_id),
        viewed_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    if let Err(err) = view.insert(&*state.db).await {
        tracing::warn!(error = %err, product_id, "Failed to record product view");
    }

    (StatusCode::OK, Json(json!({ "success": true })))
}
