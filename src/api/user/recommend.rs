use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::api::internal_error;
use crate::config::AppState;
use crate::middleware::auth::Claims;
use crate::recommend;

//ROUTERS
pub fn personal_recommend_router(state: AppState) -> Router {
    Router::new()
        .route("/recommendations/personal", get(get_personal))
        .layer(Extension(state))
}

//ROUTES
async fn get_personal(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    match recommend::personal_for_user(&*state.db, claims.user_id).await {
        Ok((products, kind)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "products": products,
                "type": kind.as_str(),
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Personal recommendations failed");
            internal_error()
        }
    }
}
