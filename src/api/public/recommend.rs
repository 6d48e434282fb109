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
use crate::recommend;

//ROUTERS
pub fn recommend_router(state: AppState) -> Router {
    Router::new()
        .route("/recommendations", get(get_random))
        .route("/recommendations/popular", get(get_popular))
        .route("/recommendations/favorites", get(get_most_favorited))
        .layer(Extension(state))
}

//ROUTES
async fn get_random(Extension(state): Extension<AppState>) -> impl IntoResponse {
    match recommend::random_products(&*state.db).await {
        Ok(products) => (
            StatusCode::OK,
            Json(json!({ "success": true, "products": products })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Random recommendations failed");
            internal_error()
        }
    }
}

async fn get_popular(Extension(state): Extension<AppState>) -> impl IntoResponse {
    match recommend::popular_products(&*state.db).await {
        Ok(products) => (
            StatusCode::OK,
            Json(json!({ "success": true, "products": products })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Popular recommendations failed");
            internal_error()
        }
    }
}

async fn get_most_favorited(Extension(state): Extension<AppState>) -> impl IntoResponse {
    match recommend::most_favorited_products(&*state.db).await {
        Ok(products) => (
            StatusCode::OK,
            Json(json!({ "success": true, "products": products })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Favorite recommendations failed");
            internal_error()
        }
    }
}
