use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::json;

use crate::api::internal_error;
use crate::config::AppState;
use crate::entities::product::{self, Entity as ProductEntity};

//ROUTERS
pub fn product_router(state: AppState) -> Router {
    Router::new()
        .route("/products", get(get_products))
        .route("/products/:id", get(get_product))
        .route("/products/category/:category", get(get_products_by_category))
        .layer(Extension(state))
}

//ROUTES
async fn get_products(Extension(state): Extension<AppState>) -> impl IntoResponse {
    match ProductEntity::find()
        .order_by_asc(product::Column::Id)
        .all(&*state.db)
        .await
    {
        Ok(products) => (
            StatusCode::OK,
            Json(json!({ "success": true, "products": products })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to list products");
            internal_error()
        }
    }
}

async fn get_product(
    Path(id): Path<i32>,
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    match ProductEntity::find_by_id(id).one(&*state.db).await {
        Ok(Some(prod)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "product": prod })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("No product with id {} was found", id) })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to fetch product");
            internal_error()
        }
    }
}

async fn get_products_by_category(
    Path(category): Path<String>,
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    match ProductEntity::find()
        .filter(product::Column::Category.eq(&*category))
        .order_by_asc(product::Column::Id)
        .all(&*state.db)
        .await
    {
        Ok(products) => (
            StatusCode::OK,
            Json(json!({ "success": true, "products": products })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to list products by category");
            internal_error()
        }
    }
}
