use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::internal_error;
use crate::config::AppState;
use crate::entities::{favorite, favorite::Entity as FavoriteEntity, product};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn favorites_router(state: AppState) -> Router {
    Router::new()
        .route("/favorites", get(get_favorites).post(add_favorite))
        .route(
            "/favorites/:product_id",
            get(check_favorite).delete(remove_favorite),
        )
        .layer(Extension(state))
}

//ROUTES
async fn get_favorites(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let result = FavoriteEntity::find()
        .filter(favorite::Column::UserId.eq(claims.user_id))
        .find_also_related(product::Entity)
        .order_by_desc(favorite::Column::CreatedAt)
        .all(&*state.db)
        .await;

    match result {
        Ok(entries) => {
            let favorites: Vec<product::Model> = entries
                .into_iter()
                .filter_map(|(_, prod)| prod)
                .collect();
            (
                StatusCode::OK,
                Json(json!({ "success": true, "favorites": favorites })),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to load favorites");
            internal_error()
        }
    }
}

// Idempotent-on-conflict: favoriting a product twice is a silent no-op.
async fn add_favorite(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddFavorite>,
) -> impl IntoResponse {
    let product_id = match payload.product_id {
        Some(id) => id,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "productId is required" })),
            )
                .into_response();
        }
    };

    let txn = match state.db.begin().await {
        Ok(txn) => txn,
        Err(err) => {
            tracing::error!(error = %err, "Failed to open transaction");
            return internal_error();
        }
    };

    let existing = FavoriteEntity::find()
        .filter(favorite::Column::UserId.eq(claims.user_id))
        .filter(favorite::Column::ProductId.eq(product_id))
        .one(&txn)
        .await;

    let result = match existing {
        Ok(Some(_)) => Ok(()),
        Ok(None) => favorite::ActiveModel {
            user_id: Set(claims.user_id),
            product_id: Set(product_id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map(|_| ()),
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => match txn.commit().await {
            Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to commit favorite");
                internal_error()
            }
        },
        Err(err) => {
            let _ = txn.rollback().await;
            tracing::error!(error = %err, "Failed to add favorite");
            internal_error()
        }
    }
}

async fn remove_favorite(
    Path(product_id): Path<i32>,
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let result = FavoriteEntity::delete_many()
        .filter(favorite::Column::UserId.eq(claims.user_id))
        .filter(favorite::Column::ProductId.eq(product_id))
        .exec(&*state.db)
        .await;

    match result {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to remove favorite");
            internal_error()
        }
    }
}

async fn check_favorite(
    Path(product_id): Path<i32>,
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let result = FavoriteEntity::find()
        .filter(favorite::Column::UserId.eq(claims.user_id))
        .filter(favorite::Column::ProductId.eq(product_id))
        .one(&*state.db)
        .await;

    match result {
        Ok(found) => (
            StatusCode::OK,
            Json(json!({ "success": true, "isFavorite": found.is_some() })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to check favorite");
            internal_error()
        }
    }
}

//structs
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AddFavorite {
    product_id: Option<i32>,
}
