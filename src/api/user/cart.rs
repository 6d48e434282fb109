use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::internal_error;
use crate::config::AppState;
use crate::entities::{cart_item, cart_item::Entity as CartEntity, product};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn cart_router(state: AppState) -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/cart/:product_id", delete(remove_from_cart))
        .layer(Extension(state))
}

//ROUTES
async fn get_cart(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let lines = CartEntity::find()
        .filter(cart_item::Column::UserId.eq(claims.user_id))
        .find_also_related(product::Entity)
        .all(&*state.db)
        .await;

    match lines {
        Ok(lines) => {
            let cart: Vec<CartLineResponse> = lines
                .into_iter()
                .filter_map(|(line, prod)| prod.map(|prod| CartLineResponse::new(line, prod)))
                .collect();
            (StatusCode::OK, Json(json!({ "success": true, "cart": cart }))).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to load cart");
            internal_error()
        }
    }
}

// Accumulate-on-conflict: a line already in the cart gains the new quantity
// instead of becoming a second row.
async fn add_to_cart(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddToCart>,
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

    let quantity = payload.quantity.unwrap_or(1);
    if quantity < 1 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Quantity must be greater than 0" })),
        )
            .into_response();
    }

    let txn = match state.db.begin().await {
        Ok(txn) => txn,
        Err(err) => {
            tracing::error!(error = %err, "Failed to open transaction");
            return internal_error();
        }
    };

    let existing = CartEntity::find()
        .filter(cart_item::Column::UserId.eq(claims.user_id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(&txn)
        .await;

    let result = match existing {
        Ok(Some(entry)) => {
            let current = entry.quantity;
            let mut entry: cart_item::ActiveModel = entry.into();
            entry.quantity = Set(current + quantity);
            entry.update(&txn).await.map(|_| ())
        }
        Ok(None) => cart_item::ActiveModel {
            user_id: Set(claims.user_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
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
                tracing::error!(error = %err, "Failed to commit cart update");
                internal_error()
            }
        },
        Err(err) => {
            let _ = txn.rollback().await;
            tracing::error!(error = %err, "Failed to upsert cart line");
            internal_error()
        }
    }
}

async fn remove_from_cart(
    Path(product_id): Path<i32>,
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let result = CartEntity::delete_many()
        .filter(cart_item::Column::UserId.eq(claims.user_id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .exec(&*state.db)
        .await;

    match result {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to remove cart line");
            internal_error()
        }
    }
}

async fn clear_cart(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let result = CartEntity::delete_many()
        .filter(cart_item::Column::UserId.eq(claims.user_id))
        .exec(&*state.db)
        .await;

    match result {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to clear cart");
            internal_error()
        }
    }
}

//structs
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AddToCart {
    product_id: Option<i32>,
    quantity: Option<i32>,
}

// Cart lines joined with the catalog fields the client renders.
#[derive(Serialize)]
struct CartLineResponse {
    id: i32,
    user_id: i32,
    product_id: i32,
    quantity: i32,
    name: String,
    price: Decimal,
    image: String,
}

impl CartLineResponse {
    fn new(line: cart_item::Model, product: product::Model) -> CartLineResponse {
        CartLineResponse {
            id: line.id,
            user_id: line.user_id,
            product_id: line.product_id,
            quantity: line.quantity,
            name: product.name,
            price: product.price,
            image: product.image,
        }
    }
}
