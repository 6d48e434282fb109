use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::checkout::{self, CheckoutError};
use crate::config::AppState;
use crate::middleware::auth::Claims;

//ROUTERS
pub fn orders_router(state: AppState) -> Router {
    Router::new()
        .route("/orders", post(place_order))
        .layer(Extension(state))
}

//ROUTES
async fn place_order(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Option<Json<PlaceOrderPayload>>,
) -> impl IntoResponse {
    match checkout::place_order(&state.db, claims.user_id).await {
        Ok(placed) => {
            // The client may still send its own total; the persisted amount is
            // the server-side computation, a mismatch only gets logged.
            if let Some(Json(payload)) = payload {
                if let Some(claimed) = payload.total.and_then(|t| Decimal::try_from(t).ok()) {
                    if claimed != placed.total {
                        tracing::warn!(
                            user_id = claims.user_id,
                            order_id = placed.order_id,
                            claimed = %claimed,
                            computed = %placed.total,
                            "Client-sent order total does not match computed total"
                        );
                    }
                }
            }
            (
                StatusCode::OK,
                Json(json!({ "success": true, "orderId": placed.order_id })),
            )
                .into_response()
        }
        Err(CheckoutError::EmptyCart) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Cart is empty" })),
        )
            .into_response(),
        Err(CheckoutError::Db(err)) => {
            tracing::error!(error = %err, user_id = claims.user_id, "Checkout failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to place order" })),
            )
                .into_response()
        }
    }
}

//structs
#[derive(Deserialize, Debug)]
struct PlaceOrderPayload {
    total: Option<f64>,
}
