pub mod auth;
pub mod product;
pub mod recommend;

use axum::Router;

use crate::config::AppState;
use auth::auth_router;
use product::product_router;
use recommend::recommend_router;

pub fn public_api_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_router(state.clone()))
        .merge(product_router(state.clone()))
        .merge(recommend_router(state))
}
