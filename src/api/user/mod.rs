pub mod account;
pub mod cart;
pub mod favorites;
pub mod orders;
pub mod recommend;
pub mod views;

use axum::{middleware::from_fn_with_state, Router};

use crate::config::AppState;
use crate::middleware::auth::require_auth;

pub fn user_api_router(state: AppState) -> Router {
    Router::new()
        .merge(account::account_router(state.clone()))
        .merge(cart::cart_router(state.clone()))
        .merge(favorites::favorites_router(state.clone()))
        .merge(orders::orders_router(state.clone()))
        .merge(recommend::personal_recommend_router(state.clone()))
        .merge(views::views_router(state.clone()))
        .layer(from_fn_with_state(state, require_auth))
}
