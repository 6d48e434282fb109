#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::{json, Value};
use tower::ServiceExt;

use luso_beauty::api::create_api_router;
use luso_beauty::config::{AppConfig, AppState};
use luso_beauty::entities::{cart_item, order, order_item, product, setup_schema, user};

// In-memory SQLite; a single pooled connection so every query sees the same
// database.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    setup_schema(&db).await.expect("Failed to create schema");
    db
}

pub fn test_state(db: DatabaseConnection) -> AppState {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_owned(),
        bind_addr: "127.0.0.1:0".to_owned(),
        jwt_secret: "test-secret".to_owned(),
    };
    AppState::new(Arc::new(db), &config)
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state(test_db().await);
    (create_api_router(state.clone()), state)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("Failed to build request")
}

pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body was not JSON")
}

// Registers through the real endpoint and returns (token, user id).
pub async fn register_user(app: &Router, email: &str, name: &str) -> (String, i32) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            None,
            Some(json!({
                "email": email,
                "name": name,
                "password": "Secret15"
            })),
        ))
        .await
        .expect("Failed to send register request");

    let body = response_json(response).await;
    let token = body["token"]
        .as_str()
        .expect("Token not found in register response")
        .to_owned();
    let user_id = body["user"]["id"]
        .as_i64()
        .expect("User id not found in register response") as i32;
    (token, user_id)
}

pub async fn insert_user(db: &DatabaseConnection, email: &str) -> i32 {
    user::ActiveModel {
        email: Set(email.to_owned()),
        password: Set("unused-hash".to_owned()),
        name: Set("Test User".to_owned()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert user")
    .id
}

pub async fn insert_product(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
    category: &str,
) -> i32 {
    product::ActiveModel {
        name: Set(name.to_owned()),
        price: Set(price),
        category: Set(category.to_owned()),
        description: Set(format!("{name} description")),
        image: Set("images/test.jpg".to_owned()),
        tags: Set(product::Tags(vec![])),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert product")
    .id
}

pub async fn insert_cart_line(db: &DatabaseConnection, user_id: i32, product_id: i32, quantity: i32) {
    cart_item::ActiveModel {
        user_id: Set(user_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert cart line");
}

pub async fn insert_order_with_item(
    db: &DatabaseConnection,
    user_id: i32,
    product_id: i32,
    quantity: i32,
    price: Decimal,
) -> i32 {
    let placed = order::ActiveModel {
        user_id: Set(user_id),
        total_amount: Set(price * Decimal::from(quantity)),
        status: Set(order::Status::Pending),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert order");

    order_item::ActiveModel {
        order_id: Set(placed.id),
        product_id: Set(product_id),
        quantity: Set(quantity),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert order item");

    placed.id
}
