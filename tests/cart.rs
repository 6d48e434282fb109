mod common;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use tower::ServiceExt;

use common::{insert_product, json_request, register_user, response_json, test_app};
use luso_beauty::entities::cart_item;

#[tokio::test]
async fn test_adding_same_product_twice_accumulates_quantity() {
    let (app, state) = test_app().await;
    let product_id = insert_product(&state.db, "Lip Balm", Decimal::new(450, 2), "lips").await;
    let (token, user_id) = register_user(&app, "cart@example.com", "Cart").await;

    // Step 1: Add the product with quantity 2
    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cart",
            Some(&token),
            Some(json!({ "productId": product_id, "quantity": 2 })),
        ))
        .await
        .expect("Failed to send add request");
    assert_eq!(first.status(), StatusCode::OK);

    // Step 2: Add the same product with quantity 3
    let second = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cart",
            Some(&token),
            Some(json!({ "productId": product_id, "quantity": 3 })),
        ))
        .await
        .expect("Failed to send add request");
    assert_eq!(second.status(), StatusCode::OK);

    // Step 3: One row with the summed quantity, never two
    let lines = cart_item::Entity::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .all(&*state.db)
        .await
        .expect("Failed to load cart lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_id, product_id);
    assert_eq!(lines[0].quantity, 5);
}

#[tokio::test]
async fn test_add_without_product_id_is_rejected() {
    let (app, _state) = test_app().await;
    let (token, _) = register_user(&app, "noid@example.com", "NoId").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cart",
            Some(&token),
            Some(json!({ "quantity": 2 })),
        ))
        .await
        .expect("Failed to send add request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], json!("productId is required"));
}

#[tokio::test]
async fn test_quantity_defaults_to_one_and_zero_is_rejected() {
    let (app, state) = test_app().await;
    let product_id = insert_product(&state.db, "Eye Gel", Decimal::new(1490, 2), "eyes").await;
    let (token, user_id) = register_user(&app, "qty@example.com", "Qty").await;

    let no_quantity = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cart",
            Some(&token),
            Some(json!({ "productId": product_id })),
        ))
        .await
        .expect("Failed to send add request");
    assert_eq!(no_quantity.status(), StatusCode::OK);

    let lines = cart_item::Entity::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .all(&*state.db)
        .await
        .expect("Failed to load cart lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 1);

    let zero = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cart",
            Some(&token),
            Some(json!({ "productId": product_id, "quantity": 0 })),
        ))
        .await
        .expect("Failed to send add request");
    assert_eq!(zero.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_cart_joins_catalog_fields() {
    let (app, state) = test_app().await;
    let product_id =
        insert_product(&state.db, "Vitamin C Serum", Decimal::new(2190, 2), "face").await;
    let (token, _) = register_user(&app, "joined@example.com", "Joined").await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/cart",
            Some(&token),
            Some(json!({ "productId": product_id, "quantity": 2 })),
        ))
        .await
        .expect("Failed to send add request");

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/cart", Some(&token), None))
        .await
        .expect("Failed to send get cart request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    let cart = body["cart"].as_array().expect("cart is not an array");
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["name"], json!("Vitamin C Serum"));
    assert_eq!(cart[0]["quantity"], json!(2));
    assert_eq!(cart[0]["image"], json!("images/test.jpg"));
    assert!(cart[0]["price"].is_string());
}

#[tokio::test]
async fn test_remove_line_and_clear_cart() {
    let (app, state) = test_app().await;
    let first = insert_product(&state.db, "Mascara", Decimal::new(1390, 2), "eyes").await;
    let second = insert_product(&state.db, "Lip Tint", Decimal::new(990, 2), "lips").await;
    let (token, user_id) = register_user(&app, "remove@example.com", "Remove").await;

    for id in [first, second] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/cart",
                Some(&token),
                Some(json!({ "productId": id })),
            ))
            .await
            .expect("Failed to send add request");
    }

    // Remove one line by product id
    let remove = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/cart/{first}"),
            Some(&token),
            None,
        ))
        .await
        .expect("Failed to send remove request");
    assert_eq!(remove.status(), StatusCode::OK);

    let remaining = cart_item::Entity::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .all(&*state.db)
        .await
        .expect("Failed to load cart lines");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].product_id, second);

    // Clear the rest
    let clear = app
        .clone()
        .oneshot(json_request("DELETE", "/api/cart", Some(&token), None))
        .await
        .expect("Failed to send clear request");
    assert_eq!(clear.status(), StatusCode::OK);

    let after_clear = cart_item::Entity::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .all(&*state.db)
        .await
        .expect("Failed to load cart lines");
    assert!(after_clear.is_empty());
}

#[tokio::test]
async fn test_cart_requires_auth() {
    let (app, _state) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/cart", None, None))
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
