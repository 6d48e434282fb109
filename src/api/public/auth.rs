use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::api::{internal_error, UserResponse};
use crate::config::AppState;
use crate::entities::user::{self, Entity as UserEntity};
use crate::middleware::auth::generate_token;

//ROUTERS
pub fn auth_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .layer(Extension(state))
}

//ROUTES
async fn register(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> impl IntoResponse {
    if let Err(err) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response();
    }

    let password = match hash_password(&payload.password) {
        Ok(password) => password,
        Err(_) => return internal_error(),
    };

    let new_user = user::ActiveModel {
        email: Set(payload.email),
        password: Set(password),
        name: Set(payload.name),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = match new_user.insert(&*state.db).await {
        Ok(model) => model,
        Err(err) => {
            return match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Email is already in use" })),
                )
                    .into_response(),
                _ => {
                    tracing::error!(error = %err, "Failed to insert user");
                    internal_error()
                }
            };
        }
    };

    match generate_token(&state.keys, created.id) {
        Ok(token) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "token": token,
                "user": UserResponse::new(&created),
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to generate token");
            internal_error()
        }
    }
}

async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginPayload>,
) -> impl IntoResponse {
    if payload.email.is_empty() || payload.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email and password are required" })),
        )
            .into_response();
    }

    let result = UserEntity::find()
        .filter(user::Column::Email.eq(&*payload.email))
        .one(&*state.db)
        .await;

    match result {
        Ok(Some(model)) => match model.check_hash(&payload.password) {
            Ok(()) => match generate_token(&state.keys, model.id) {
                Ok(token) => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "token": token,
                        "user": UserResponse::new(&model),
                    })),
                )
                    .into_response(),
                Err(err) => {
                    tracing::error!(error = %err, "Failed to generate token");
                    internal_error()
                }
            },
            Err(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid password" })),
            )
                .into_response(),
        },
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "User not found" })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to look up user");
            internal_error()
        }
    }
}

//utilities
fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

//structs
#[derive(Deserialize, Validate, Clone, Debug)]
struct RegisterPayload {
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

#[derive(Deserialize, Clone, Debug)]
struct LoginPayload {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}
