use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::AppState;
use crate::entities::user::Entity as UserEntity;

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(|header| header.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return Err(unauthorized()),
    };

    let claims = match validate_token(&state, token).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected bearer token");
            return Err(unauthorized());
        }
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
}

// Signing and verification keys, built once from the injected secret.
// Rotating the secret invalidates every outstanding token.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> JwtKeys {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

pub fn generate_token(keys: &JwtKeys, user_id: i32) -> Result<String, AuthError> {
    let claims = Claims { user_id };

    encode(&Header::default(), &claims, &keys.encoding).map_err(|_| AuthError::GenerationFail)
}

pub async fn validate_token(state: &AppState, token: &str) -> Result<Claims, AuthError> {
    // Tokens are issued without an expiration claim, so exp checking stays off.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let token_data = decode::<Claims>(token, &state.keys.decoding, &validation)
        .map_err(|_| AuthError::InvalidToken)?;
    let claims = token_data.claims;

    match UserEntity::find_by_id(claims.user_id).one(&*state.db).await {
        Ok(Some(_)) => Ok(claims),
        Ok(None) => Err(AuthError::UnknownUser),
        Err(err) => Err(AuthError::Db(err)),
    }
}

// Every validation defect maps to the same outward signal.
fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid or missing token" })),
    )
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token does not match a known user")]
    UnknownUser,
    #[error("Failed to generate token")]
    GenerationFail,
    #[error("Database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}
