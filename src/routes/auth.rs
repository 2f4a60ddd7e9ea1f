use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::{ERR_INVALID_CREDENTIALS, MIN_PASSWORD_LEN};
use crate::db;
use crate::error::{AppError, Result};
use crate::extract::bearer_token;
use crate::models::User;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

/// Create a new user and establish a session.
///
/// Returns 409 Conflict when the username or email is already taken.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<Value>> {
    User::validate_username(&payload.username)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    User::validate_email(&payload.email).map_err(|e| AppError::InvalidInput(e.to_string()))?;
    validate_password(&payload.password)?;

    let user = db::users::create_user(
        &state.pool,
        &payload.username,
        &payload.email,
        &payload.password,
        payload.image_url.as_deref(),
    )
    .await?;

    let token = db::sessions::create_session(&state.pool, user.id, state.config.session_ttl_secs)
        .await?;

    Ok(Json(json!({
        "result": "success",
        "token": token,
        "user": user,
    })))
}

/// Authenticate and establish a session.
///
/// A failed login does not say whether the username or the password was
/// wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>> {
    let user = db::users::authenticate(&state.pool, &payload.username, &payload.password)
        .await?
        .ok_or_else(|| AppError::InvalidInput(ERR_INVALID_CREDENTIALS.to_string()))?;

    let token = db::sessions::create_session(&state.pool, user.id, state.config.session_ttl_secs)
        .await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(json!({
        "result": "success",
        "token": token,
        "user": user,
    })))
}

/// Clear the presented session, if any. Idempotent: logging out twice, or
/// without a session, still succeeds.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>> {
    if let Some(token) = bearer_token(&headers) {
        db::sessions::delete_session(&state.pool, token).await?;
    }

    Ok(Json(json!({ "result": "success" })))
}
