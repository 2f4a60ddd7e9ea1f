use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db;
use crate::error::{AppError, Result};
use crate::extract::AuthUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NewMessageRequest {
    pub text: String,
}

/// Post a new message.
pub async fn new_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewMessageRequest>,
) -> Result<Json<Value>> {
    let message = db::messages::create_message(&state.pool, user.id, &payload.text).await?;

    Ok(Json(json!({
        "result": "success",
        "message": message,
        "user": user,
    })))
}

/// Show a single message.
pub async fn show_message(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(message_id): Path<i64>,
) -> Result<Json<Value>> {
    let message = db::messages::get_message(&state.pool, message_id)
        .await?
        .ok_or(AppError::NotFound("message"))?;

    Ok(Json(json!({ "result": "success", "message": message })))
}

/// Delete a message. Owner-only.
pub async fn delete_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(message_id): Path<i64>,
) -> Result<Json<Value>> {
    db::messages::delete_message(&state.pool, message_id, user.id).await?;

    Ok(Json(json!({ "result": "success" })))
}

/// Toggle the caller's like on a message.
pub async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(message_id): Path<i64>,
) -> Result<Json<Value>> {
    let liked = db::messages::toggle_like(&state.pool, user.id, message_id).await?;

    Ok(Json(json!({ "result": "success", "liked": liked })))
}
