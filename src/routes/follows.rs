use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::db;
use crate::error::{AppError, Result};
use crate::extract::AuthUser;
use crate::AppState;

/// Follow a user: immediate for public targets, a pending request for
/// private ones.
pub async fn follow_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(target_id): Path<i64>,
) -> Result<Json<Value>> {
    let outcome = db::social::request_follow(&state.pool, user.id, target_id).await?;

    Ok(Json(json!({ "result": "success", "outcome": outcome })))
}

/// Approve a pending follow request. The path names the approver; a caller
/// pretending to be someone else is rejected before anything is touched.
pub async fn approve_follow(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((request_id, approver_id)): Path<(i64, i64)>,
) -> Result<Json<Value>> {
    if user.id != approver_id {
        return Err(AppError::Unauthorized);
    }

    let request = db::social::approve_request(&state.pool, request_id, user.id).await?;

    Ok(Json(json!({ "result": "success", "request": request })))
}

/// Reject a pending follow request: it is deleted and no edge is created.
pub async fn reject_follow(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((request_id, approver_id)): Path<(i64, i64)>,
) -> Result<Json<Value>> {
    if user.id != approver_id {
        return Err(AppError::Unauthorized);
    }

    let request = db::social::reject_request(&state.pool, request_id, user.id).await?;

    Ok(Json(json!({ "result": "success", "request": request })))
}

/// Stop following a user. Unfollowing someone you never followed is a
/// quiet no-op.
pub async fn stop_following(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(target_id): Path<i64>,
) -> Result<Json<Value>> {
    db::social::unfollow(&state.pool, user.id, target_id).await?;

    Ok(Json(json!({ "result": "success" })))
}
