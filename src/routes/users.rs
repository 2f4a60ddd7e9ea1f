use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::MIN_PASSWORD_LEN;
use crate::db;
use crate::db::users::ProfileChanges;
use crate::error::{AppError, Result};
use crate::extract::AuthUser;
use crate::models::User;
use crate::security::verify_password;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// List users, optionally filtered by a `q` username substring.
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>> {
    let users = db::users::search_users(&state.pool, params.q.as_deref()).await?;

    Ok(Json(json!({ "result": "success", "users": users })))
}

/// Profile view: the user, their messages, and the caller's relationship
/// to them.
pub async fn show_user(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>> {
    let user = db::users::get_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let messages = db::messages::user_messages(&state.pool, user.id).await?;
    let following = db::social::is_following(&state.pool, viewer.id, user.id).await?;
    let followed_by = db::social::is_followed_by(&state.pool, viewer.id, user.id).await?;

    Ok(Json(json!({
        "result": "success",
        "user": user,
        "messages": messages,
        "following": following,
        "followed_by": followed_by,
    })))
}

pub async fn show_following(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>> {
    let user = db::users::get_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    let users = db::social::following(&state.pool, user.id).await?;

    Ok(Json(json!({ "result": "success", "following": users })))
}

pub async fn show_followers(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>> {
    let user = db::users::get_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    let users = db::social::followers(&state.pool, user.id).await?;

    Ok(Json(json!({ "result": "success", "followers": users })))
}

pub async fn show_likes(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>> {
    let user = db::users::get_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    let messages = db::messages::liked_messages(&state.pool, user.id).await?;

    Ok(Json(json!({ "result": "success", "likes": messages })))
}

/// Pending follow requests addressed to the caller. Self-only.
pub async fn show_requests(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>> {
    if viewer.id != user_id {
        return Err(AppError::Unauthorized);
    }

    let requests = db::social::pending_requests(&state.pool, viewer.id).await?;

    Ok(Json(json!({ "result": "success", "requests": requests })))
}

/// Current user's own profile.
pub async fn get_profile(AuthUser(user): AuthUser) -> Json<Value> {
    Json(json!({ "result": "success", "user": user }))
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub header_image_url: Option<String>,
    #[serde(default)]
    pub private: bool,
    /// Current password, required to confirm the edit
    pub password: String,
}

/// Edit the caller's profile. The current password must verify.
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<Value>> {
    if !verify_password(&user.password_hash, &payload.password) {
        return Err(AppError::InvalidInput("Incorrect password".to_string()));
    }

    User::validate_username(&payload.username)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    User::validate_email(&payload.email).map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let went_public = user.private && !payload.private;

    let changes = ProfileChanges {
        username: payload.username,
        email: payload.email,
        bio: payload.bio,
        location: payload.location,
        image_url: payload.image_url.unwrap_or(user.image_url),
        header_image_url: payload.header_image_url.unwrap_or(user.header_image_url),
        private: payload.private,
    };

    let updated = db::users::update_profile(&state.pool, user.id, &changes).await?;

    // Anyone queued while the account was private becomes a follower now
    if went_public {
        db::social::absorb_pending_requests(&state.pool, user.id).await?;
    }

    Ok(Json(json!({ "result": "success", "user": updated })))
}

/// Delete the caller's account. Everything they own cascades away.
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Value>> {
    db::users::delete_user(&state.pool, user.id).await?;

    Ok(Json(json!({ "result": "success" })))
}

/// GET half of the password-change flow: only confirms the caller may
/// change this account's password.
pub async fn change_password_form(
    AuthUser(user): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>> {
    if user.id != user_id {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(json!({ "result": "success" })))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Change the caller's password. Self-only; the old password must verify
/// and the two copies of the new one must match.
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(user_id): Path<i64>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<Value>> {
    if user.id != user_id {
        return Err(AppError::Unauthorized);
    }

    if payload.new_password != payload.confirm_password {
        return Err(AppError::InvalidInput("Passwords don't match".to_string()));
    }

    if payload.new_password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let changed = db::users::change_password(
        &state.pool,
        &user,
        &payload.current_password,
        &payload.new_password,
    )
    .await?;

    if !changed {
        return Err(AppError::InvalidInput("Incorrect password".to_string()));
    }

    Ok(Json(json!({ "result": "success" })))
}
