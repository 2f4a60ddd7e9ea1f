//! Social graph: directed follow edges and the private-account approval
//! workflow.
//!
//! Per ordered pair (A, B) of distinct users the relationship is one of
//! None, Following (a `follows` row exists) or RequestPending (a
//! `follow_requests` row exists; only reachable when B is private).
//! Composite primary keys / unique constraints on both tables turn racing
//! duplicate inserts into unique violations, which is the only concurrency
//! control this module needs.

use serde::Serialize;
use sqlx::PgPool;

use crate::constants::{ERR_ALREADY_FOLLOWING, ERR_CANNOT_FOLLOW_SELF, ERR_REQUEST_ALREADY_SENT};
use crate::error::{AppError, Result};
use crate::models::{FollowRequest, User};

/// What a follow attempt produced: an immediate edge, or a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowOutcome {
    Following,
    RequestPending,
}

/// Ask to follow `target_id`.
///
/// Public targets get an edge immediately; private targets get a pending
/// follow request instead. Duplicate edges and duplicate pending requests
/// are rejected by the storage layer.
pub async fn request_follow(pool: &PgPool, follower_id: i64, target_id: i64) -> Result<FollowOutcome> {
    if follower_id == target_id {
        return Err(AppError::InvalidInput(ERR_CANNOT_FOLLOW_SELF.to_string()));
    }

    let target = super::users::get_user(pool, target_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    if target.private {
        sqlx::query("INSERT INTO follow_requests (from_id, to_id) VALUES ($1, $2)")
            .bind(follower_id)
            .bind(target_id)
            .execute(pool)
            .await
            .map_err(|e| AppError::or_duplicate(e, ERR_REQUEST_ALREADY_SENT))?;

        tracing::info!(follower_id, target_id, "Follow request created");
        Ok(FollowOutcome::RequestPending)
    } else {
        sqlx::query("INSERT INTO follows (follower_id, followed_id) VALUES ($1, $2)")
            .bind(follower_id)
            .bind(target_id)
            .execute(pool)
            .await
            .map_err(|e| AppError::or_duplicate(e, ERR_ALREADY_FOLLOWING))?;

        tracing::info!(follower_id, target_id, "Follow edge created");
        Ok(FollowOutcome::Following)
    }
}

/// Approve a pending follow request.
///
/// Only the request's target may approve. Deleting the request and
/// creating the edge happen in one transaction: either both or neither.
pub async fn approve_request(
    pool: &PgPool,
    request_id: i64,
    approver_id: i64,
) -> Result<FollowRequest> {
    let mut tx = pool.begin().await?;

    let request =
        sqlx::query_as::<_, FollowRequest>("SELECT * FROM follow_requests WHERE id = $1 FOR UPDATE")
            .bind(request_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound("follow request"))?;

    if request.to_id != approver_id {
        return Err(AppError::Unauthorized);
    }

    sqlx::query("DELETE FROM follow_requests WHERE id = $1")
        .bind(request_id)
        .execute(&mut *tx)
        .await?;

    // ON CONFLICT: if the edge somehow already exists the request is still
    // considered resolved.
    sqlx::query(
        "INSERT INTO follows (follower_id, followed_id) VALUES ($1, $2)
         ON CONFLICT DO NOTHING",
    )
    .bind(request.from_id)
    .bind(request.to_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        from_id = request.from_id,
        to_id = request.to_id,
        "Follow request approved"
    );

    Ok(request)
}

/// Reject a pending follow request: delete it without creating an edge.
/// Only the request's target may reject.
pub async fn reject_request(
    pool: &PgPool,
    request_id: i64,
    approver_id: i64,
) -> Result<FollowRequest> {
    let request = sqlx::query_as::<_, FollowRequest>("SELECT * FROM follow_requests WHERE id = $1")
        .bind(request_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("follow request"))?;

    if request.to_id != approver_id {
        return Err(AppError::Unauthorized);
    }

    sqlx::query("DELETE FROM follow_requests WHERE id = $1")
        .bind(request_id)
        .execute(pool)
        .await?;

    tracing::info!(
        from_id = request.from_id,
        to_id = request.to_id,
        "Follow request rejected"
    );

    Ok(request)
}

/// Convert every pending request addressed to `user_id` into a follow edge.
///
/// Runs when an account goes public. The requesters were only queued
/// because the account was private; leaving the rows behind would block
/// them from ever following (the unique constraint rejects a re-request).
pub async fn absorb_pending_requests(pool: &PgPool, user_id: i64) -> Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO follows (follower_id, followed_id)
         SELECT from_id, to_id FROM follow_requests WHERE to_id = $1
         ON CONFLICT DO NOTHING",
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    let absorbed = sqlx::query("DELETE FROM follow_requests WHERE to_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    if absorbed > 0 {
        tracing::info!(user_id, absorbed, "Pending follow requests converted to follows");
    }

    Ok(absorbed)
}

/// Remove a follow edge. A missing edge is a tolerated no-op.
pub async fn unfollow(pool: &PgPool, follower_id: i64, followed_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
        .bind(follower_id)
        .bind(followed_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        tracing::debug!(follower_id, followed_id, "Unfollow of non-followed user");
    }

    Ok(())
}

/// Is A following B?
pub async fn is_following(pool: &PgPool, follower_id: i64, followed_id: i64) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Is A followed by B?
pub async fn is_followed_by(pool: &PgPool, user_id: i64, other_id: i64) -> Result<bool> {
    is_following(pool, other_id, user_id).await
}

/// Users that `user_id` follows.
pub async fn following(pool: &PgPool, user_id: i64) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT u.* FROM users u
         JOIN follows f ON f.followed_id = u.id
         WHERE f.follower_id = $1
         ORDER BY u.username",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Users following `user_id`.
pub async fn followers(pool: &PgPool, user_id: i64) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT u.* FROM users u
         JOIN follows f ON f.follower_id = u.id
         WHERE f.followed_id = $1
         ORDER BY u.username",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Pending follow requests addressed to `user_id`, oldest first.
pub async fn pending_requests(pool: &PgPool, user_id: i64) -> Result<Vec<FollowRequest>> {
    let requests = sqlx::query_as::<_, FollowRequest>(
        "SELECT * FROM follow_requests WHERE to_id = $1 ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}
