//! Session manager: opaque token to user-id mapping with an expiry.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{Session, User};
use crate::security::generate_session_token;

/// Create a session for a freshly authenticated user and return its token.
pub async fn create_session(pool: &PgPool, user_id: i64, ttl_secs: i64) -> Result<String> {
    let token = generate_session_token();
    let expires_at = Utc::now() + Duration::seconds(ttl_secs);

    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;

    tracing::info!(user_id, "Session created");

    Ok(token)
}

/// Delete a session if it exists (logout is idempotent).
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

/// Resolve a session token to its user.
///
/// Any failure short of a database fault (unknown token, expired session,
/// vanished user) yields `None`: an anonymous context for this request
/// only.
pub async fn resolve(pool: &PgPool, token: &str) -> Result<Option<User>> {
    let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = $1")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    let Some(session) = session else {
        return Ok(None);
    };

    if !session.is_valid() {
        return Ok(None);
    }

    super::users::get_user(pool, session.user_id).await
}
