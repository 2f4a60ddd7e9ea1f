//! Content store: messages and like edges.

use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::Message;

/// Create a message owned by `user_id`. The text must already be validated
/// (`Message::validate_text`); the timestamp is set by the database.
pub async fn create_message(pool: &PgPool, user_id: i64, text: &str) -> Result<Message> {
    Message::validate_text(text).map_err(AppError::InvalidInput)?;

    let message = sqlx::query_as::<_, Message>(
        "INSERT INTO messages (user_id, text) VALUES ($1, $2) RETURNING *",
    )
    .bind(user_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    tracing::info!(message_id = message.id, user_id, "Message created");

    Ok(message)
}

pub async fn get_message(pool: &PgPool, id: i64) -> Result<Option<Message>> {
    let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(message)
}

/// Delete a message. Only its owner may delete it; everyone else gets
/// `Unauthorized` and the row stays.
pub async fn delete_message(pool: &PgPool, message_id: i64, requester_id: i64) -> Result<()> {
    let message = get_message(pool, message_id)
        .await?
        .ok_or(AppError::NotFound("message"))?;

    if message.user_id != requester_id {
        tracing::warn!(
            message_id,
            requester_id,
            owner_id = message.user_id,
            "Delete attempt by non-owner"
        );
        return Err(AppError::Unauthorized);
    }

    sqlx::query("DELETE FROM messages WHERE id = $1")
        .bind(message_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Flip the like state for (user, message). Returns the new state: true if
/// the message is now liked.
///
/// The composite primary key on `likes` converts a racing double insert
/// into a unique violation, which is folded into "already liked".
pub async fn toggle_like(pool: &PgPool, user_id: i64, message_id: i64) -> Result<bool> {
    if get_message(pool, message_id).await?.is_none() {
        return Err(AppError::NotFound("message"));
    }

    let removed = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND message_id = $2")
        .bind(user_id)
        .bind(message_id)
        .execute(pool)
        .await?
        .rows_affected();

    if removed > 0 {
        return Ok(false);
    }

    let insert = sqlx::query("INSERT INTO likes (user_id, message_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(message_id)
        .execute(pool)
        .await;

    match insert {
        Ok(_) => Ok(true),
        // Lost a race against another like from the same user
        Err(sqlx::Error::Database(ref db)) if db.is_unique_violation() => Ok(true),
        Err(e) => Err(e.into()),
    }
}

/// Messages this user has liked, newest first.
pub async fn liked_messages(pool: &PgPool, user_id: i64) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        "SELECT m.* FROM messages m
         JOIN likes l ON l.message_id = m.id
         WHERE l.user_id = $1
         ORDER BY m.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Messages authored by this user, newest first.
pub async fn user_messages(pool: &PgPool, user_id: i64) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        "SELECT * FROM messages WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Home feed: messages by the user or anyone they follow, newest first,
/// capped at `limit`.
pub async fn home_feed(pool: &PgPool, user_id: i64, limit: i64) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        "SELECT * FROM messages
         WHERE user_id = $1
            OR user_id IN (SELECT followed_id FROM follows WHERE follower_id = $1)
         ORDER BY created_at DESC
         LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}
