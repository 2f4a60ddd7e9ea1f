//! Identity store: user rows and credential verification.
//!
//! Passwords are stored as salted argon2 hashes; username and email
//! uniqueness is enforced by the database and surfaced as `Duplicate`.

use sqlx::PgPool;

use crate::constants::{DEFAULT_IMAGE_URL, ERR_USERNAME_TAKEN};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::{hash_password, verify_password};

/// Profile fields a user may edit (all applied together)
#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub image_url: String,
    pub header_image_url: String,
    pub private: bool,
}

/// Create a new user with a hashed password.
///
/// A unique violation on username or email comes back as `Duplicate`.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password: &str,
    image_url: Option<&str>,
) -> Result<User> {
    let password_hash = hash_password(password);
    let image_url = image_url.unwrap_or(DEFAULT_IMAGE_URL);

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, image_url)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(username)
    .bind(email)
    .bind(&password_hash)
    .bind(image_url)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::or_duplicate(e, ERR_USERNAME_TAKEN))?;

    tracing::info!(user_id = user.id, username, "New user created");

    Ok(user)
}

/// Look up a user by username and verify the password.
///
/// Returns `None` for both an unknown username and a wrong password, so
/// callers cannot distinguish the two.
pub async fn authenticate(pool: &PgPool, username: &str, password: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user.filter(|u| verify_password(&u.password_hash, password)))
}

pub async fn get_user(pool: &PgPool, id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// List users, optionally filtered by a username substring.
pub async fn search_users(pool: &PgPool, query: Option<&str>) -> Result<Vec<User>> {
    let users = match query {
        Some(q) if !q.is_empty() => {
            // Escape LIKE metacharacters so a search for "50%" behaves
            let escaped = q.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
            sqlx::query_as::<_, User>(
                "SELECT * FROM users WHERE username LIKE '%' || $1 || '%' ORDER BY username",
            )
            .bind(escaped)
            .fetch_all(pool)
            .await?
        }
        _ => {
            sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username")
                .fetch_all(pool)
                .await?
        }
    };

    Ok(users)
}

/// Apply a profile edit. Unique violations on username/email surface as
/// `Duplicate`; the caller is responsible for password verification.
pub async fn update_profile(pool: &PgPool, user_id: i64, changes: &ProfileChanges) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users
         SET username = $2, email = $3, bio = $4, location = $5,
             image_url = $6, header_image_url = $7, private = $8
         WHERE id = $1
         RETURNING *",
    )
    .bind(user_id)
    .bind(&changes.username)
    .bind(&changes.email)
    .bind(&changes.bio)
    .bind(&changes.location)
    .bind(&changes.image_url)
    .bind(&changes.header_image_url)
    .bind(changes.private)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::or_duplicate(e, ERR_USERNAME_TAKEN))?;

    Ok(user)
}

/// Change a user's password. Returns false (and stores nothing) when the
/// old password does not verify.
pub async fn change_password(
    pool: &PgPool,
    user: &User,
    old_password: &str,
    new_password: &str,
) -> Result<bool> {
    if !verify_password(&user.password_hash, old_password) {
        return Ok(false);
    }

    let new_hash = hash_password(new_password);
    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(user.id)
        .bind(&new_hash)
        .execute(pool)
        .await?;

    tracing::info!(user_id = user.id, "Password changed");

    Ok(true)
}

/// Delete a user. Messages, follow edges, follow requests, likes and
/// sessions all disappear via ON DELETE CASCADE.
pub async fn delete_user(pool: &PgPool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    tracing::info!(user_id = id, "User and all associated data deleted");

    Ok(())
}
