use chrono::{DateTime, Utc};
use serde::Serialize;

/// User row as stored in Postgres
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2 PHC-string hash, never serialized into responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub image_url: String,
    pub header_image_url: String,
    pub private: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Validates a username: 3-20 characters, alphanumeric or underscore.
    pub fn validate_username(username: &str) -> Result<(), &'static str> {
        if username.len() < 3 {
            return Err("Username must be at least 3 characters long");
        }

        if username.len() > 20 {
            return Err("Username must be at most 20 characters long");
        }

        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err("Username must only contain alphanumeric characters and underscores");
        }

        Ok(())
    }

    /// Validates an email address shape (local@domain, non-empty parts).
    pub fn validate_email(email: &str) -> Result<(), &'static str> {
        let Some((local, domain)) = email.split_once('@') else {
            return Err("Invalid email address");
        };

        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err("Invalid email address");
        }

        Ok(())
    }
}
