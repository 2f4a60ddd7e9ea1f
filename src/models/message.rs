use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::MAX_MESSAGE_LEN;

/// A short text message ("chirp")
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Message {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Validates message text: non-empty after trimming, at most 140 chars.
    pub fn validate_text(text: &str) -> Result<(), String> {
        if text.trim().is_empty() {
            return Err("Message text is required".to_string());
        }

        if text.chars().count() > MAX_MESSAGE_LEN {
            return Err(format!(
                "Message text must be at most {MAX_MESSAGE_LEN} characters"
            ));
        }

        Ok(())
    }
}
