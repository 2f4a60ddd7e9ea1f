use chrono::{DateTime, Utc};

/// Server-side session row binding an opaque token to a user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}
