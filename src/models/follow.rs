use chrono::{DateTime, Utc};
use serde::Serialize;

/// A pending ask to follow a private account.
///
/// Exists only while unresolved: approval replaces it with a follow edge,
/// rejection just deletes it. The (from_id, to_id) pair is unique.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct FollowRequest {
    pub id: i64,
    /// The user who asked to follow
    pub from_id: i64,
    /// The private user being asked
    pub to_id: i64,
    pub created_at: DateTime<Utc>,
}
