use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::constants::HOME_FEED_LIMIT;
use crate::db;
use crate::error::Result;
use crate::extract::MaybeAuthUser;
use crate::AppState;

/// Home feed.
///
/// Logged-in callers get the 100 most recent messages from themselves and
/// everyone they follow; anonymous callers get an empty landing view.
pub async fn homepage(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<Json<Value>> {
    let Some(user) = user else {
        return Ok(Json(json!({
            "result": "success",
            "anonymous": true,
            "messages": [],
        })));
    };

    let messages = db::messages::home_feed(&state.pool, user.id, HOME_FEED_LIMIT).await?;

    Ok(Json(json!({
        "result": "success",
        "anonymous": false,
        "messages": messages,
    })))
}
