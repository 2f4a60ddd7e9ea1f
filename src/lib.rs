//! Chirp Server Library
//!
//! A microblogging JSON API: signup/login sessions, short messages,
//! follows with a private-account approval flow, and likes.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod security;

pub use config::Config;
pub use error::{AppError, Result};

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub config: Config,
}

/// Build the application router.
///
/// Every response carries `Cache-Control: no-store`; CORS and tracing
/// layers are added by the binary on top of this.
pub fn router(state: AppState) -> Router {
    use routes::*;

    Router::new()
        .route("/", get(homepage))
        .route("/health", get(health_check))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/users", get(list_users))
        .route("/users/profile", get(get_profile).post(update_profile))
        .route("/users/delete", post(delete_user))
        .route("/users/follow/:id", post(follow_user))
        .route("/users/stop-following/:id", post(stop_following))
        .route("/users/approve/:request_id/:approver_id", get(approve_follow))
        .route("/users/reject/:request_id/:approver_id", get(reject_follow))
        .route("/users/:id", get(show_user))
        .route("/users/:id/following", get(show_following))
        .route("/users/:id/followers", get(show_followers))
        .route("/users/:id/likes", get(show_likes))
        .route("/users/:id/requests", get(show_requests))
        .route(
            "/users/:id/password",
            get(change_password_form).post(change_password),
        )
        .route("/messages/new", post(new_message))
        .route("/messages/:id", get(show_message))
        .route("/messages/:id/delete", post(delete_message))
        .route("/api/messages/:id/like", post(toggle_like))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}
