use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::ERR_ACCESS_UNAUTHORIZED;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{ERR_ACCESS_UNAUTHORIZED}")]
    Unauthenticated,

    #[error("{ERR_ACCESS_UNAUTHORIZED}")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Duplicate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Translate a storage-layer unique violation into a `Duplicate` outcome,
    /// leaving every other database error untouched.
    pub fn or_duplicate(err: sqlx::Error, message: &str) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Duplicate(message.to_string())
            }
            other => AppError::Database(other),
        }
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Unauthenticated | AppError::Unauthorized => {
                (StatusCode::FORBIDDEN, ERR_ACCESS_UNAUTHORIZED.to_string())
            }
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            AppError::Duplicate(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "result": "fail",
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
