//! Request-level access gate.
//!
//! Handlers that take [`AuthUser`] are never invoked for anonymous
//! callers: the extractor rejects with 403 before the handler runs.
//! [`MaybeAuthUser`] is for endpoints that serve both audiences.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::AppState;

/// The authenticated current user, resolved from the bearer session token.
pub struct AuthUser(pub User);

/// The current user if a valid session token was presented, else `None`.
pub struct MaybeAuthUser(pub Option<User>);

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(MaybeAuthUser(None));
        };

        // Unknown or expired tokens resolve to anonymous for this request
        let user = db::sessions::resolve(&state.pool, token).await?;

        Ok(MaybeAuthUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybeAuthUser(user) = MaybeAuthUser::from_request_parts(parts, state).await?;

        user.map(AuthUser).ok_or(AppError::Unauthenticated)
    }
}
