//! `AuthUser` extractor. Pulls the bearer token from the Authorization
//! header, validates it, and injects the acting user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use eventhub_core::error::AppError;
use eventhub_core::types::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated actor, available to any handler that names it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The acting user's id, as recorded in the token.
    pub user_id: UserId,
    /// The username captured at token issue time.
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::invalid_credentials("Missing Authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::invalid_credentials("Invalid Authorization header format")
        })?;

        let claims = state.token_codec.verify(token)?;

        Ok(AuthUser {
            user_id: claims.user_id(),
            username: claims.username,
        })
    }
}
