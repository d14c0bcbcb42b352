//! Auth handlers. Register, login, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, SessionResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), ApiError> {
    let user = state.user_service.register(req.into()).await?;
    let issued = state.token_codec.issue(user.id, &user.username)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SessionResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user.into(),
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let user = state
        .user_service
        .authenticate(&req.email, &req.password)
        .await?;
    let issued = state.token_codec.issue(user.id, &user.username)?;

    Ok(Json(ApiResponse::ok(SessionResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: user.into(),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
