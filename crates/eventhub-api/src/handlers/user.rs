//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use eventhub_entity::event::EventSummary;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_service
        .update_profile(auth.user_id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /api/users/me/events
pub async fn organized_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<EventSummary>>>, ApiError> {
    let events = state.query_service.list_organized(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// GET /api/users/me/attending
pub async fn attending_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<EventSummary>>>, ApiError> {
    let events = state.query_service.list_attending(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(events)))
}
