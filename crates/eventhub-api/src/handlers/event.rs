//! Event handlers. Public listings and detail, plus the authenticated
//! lifecycle operations.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use eventhub_core::AppError;
use eventhub_core::types::EventId;
use eventhub_entity::event::{Event, EventDetail, EventInput, EventSummary};

use crate::dto::request::EventListQuery;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<ApiResponse<Vec<EventSummary>>>, ApiError> {
    let filter = query.into_filter()?;
    let events = state.query_service.list_upcoming(&filter).await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<Json<ApiResponse<EventDetail>>, ApiError> {
    let detail = state
        .query_service
        .event_detail(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<EventInput>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), ApiError> {
    let event = state.event_service.create_event(auth.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(event))))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EventId>,
    Json(input): Json<EventInput>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let event = state
        .event_service
        .update_event(auth.user_id, id, input)
        .await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EventId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.event_service.delete_event(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Event deleted".to_string(),
    })))
}

/// POST /api/events/{id}/join
pub async fn join_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EventId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.event_service.join_event(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Joined event".to_string(),
    })))
}

/// DELETE /api/events/{id}/join
pub async fn leave_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EventId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.event_service.leave_event(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Left event".to_string(),
    })))
}
