//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use eventhub_auth::jwt::TokenCodec;
use eventhub_core::config::AppConfig;
use eventhub_service::{EventQueryService, EventService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Session token codec
    pub token_codec: Arc<TokenCodec>,
    /// Identity and profile service
    pub user_service: Arc<UserService>,
    /// Event domain service
    pub event_service: Arc<EventService>,
    /// Event query service
    pub query_service: Arc<EventQueryService>,
}
