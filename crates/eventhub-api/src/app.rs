//! Application builder. Wires repositories, services, router, and state
//! into a running Axum server.

use std::sync::Arc;

use sqlx::PgPool;

use eventhub_auth::jwt::TokenCodec;
use eventhub_auth::password::{PasswordHasher, PasswordPolicy};
use eventhub_core::config::AppConfig;
use eventhub_core::error::AppError;
use eventhub_database::repositories::{EventRepository, UserRepository};
use eventhub_entity::store::{EventStore, UserStore};
use eventhub_service::{EventQueryService, EventService, UserService};

use crate::router::build_router;
use crate::state::AppState;

/// Runs the EventHub server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let user_store: Arc<dyn UserStore> = Arc::new(UserRepository::new(db_pool.clone()));
    let event_store: Arc<dyn EventStore> = Arc::new(EventRepository::new(db_pool.clone()));

    let password_hasher = Arc::new(PasswordHasher::new());
    let password_policy = PasswordPolicy::new(&config.auth);
    let token_codec = Arc::new(TokenCodec::new(&config.auth));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_store),
        Arc::clone(&password_hasher),
        password_policy,
    ));
    let event_service = Arc::new(EventService::new(
        Arc::clone(&event_store),
        Arc::clone(&user_store),
    ));
    let query_service = Arc::new(EventQueryService::new(
        Arc::clone(&event_store),
        Arc::clone(&user_store),
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        token_codec,
        user_service,
        event_service,
        query_service,
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("EventHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
