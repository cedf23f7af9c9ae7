// ============================================================================
// NOTES REST API
// ============================================================================

// - List/create/read/update/delete notes
// - Field-level input validation
// - SQLite persistence through a bounded connection pool
// - Centralized error-to-status mapping
// - Structured logging

use notes_api::{AppState, app, config::Config, db, repository::SqliteNoteRepository};
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_api=info,tower_http=info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let pool = db::connect(&config).await?;
    let state = AppState::new(Arc::new(SqliteNoteRepository::new(pool.clone())));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("Server running on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET    /health           - Health check");
    info!("  GET    /notes            - List notes (newest first)");
    info!("  POST   /notes            - Create note");
    info!("  GET    /notes/:id        - Get note");
    info!("  PATCH  /notes/:id        - Update note (partial)");
    info!("  DELETE /notes/:id        - Delete note");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
