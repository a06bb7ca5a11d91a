//! Application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use docvault_core::config::AppConfig;
use docvault_core::error::{AppError, ErrorKind};
use docvault_core::traits::BlobStore;
use docvault_database::DatabasePool;
use docvault_database::migration::run_migrations;
use docvault_storage::LocalBlobStore;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Runs the DocVault server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocVault server...");

    // ── Step 1: Data directories ─────────────────────────────
    create_data_directories(&config).await?;

    // ── Step 2: Database ─────────────────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    // ── Step 3: Blob store ───────────────────────────────────
    let blob_store: Arc<dyn BlobStore> =
        Arc::new(LocalBlobStore::new(&config.storage.blob_root).await?);
    tracing::info!(
        provider = blob_store.provider_type(),
        root = %config.storage.blob_root,
        "Blob store ready"
    );

    // ── Step 4: Services and router ──────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let prefix = config.server.api_prefix.clone();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::build(config, db.clone(), blob_store);
    let app = build_app(state);

    // ── Step 5: Serve ────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;
    tracing::info!(%addr, %prefix, "DocVault server listening");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    // In-flight requests get `grace` to finish once the signal fires.
    let served = tokio::select! {
        result = server => result,
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed");
            Ok(())
        }
    };
    served.map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    db.close().await;
    tracing::info!("DocVault server stopped");
    Ok(())
}

async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    for dir in [&config.storage.data_root, &config.storage.blob_root] {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create dir '{dir}'"),
                e,
            )
        })?;
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
