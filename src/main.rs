//! LMS Storage - quota-aware client storage for the LMS frontend
//!
//! Serves the built frontend and exposes the storage layer over HTTP.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lms_storage::api::create_router;
use lms_storage::{run_startup_maintenance, spawn_cleanup_task, AppState, Config};

/// Main entry point for the LMS storage server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the quota-limited store with configured priority tiers
/// 4. Run the migration and cleanup passes once
/// 5. Start the periodic cleanup task if an interval is configured
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lms_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LMS Storage Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: quota={:?} bytes, cleanup_limit={}, port={}, maintenance_interval={}s, static_dir={}",
        config.quota_bytes,
        config.cleanup_limit,
        config.server_port,
        config.maintenance_interval,
        config.static_dir.display()
    );

    let state = AppState::from_config(&config);
    {
        let mut storage = state.storage.write().await;
        run_startup_maintenance(&mut *storage, &state.maintenance);
    }
    info!("Storage initialized");

    let cleanup_handle = if config.maintenance_interval > 0 {
        info!("Background cleanup task started");
        Some(spawn_cleanup_task(
            state.storage.clone(),
            state.maintenance.cleanup_keys.clone(),
            state.maintenance.cleanup_limit,
            config.maintenance_interval,
        ))
    } else {
        None
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
