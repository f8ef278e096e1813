//! # Pernos Web Server
//!
//! Loads configuration, opens (and migrates) the store, and serves the API
//! until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::{error, info, warn};

use pernos_db::{Database, DbConfig};
use pernos_web::config::WebConfig;
use pernos_web::{build_router, init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Pernos POS web server...");

    // Load configuration
    let config = WebConfig::load().context("Failed to load configuration")?;
    info!(
        port = config.http_port,
        db_path = %config.db_path.display(),
        "Configuration loaded"
    );
    if config.uses_dev_secret() {
        warn!("PERNOS_JWT_SECRET is not set, using the development secret");
    }

    // Open database (migrations run on connect)
    let db = Database::new(
        DbConfig::new(config.db_path.clone()).max_connections(config.db_max_connections),
    )
    .await
    .context("Failed to open database")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(db.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
