//! nyc311-api - HTTP API server for NYC 311 service requests

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};

use nyc311_api::config::ApiConfig;
use nyc311_api::{logging, router, AppState};
use nyc311_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;
    let _log_guard = logging::init_tracing(&config.log);

    info!(
        log_format = ?config.log.format,
        log_file = config.log.file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let addr = config.bind_addr()?;

    info!("Connecting to database...");
    let db = Database::connect_with_config(&config.database_url, config.pool_config())
        .await
        .context("Failed to connect to database")?;
    info!("Database connected");

    if config.run_migrations {
        info!("Running migrations...");
        db.migrate().await.context("Failed to run migrations")?;
        info!("Migrations complete");
    }

    nyc311_db::log_pool_metrics(db.pool());

    let state = AppState::new(Arc::new(db.service_requests.clone()));
    let app = router(state, config.cors_origins());

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.pool().close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
