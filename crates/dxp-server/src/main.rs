//! DXP Server - Main entry point

use anyhow::Result;
use dxp_common::logging::{init_logging, LogConfig};
use dxp_server::{
    config::Config,
    db::PgPendingSource,
    routes::{routes, AppState},
};
use dxp_sync::{
    AvailabilityProbe, Dispatcher, ExistenceChecker, HttpDownloadWorker, Orchestrator,
    S3ObjectStore, S3Options,
};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with configuration from environment
    let log_config = LogConfig::from_env().unwrap_or_default();
    init_logging(&log_config)?;

    info!("Starting DXP Server");

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    // Initialize database connection pool
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    info!("Database connection pool established");

    // Shared HTTP client for the probe and the worker invocation
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.downloads.probe_timeout_secs))
        .build()?;

    // S3-backed existence checks against the destination bucket
    let store = S3ObjectStore::connect(
        config.downloads.bucket.clone(),
        S3Options {
            region: config.downloads.s3_region.clone(),
            endpoint: config.downloads.s3_endpoint.clone(),
            path_style: config.downloads.s3_path_style,
        },
    )
    .await;
    info!(bucket = %config.downloads.bucket, "Storage client initialized");

    let dispatcher = Dispatcher::new(
        AvailabilityProbe::new(http_client.clone()),
        ExistenceChecker::new(Arc::new(store)),
        Arc::new(HttpDownloadWorker::new(
            http_client,
            config.downloads.worker_endpoint.clone(),
        )),
        config.downloads.bucket.clone(),
    );

    let orchestrator = Orchestrator::new(Arc::new(PgPendingSource::new(db_pool)), dispatcher)
        .with_max_concurrent(config.downloads.max_concurrent_dispatches);

    let app = routes(AppState {
        orchestrator: Arc::new(orchestrator),
    })
    .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
