//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, worker spawning, and Axum server lifecycle.

use crate::application::services::ClickService;
use crate::config::Config;
use crate::domain::click_worker::{ClickWriter, run_click_worker};
use crate::domain::fraud::FraudPipeline;
use crate::domain::repositories::{BlocklistRepository, CampaignRepository, ClickRepository};
use crate::infrastructure::persistence::{
    PgBlocklistRepository, PgCampaignRepository, PgClickRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Creates the PostgreSQL pool from the `DB_*` pool settings.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Background click worker
/// - Axum HTTP server
///
/// On Ctrl+C or SIGTERM the server stops accepting connections, finishes
/// in-flight requests, then gives the click worker
/// `SHUTDOWN_DRAIN_SECONDS` to persist what is still queued.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = Arc::new(connect_pool(&config).await?);
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(pool.as_ref())
        .await
        .context("Failed to migrate")?;

    let campaigns: Arc<dyn CampaignRepository> =
        Arc::new(PgCampaignRepository::new(pool.clone()));
    let clicks: Arc<dyn ClickRepository> = Arc::new(PgClickRepository::new(pool.clone()));
    let blocklist: Arc<dyn BlocklistRepository> =
        Arc::new(PgBlocklistRepository::new(pool.clone()));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(
        click_rx,
        clicks.clone(),
        config.click_worker_concurrency,
        tracing::info_span!("click_worker"),
    ));
    tracing::info!(
        concurrency = config.click_worker_concurrency,
        "Click worker started"
    );

    let policy = config.fraud_policy();
    let fraud = FraudPipeline::standard(clicks, blocklist, &policy);
    tracing::info!(checks = ?fraud.check_names(), "Fraud pipeline ready");

    let click_writer = ClickWriter::new(click_tx, tracing::info_span!("click_queue"));
    let click_service = Arc::new(ClickService::new(
        campaigns.clone(),
        fraud,
        click_writer.clone(),
        policy.block_threshold,
        tracing::info_span!("click_service"),
    ));

    let state = AppState::new(click_service, campaigns, click_writer);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router and every ClickWriter are gone now, so the queue is closed.
    let drain = Duration::from_secs(config.shutdown_drain_seconds);
    match tokio::time::timeout(drain, worker).await {
        Ok(Ok(())) => tracing::info!("Click queue drained"),
        Ok(Err(e)) => tracing::error!(error = %e, "Click worker task failed"),
        Err(_) => tracing::warn!(
            seconds = config.shutdown_drain_seconds,
            "Click worker did not drain in time, pending clicks are lost"
        ),
    }

    pool.close().await;
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to register SIGTERM handler");
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
