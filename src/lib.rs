pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;

pub use config::Config;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Auditarr v{} starting...", env!("CARGO_PKG_VERSION"));

    let state = api::create_app_state_from_config(config.clone()).await?;
    let store = state.store.clone();

    let app = api::router(state);
    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Session API listening at http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Release the pool on both the normal and the error exit path.
    if let Err(e) = store.close().await {
        error!("Error closing database connection: {}", e);
    }

    served?;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
