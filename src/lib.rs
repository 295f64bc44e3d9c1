pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod models;
pub mod tracking;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Errors that stop the host process.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Core(#[from] core_state::CoreError),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Signal error: {0}")]
    Signal(#[from] std::io::Error),
}

/// Initialize tracing, open the store, serve the API until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let server_config = config::ServerConfig::from_env();
    let core = Arc::new(core_state::CoreState::from_config(&server_config)?);

    let server = api::start_api_server(core, server_config.addr)
        .await
        .map_err(StartupError::Server)?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    server.stop().await;

    Ok(())
}
