// ABOUTME: Server entry point for the feature board
// ABOUTME: Wires configuration, storage and the API router behind CORS with graceful shutdown

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use featureboard_api::{create_router, AppState};
use featureboard_storage::FeatureBoard;

pub mod config;

pub use config::{Config, ConfigError};

#[cfg(test)]
mod tests;

/// Install the fmt subscriber; `RUST_LOG` overrides the default `info` level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// The API router with the configured CORS policy applied
pub fn build_app(board: Arc<FeatureBoard>, config: &Config) -> Result<Router, ConfigError> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| ConfigError::InvalidCorsOrigin(config.cors_origin.clone()))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let state = AppState::new(board, config.default_user_id.clone());
    Ok(create_router(state).layer(cors))
}

/// Open the database and serve the API until Ctrl+C or SIGTERM
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;

    info!("Opening database at {}", config.database_path.display());
    let board = FeatureBoard::open(&config.database_config())
        .await
        .context("failed to open the feature board database")?;

    let app = build_app(Arc::new(board), &config)?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Feature board API listening on http://{}", addr);
    info!("CORS origin: {}", config.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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
}
