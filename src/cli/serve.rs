//! Serve command - runs the HTTP API

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use super::{build_socket_addr, load_config};
use crate::api::create_router_with_state;
use crate::infrastructure::logging;
use crate::infrastructure::observability::init_metrics;

pub async fn run() -> anyhow::Result<()> {
    let config = load_config();
    logging::init_logging(&config.logging)?;
    config.validate()?;

    let config = Arc::new(config);
    let metrics = init_metrics(&config.metrics);
    let state = crate::create_app_state(Arc::clone(&config));
    let app = create_router_with_state(state, metrics);

    let addr = build_socket_addr(&config)?;
    info!(
        default_threshold = config.cache.default_threshold,
        apply_delays = config.latency.apply_delays,
        "Starting semantic cache server on {}",
        addr
    );

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
