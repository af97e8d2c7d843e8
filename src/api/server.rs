//! Control server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Settings;
use crate::engine::CacheEngine;
use crate::errors::Error;

use super::routes::build_router;

/// Bind the control server and serve until interrupted.
pub async fn start_server(settings: &Settings, engine: Arc<CacheEngine>) -> crate::Result<()> {
    let addr: SocketAddr = settings
        .listen_address()
        .parse()
        .map_err(|e| Error::config(format!("Invalid listen address: {}", e)))?;

    let router = build_router(engine);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::transport(format!("Failed to bind control server: {}", e)))?;

    info!(address = %addr, "Starting control server");
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Control server shutdown listener failed");
            }
        })
        .await
        .map_err(|e| Error::transport(format!("Control server error: {}", e)))?;

    info!("Control server shutdown completed");
    Ok(())
}
