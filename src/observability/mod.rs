//! # Observability
//!
//! Subscriber setup plus the request-logging middleware for the control
//! surface. Log output is line-oriented by default and JSON when
//! configured; `RUST_LOG` overrides the configured level filter.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, info_span, warn, Instrument};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::LogSettings;
use crate::errors::Result;

/// Install the global tracing subscriber.
pub fn init_tracing(settings: &LogSettings) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed =
        if settings.json { builder.json().try_init() } else { builder.try_init() };

    if installed.is_err() {
        // Subscriber already set elsewhere (e.g. integration tests); ignore.
    }
    Ok(())
}

/// Axum middleware that wraps each request in a span and logs its outcome.
///
/// The span carries a fresh request id, so dispatcher and backend logs
/// emitted while handling the request correlate with the access line.
pub async fn record_request(request: Request, next: Next) -> Response {
    let span = info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %Uuid::new_v4(),
    );

    let start = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let _guard = span.enter();
    if response.status().is_server_error() {
        warn!(status, elapsed_ms, "Request failed");
    } else {
        info!(status, elapsed_ms, "Request handled");
    }
    response
}
