//! Router assembly for the control surface.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use crate::engine::CacheEngine;
use crate::observability::record_request;

use super::handlers::{read_value_handler, write_value_handler};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<CacheEngine>,
}

pub fn build_router(engine: Arc<CacheEngine>) -> Router {
    let state = ApiState { engine };

    Router::new()
        .route("/{kind}", get(read_value_handler))
        .route("/{kind}/{name}", put(write_value_handler))
        .layer(middleware::from_fn(record_request))
        .with_state(state)
}
