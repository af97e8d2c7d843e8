//! Common test utilities for all integration tests.
//!
//! Provides the in-memory backend fixtures shared by the engine and
//! control-surface scenarios.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use cacheplane::backend::{BackendKind, Connector, ConnectorFactory, FetchError, FetchResult};
use cacheplane::engine::CacheEngine;

/// Connector serving values from an in-memory table, with fault injection.
#[derive(Debug, Default)]
pub struct RecordingConnector {
    values: Mutex<HashMap<String, String>>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl RecordingConnector {
    pub fn set(&self, name: &str, value: &str) {
        self.values.lock().unwrap().insert(name.to_string(), value.to_string());
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for RecordingConnector {
    async fn fetch(&self, name: &str) -> FetchResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(FetchError::internal_service(name, "injected failure"));
        }
        self.values
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::not_found(name))
    }
}

/// Factory handing out one shared [`RecordingConnector`] for every kind.
#[derive(Debug)]
pub struct RecordingFactory {
    connector: Arc<RecordingConnector>,
    regions: Mutex<Vec<(BackendKind, String)>>,
}

impl RecordingFactory {
    pub fn new(connector: Arc<RecordingConnector>) -> Self {
        Self { connector, regions: Mutex::new(Vec::new()) }
    }

    pub fn connected_regions(&self) -> Vec<(BackendKind, String)> {
        self.regions.lock().unwrap().clone()
    }
}

impl ConnectorFactory for RecordingFactory {
    fn connect(&self, kind: BackendKind, region: &str) -> cacheplane::Result<Arc<dyn Connector>> {
        self.regions.lock().unwrap().push((kind, region.to_string()));
        Ok(self.connector.clone())
    }
}

/// An engine over a fresh recording backend, default region `us-east-1`.
pub fn engine_with_ttl(ttl: chrono::Duration) -> (Arc<CacheEngine>, Arc<RecordingConnector>) {
    let connector = Arc::new(RecordingConnector::default());
    let factory = Arc::new(RecordingFactory::new(connector.clone()));
    let engine = Arc::new(CacheEngine::new(factory, ttl, "us-east-1"));
    (engine, connector)
}

/// A control-surface router over a fresh recording backend.
pub fn router_with_ttl(
    ttl: chrono::Duration,
) -> (Router, Arc<CacheEngine>, Arc<RecordingConnector>) {
    let (engine, connector) = engine_with_ttl(ttl);
    (cacheplane::api::build_router(engine.clone()), engine, connector)
}

/// Read the full response body as text.
pub async fn body_text(response: axum::response::Response) -> String {
    use http_body_util::BodyExt;

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
