//! Region-keyed connector pool.
//!
//! Connectors are constructed lazily on first use and shared by every
//! resolution that targets the same backing service in the same region.
//! At most one connector exists per (kind, region) for the process
//! lifetime; construction runs under the table's write lock so racing
//! requests cannot double-construct.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::connector::Connector;
use super::factory::ConnectorFactory;
use super::kind::BackendKind;
use crate::errors::Result;

/// Shared pool of backend connectors, keyed by (kind, region).
pub struct ConnectorPool {
    factory: Arc<dyn ConnectorFactory>,
    connectors: RwLock<HashMap<(BackendKind, String), Arc<dyn Connector>>>,
}

impl std::fmt::Debug for ConnectorPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorPool").finish_non_exhaustive()
    }
}

impl ConnectorPool {
    /// Create an empty pool backed by `factory`.
    pub fn new(factory: Arc<dyn ConnectorFactory>) -> Self {
        Self { factory, connectors: RwLock::new(HashMap::new()) }
    }

    /// Return the connector for `(kind, region)`, constructing it on first use.
    ///
    /// Construction failures propagate to the caller and leave the pool
    /// unchanged, so a later call retries construction.
    pub async fn get(&self, kind: BackendKind, region: &str) -> Result<Arc<dyn Connector>> {
        let key = (kind, region.to_string());

        if let Some(connector) = self.connectors.read().await.get(&key) {
            return Ok(connector.clone());
        }

        let mut connectors = self.connectors.write().await;
        // A racing request may have constructed it while we waited.
        if let Some(connector) = connectors.get(&key) {
            return Ok(connector.clone());
        }

        let connector = self.factory.connect(kind, region)?;
        connectors.insert(key, connector.clone());
        debug!(kind = %kind, region = %region, "Constructed backend connector");
        Ok(connector)
    }

    /// Number of live connectors.
    pub async fn len(&self) -> usize {
        self.connectors.read().await.len()
    }

    /// Whether the pool has constructed any connector yet.
    pub async fn is_empty(&self) -> bool {
        self.connectors.read().await.is_empty()
    }
}
