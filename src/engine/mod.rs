//! # Cache Engine
//!
//! Owns all process-wide cache state: one store per backend kind plus
//! the connector pool. The dispatcher surface is two operations, `read`
//! and `write`; reads on fetchable kinds go through the fetch-through
//! resolver, writes are accepted for the custom kind only.
//!
//! Resolution policy: serve a usable entry without side effects; on a
//! miss or expiry fetch from the backend, overwrite the entry, and
//! return the fresh value. A fetch that answers with an empty value
//! overwrites the entry but still reads as a miss. A failed fetch never
//! destroys the previous entry: a previously fetched value is served
//! stale and retried on the next read, and only a resource with nothing
//! cached surfaces the failure as an upstream error. Concurrent
//! resolutions of the same name may each fetch; the last writer wins.

pub mod init;

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error as ThisError;
use tracing::{debug, info, warn};

use crate::backend::{BackendKind, ConnectorFactory, ConnectorPool, FetchError};
use crate::cache::{expiry_for, BackendStore, CacheEntry};
use crate::errors::Error;

/// Result type for dispatcher operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Failures a dispatcher operation can surface to the control plane.
#[derive(Debug, ThisError)]
pub enum EngineError {
    /// No usable value exists for the resource; empty counts as absent.
    #[error("No data for {kind}/{name}")]
    NoData { kind: BackendKind, name: String },

    /// Write attempted on a kind that only accepts backend fetches.
    #[error("Backend kind '{kind}' does not accept writes")]
    ReadOnly { kind: BackendKind },

    /// The backend fetch failed and no previously fetched value exists.
    #[error("Fetch failed for {kind}/{name}: {source}")]
    Upstream {
        kind: BackendKind,
        name: String,
        #[source]
        source: FetchError,
    },

    /// Configuration or internal failure outside the fetch path.
    #[error(transparent)]
    Internal(#[from] Error),
}

/// Process-wide fetch-through cache over the configured backends.
#[derive(Debug)]
pub struct CacheEngine {
    parameters: BackendStore,
    records: BackendStore,
    secrets: BackendStore,
    custom: BackendStore,
    pool: ConnectorPool,
    ttl: chrono::Duration,
    default_region: String,
}

impl CacheEngine {
    /// Create an empty engine.
    ///
    /// `ttl` applies to every kind and every resource; `default_region`
    /// backs resources configured without a region of their own.
    pub fn new(
        factory: Arc<dyn ConnectorFactory>,
        ttl: chrono::Duration,
        default_region: impl Into<String>,
    ) -> Self {
        Self {
            parameters: BackendStore::new(BackendKind::Parameters),
            records: BackendStore::new(BackendKind::Records),
            secrets: BackendStore::new(BackendKind::Secrets),
            custom: BackendStore::new(BackendKind::Custom),
            pool: ConnectorPool::new(factory),
            ttl,
            default_region: default_region.into(),
        }
    }

    /// The process-wide TTL.
    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Number of entries cached for `kind`, placeholders included.
    pub async fn entry_count(&self, kind: BackendKind) -> usize {
        self.store(kind).len().await
    }

    /// Read the value for `kind`/`name`.
    ///
    /// Fetchable kinds resolve through the backend on a miss or expiry;
    /// the custom kind is a plain lookup.
    pub async fn read(&self, kind: BackendKind, name: &str) -> EngineResult<String> {
        match kind {
            BackendKind::Custom => self.read_custom(name).await,
            BackendKind::Parameters | BackendKind::Records | BackendKind::Secrets => {
                self.resolve(kind, name).await
            }
        }
    }

    /// Store `value` under the custom kind. Overwrites unconditionally.
    pub async fn write(&self, kind: BackendKind, name: &str, value: &str) -> EngineResult<()> {
        match kind {
            BackendKind::Custom => {
                let entry = CacheEntry::new(value, "", expiry_for(Utc::now(), self.ttl));
                self.custom.insert(name, entry).await;
                Ok(())
            }
            other => Err(EngineError::ReadOnly { kind: other }),
        }
    }

    fn store(&self, kind: BackendKind) -> &BackendStore {
        match kind {
            BackendKind::Parameters => &self.parameters,
            BackendKind::Records => &self.records,
            BackendKind::Secrets => &self.secrets,
            BackendKind::Custom => &self.custom,
        }
    }

    async fn read_custom(&self, name: &str) -> EngineResult<String> {
        let now = Utc::now();
        match self.custom.get(name).await {
            Some(entry) if entry.is_usable(now) => Ok(entry.value),
            _ => Err(EngineError::NoData { kind: BackendKind::Custom, name: name.to_string() }),
        }
    }

    /// Fetch-through resolution for one resource.
    ///
    /// The entry's recorded region wins over the default region, and the
    /// region used for the first successful fetch stays with the entry
    /// for every later refresh.
    async fn resolve(&self, kind: BackendKind, name: &str) -> EngineResult<String> {
        let store = self.store(kind);
        let existing = store.get(name).await;

        if let Some(entry) = &existing {
            if entry.is_usable(Utc::now()) {
                debug!(kind = %kind, name = %name, "Cache hit");
                return Ok(entry.value.clone());
            }
        }

        let recorded = existing.as_ref().map(|e| e.region.as_str()).unwrap_or("");
        let region = resolve_region(recorded, &self.default_region);
        info!(kind = %kind, name = %name, region = %region, "Cache miss, fetching from backend");

        let connector = self.pool.get(kind, &region).await?;
        match connector.fetch(name).await {
            Ok(value) => {
                let entry = CacheEntry::new(value.clone(), region, expiry_for(Utc::now(), self.ttl));
                store.insert(name, entry).await;
                // An empty value is never served; the entry keeps its
                // region and the next read fetches again.
                if value.is_empty() {
                    warn!(kind = %kind, name = %name, "Backend returned an empty value");
                    return Err(EngineError::NoData { kind, name: name.to_string() });
                }
                Ok(value)
            }
            Err(err) => {
                warn!(
                    kind = %kind,
                    name = %name,
                    region = %region,
                    code = err.code(),
                    error = %err,
                    "Backend fetch failed, keeping previous cache state"
                );
                // An expired entry still beats no answer; the next read
                // retries the fetch.
                if let Some(entry) = existing {
                    if !entry.value.is_empty() {
                        info!(kind = %kind, name = %name, "Serving stale value after failed refresh");
                        return Ok(entry.value);
                    }
                }
                Err(EngineError::Upstream { kind, name: name.to_string(), source: err })
            }
        }
    }
}

/// A configured region wins; an empty one falls back to the default.
fn resolve_region(configured: &str, default_region: &str) -> String {
    if configured.is_empty() {
        default_region.to_string()
    } else {
        configured.to_string()
    }
}
