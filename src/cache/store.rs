//! Per-kind cache store.
//!
//! Each backend kind owns one store; names never collide across kinds.
//! The map is guarded by a single-writer/multiple-reader lock so
//! concurrent request workers and the startup initializer can touch it
//! safely. Expired entries are kept until overwritten, which is what
//! lets a failed refresh fall back to the previous value.

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::entry::CacheEntry;
use crate::backend::BackendKind;

/// Synchronized name-to-entry map for one backend kind.
#[derive(Debug)]
pub struct BackendStore {
    kind: BackendKind,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl BackendStore {
    /// Create an empty store for `kind`.
    pub fn new(kind: BackendKind) -> Self {
        Self { kind, entries: RwLock::new(HashMap::new()) }
    }

    /// The backend kind this store belongs to.
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Snapshot the entry for `name`, expired or not.
    pub async fn get(&self, name: &str) -> Option<CacheEntry> {
        self.entries.read().await.get(name).cloned()
    }

    /// Insert or overwrite the entry for `name`. Last writer wins.
    pub async fn insert(&self, name: &str, entry: CacheEntry) {
        let mut entries = self.entries.write().await;
        debug!(kind = %self.kind, name = %name, region = %entry.region, "Caching value");
        entries.insert(name.to_string(), entry);
    }

    /// Register `name` with a placeholder entry recording its region.
    ///
    /// Returns false without touching the map when the name is already
    /// present, so duplicate configuration cannot clobber cached state.
    pub async fn register(&self, name: &str, region: &str) -> bool {
        let mut entries = self.entries.write().await;
        if entries.contains_key(name) {
            return false;
        }
        entries.insert(name.to_string(), CacheEntry::placeholder(region));
        true
    }

    /// Number of entries, including placeholders and expired values.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store has no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = BackendStore::new(BackendKind::Secrets);
        let entry = CacheEntry::new("hunter2", "us-east-1", Utc::now() + Duration::minutes(5));

        store.insert("db-pass", entry.clone()).await;

        assert_eq!(store.get("db-pass").await, Some(entry));
        assert!(store.get("other").await.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let store = BackendStore::new(BackendKind::Parameters);
        let expires_at = Utc::now() + Duration::minutes(5);

        store.insert("flag", CacheEntry::new("old", "us-east-1", expires_at)).await;
        store.insert("flag", CacheEntry::new("new", "us-east-1", expires_at)).await;

        assert_eq!(store.get("flag").await.unwrap().value, "new");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_inserts_placeholder() {
        let store = BackendStore::new(BackendKind::Secrets);

        assert!(store.register("db-pass", "eu-west-1").await);

        let entry = store.get("db-pass").await.unwrap();
        assert_eq!(entry.region, "eu-west-1");
        assert!(entry.value.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_is_noop() {
        let store = BackendStore::new(BackendKind::Secrets);
        let entry = CacheEntry::new("hunter2", "us-east-1", Utc::now() + Duration::minutes(5));
        store.insert("db-pass", entry.clone()).await;

        assert!(!store.register("db-pass", "eu-west-1").await);

        // The existing entry survives untouched.
        assert_eq!(store.get("db-pass").await, Some(entry));
        assert_eq!(store.len().await, 1);
    }
}
