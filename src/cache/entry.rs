//! Cache entry representation.
//!
//! An entry is the unit of cached state: the last known value for a
//! resource, the absolute instant it stops being fresh, and the region
//! it was (or will be) fetched from. Expiry is evaluated against a
//! caller-supplied clock so policy stays testable without sleeping.

use chrono::{DateTime, Duration, Utc};

/// One cached value with its expiry and fetch region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Last value obtained for the resource. Empty means "no value yet".
    pub value: String,
    /// Instant at which the value stops being served without a refresh.
    pub expires_at: DateTime<Utc>,
    /// Region the value is fetched from. Sticky once set.
    pub region: String,
}

impl CacheEntry {
    /// Create a populated entry.
    pub fn new(
        value: impl Into<String>,
        region: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self { value: value.into(), expires_at, region: region.into() }
    }

    /// Create a known-but-unfetched entry recording only the region.
    ///
    /// The epoch expiry makes the entry immediately refreshable; the
    /// empty value keeps it unusable until the first fetch lands.
    pub fn placeholder(region: impl Into<String>) -> Self {
        Self { value: String::new(), expires_at: DateTime::<Utc>::UNIX_EPOCH, region: region.into() }
    }

    /// Whether the entry's freshness window has closed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the entry can be served without consulting the backend.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.value.is_empty() && !self.is_expired(now)
    }
}

/// Compute the expiry instant for a value cached at `now`.
pub fn expiry_for(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    now + ttl
}
