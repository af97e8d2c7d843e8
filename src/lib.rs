//! # Cacheplane
//!
//! A fetch-through caching daemon for configuration material: parameters,
//! database records, secrets, and ad-hoc key/value pairs. Values live in
//! process-local maps with a shared TTL; expired or missing entries are
//! fetched from their backing service on demand, and a loopback HTTP
//! port exposes the cache to co-located processes.
//!
//! ## Architecture
//!
//! ```text
//! Control Surface (axum) → Cache Engine → Connector Pool → Backends
//!          ↓                    ↓
//!    Observability        Resource Config
//! ```
//!
//! ## Core Components
//!
//! - **Control Surface**: Loopback HTTP server for reads and writes
//! - **Cache Engine**: Per-kind stores with fetch-through resolution
//! - **Connector Pool**: One live backend session per (kind, region)
//! - **Resource Config**: YAML file naming the resources to register

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod engine;
pub mod errors;
pub mod observability;

// Re-export commonly used types and traits
pub use config::{LogSettings, ResourceFile, Settings};
pub use engine::CacheEngine;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_available() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "cacheplane");
    }
}
