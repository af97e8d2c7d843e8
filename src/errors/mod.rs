//! # Error Handling
//!
//! Crate-level error types for the cacheplane daemon, built on `thiserror`.
//! This type covers the faults the daemon itself is responsible for:
//! configuration problems, control-server transport faults, and internal
//! faults such as a connector that cannot be constructed. Per-fetch backend
//! failures live in `crate::backend`, and dispatch outcomes in
//! `crate::engine`; both bottom out here only when the daemon is at fault.

/// Custom result type for cacheplane operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the cacheplane daemon.
///
/// Configuration errors abort startup when raised there; raised on the
/// request path (a backend kind with no endpoint configured), they fail
/// only that request.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Malformed environment values, an unreadable or invalid resource
    /// file, or an endpoint template that cannot produce a connector
    #[error("Configuration error: {0}")]
    Config(String),

    /// Control-server bind and serve faults
    #[error("Transport error: {0}")]
    Transport(String),

    /// Faults with no better classification, such as a failed HTTP
    /// client construction
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
