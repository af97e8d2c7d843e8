//! Backend connector trait and fetch error types.

use async_trait::async_trait;
use thiserror::Error;

/// Result type for backend fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Errors a backend can return for a single fetch.
///
/// The set mirrors the failure codes the backing services report. The
/// engine logs the code and keeps whatever cache state it already had;
/// callers only see that the fetch did not produce a value.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The backend could not decode or decrypt the stored value.
    #[error("Decryption failure for '{name}': {message}")]
    DecryptionFailure { name: String, message: String },

    /// The backend reported an internal fault.
    #[error("Internal service error for '{name}': {message}")]
    InternalService { name: String, message: String },

    /// The backend rejected a request parameter.
    #[error("Invalid parameter for '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// The backend rejected the request as malformed.
    #[error("Invalid request for '{name}': {message}")]
    InvalidRequest { name: String, message: String },

    /// The named resource does not exist in the backend.
    #[error("Resource not found: {name}")]
    NotFound { name: String },

    /// Transport failures and anything the backend did not classify.
    #[error("Fetch failed for '{name}': {message}")]
    Unclassified { name: String, message: String },
}

impl FetchError {
    /// Create a decryption failure error.
    pub fn decryption_failure(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DecryptionFailure { name: name.into(), message: message.into() }
    }

    /// Create an internal service error.
    pub fn internal_service(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InternalService { name: name.into(), message: message.into() }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter { name: name.into(), message: message.into() }
    }

    /// Create an invalid request error.
    pub fn invalid_request(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequest { name: name.into(), message: message.into() }
    }

    /// Create a not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create an unclassified error.
    pub fn unclassified(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unclassified { name: name.into(), message: message.into() }
    }

    /// Stable code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DecryptionFailure { .. } => "decryption_failure",
            Self::InternalService { .. } => "internal_service_error",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::NotFound { .. } => "not_found",
            Self::Unclassified { .. } => "unclassified",
        }
    }
}

/// Trait for backend connectors
///
/// A connector holds an open session against one backing service in one
/// region and fetches current values by resource name. Implementations
/// must be Send + Sync for use in async contexts.
#[async_trait]
pub trait Connector: Send + Sync + std::fmt::Debug {
    /// Fetch the current value for `name` from the backing service.
    async fn fetch(&self, name: &str) -> FetchResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = FetchError::not_found("db-pass");
        assert!(matches!(err, FetchError::NotFound { .. }));
        assert_eq!(err.to_string(), "Resource not found: db-pass");

        let err = FetchError::invalid_request("db-pass", "missing version stage");
        assert!(matches!(err, FetchError::InvalidRequest { .. }));
        assert!(err.to_string().contains("db-pass"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(FetchError::decryption_failure("a", "b").code(), "decryption_failure");
        assert_eq!(FetchError::internal_service("a", "b").code(), "internal_service_error");
        assert_eq!(FetchError::invalid_parameter("a", "b").code(), "invalid_parameter");
        assert_eq!(FetchError::invalid_request("a", "b").code(), "invalid_request");
        assert_eq!(FetchError::not_found("a").code(), "not_found");
        assert_eq!(FetchError::unclassified("a", "b").code(), "unclassified");
    }
}
