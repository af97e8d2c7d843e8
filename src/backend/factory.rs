//! Connector construction.
//!
//! The factory turns a (backend kind, region) pair into a live connector.
//! Endpoints come from per-kind environment variables holding a URL
//! template; `{region}` in the template is replaced with the resolved
//! region, so one variable covers every region the daemon touches:
//!
//! ```bash
//! export CACHEPLANE_SECRET_ENDPOINT="https://secrets.{region}.internal/v1"
//! export CACHEPLANE_PARAMETERS_ENDPOINT="https://params.{region}.internal"
//! ```
//!
//! An `env://PREFIX` template selects the environment-variable connector
//! instead of a network one, for development and tests.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use super::connector::Connector;
use super::env::EnvConnector;
use super::http::HttpConnector;
use super::kind::BackendKind;
use crate::config::parse_duration;
use crate::errors::{Error, Result};

/// Endpoint template for parameter fetches.
pub const ENV_PARAMETERS_ENDPOINT: &str = "CACHEPLANE_PARAMETERS_ENDPOINT";
/// Endpoint template for record fetches.
pub const ENV_DYNAMODB_ENDPOINT: &str = "CACHEPLANE_DYNAMODB_ENDPOINT";
/// Endpoint template for secret fetches.
pub const ENV_SECRET_ENDPOINT: &str = "CACHEPLANE_SECRET_ENDPOINT";
/// Per-request timeout applied to backend fetches.
pub const ENV_UPSTREAM_TIMEOUT: &str = "CACHEPLANE_UPSTREAM_TIMEOUT";

const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for connector factories
///
/// Given a backend kind and a resolved region, open a session against
/// the backing service. Construction failures are configuration-class:
/// the caller aborts startup or fails the current request, and nothing
/// is cached.
pub trait ConnectorFactory: Send + Sync {
    /// Construct a connector for `kind` scoped to `region`.
    fn connect(&self, kind: BackendKind, region: &str) -> Result<Arc<dyn Connector>>;
}

/// Factory that builds connectors from endpoint templates.
#[derive(Debug, Clone)]
pub struct RemoteConnectorFactory {
    endpoints: HashMap<BackendKind, String>,
    timeout: Duration,
}

impl RemoteConnectorFactory {
    /// Create a factory from explicit endpoint templates.
    pub fn new(endpoints: HashMap<BackendKind, String>, timeout: Duration) -> Self {
        Self { endpoints, timeout }
    }

    /// Read endpoint templates and the upstream timeout from the environment.
    ///
    /// Kinds without a configured endpoint stay unconfigured; connecting
    /// to them later fails with a configuration error.
    pub fn from_env() -> Result<Self> {
        let mut endpoints = HashMap::new();
        for kind in BackendKind::FETCHABLE {
            if let Ok(value) = env::var(endpoint_var(kind)) {
                if !value.is_empty() {
                    endpoints.insert(kind, value);
                }
            }
        }

        let timeout = match env::var(ENV_UPSTREAM_TIMEOUT) {
            Ok(value) => parse_duration(&value)?.to_std().map_err(|e| {
                Error::config(format!("Invalid {}: {}", ENV_UPSTREAM_TIMEOUT, e))
            })?,
            Err(_) => DEFAULT_UPSTREAM_TIMEOUT,
        };

        Ok(Self { endpoints, timeout })
    }
}

impl ConnectorFactory for RemoteConnectorFactory {
    fn connect(&self, kind: BackendKind, region: &str) -> Result<Arc<dyn Connector>> {
        let template = self.endpoints.get(&kind).ok_or_else(|| {
            Error::config(format!(
                "No endpoint configured for backend kind '{}' (set {})",
                kind,
                endpoint_var(kind)
            ))
        })?;

        if let Some(prefix) = template.strip_prefix("env://") {
            return Ok(Arc::new(EnvConnector::new(prefix)));
        }

        let base_url = render_endpoint(template, region)?;
        Ok(Arc::new(HttpConnector::new(base_url, self.timeout)?))
    }
}

fn endpoint_var(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::Parameters => ENV_PARAMETERS_ENDPOINT,
        BackendKind::Records => ENV_DYNAMODB_ENDPOINT,
        BackendKind::Secrets => ENV_SECRET_ENDPOINT,
        // Custom entries have no backing service and never reach the factory.
        BackendKind::Custom => "CACHEPLANE_CUSTOM_ENDPOINT",
    }
}

fn render_endpoint(template: &str, region: &str) -> Result<String> {
    if !template.contains("{region}") {
        return Ok(template.to_string());
    }
    if region.is_empty() {
        return Err(Error::config(format!(
            "Endpoint template '{}' requires a region but none was resolved",
            template
        )));
    }
    Ok(template.replace("{region}", region))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory_with(kind: BackendKind, template: &str) -> RemoteConnectorFactory {
        let mut endpoints = HashMap::new();
        endpoints.insert(kind, template.to_string());
        RemoteConnectorFactory::new(endpoints, Duration::from_secs(1))
    }

    #[test]
    fn test_render_endpoint() {
        assert_eq!(
            render_endpoint("https://s.{region}.internal", "us-east-1").unwrap(),
            "https://s.us-east-1.internal"
        );
        assert_eq!(render_endpoint("http://localhost:9999", "").unwrap(), "http://localhost:9999");
        assert!(render_endpoint("https://s.{region}.internal", "").is_err());
    }

    #[test]
    fn test_connect_unconfigured_kind() {
        let factory = factory_with(BackendKind::Secrets, "http://localhost:9999");
        let err = factory.connect(BackendKind::Parameters, "us-east-1").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(ENV_PARAMETERS_ENDPOINT));
    }

    #[test]
    fn test_connect_env_scheme() {
        let factory = factory_with(BackendKind::Secrets, "env://FIXTURE");
        // Region is irrelevant for the env connector.
        assert!(factory.connect(BackendKind::Secrets, "").is_ok());
    }

    #[test]
    fn test_connect_http_endpoint() {
        let factory = factory_with(BackendKind::Records, "https://ddb.{region}.internal");
        assert!(factory.connect(BackendKind::Records, "eu-west-1").is_ok());
        assert!(factory.connect(BackendKind::Records, "").is_err());
    }

    #[test]
    fn test_connect_custom_rejected() {
        let factory = factory_with(BackendKind::Secrets, "http://localhost:9999");
        assert!(factory.connect(BackendKind::Custom, "us-east-1").is_err());
    }
}
