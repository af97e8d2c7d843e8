//! Environment variable backend connector.
//!
//! Serves fetches from process environment variables instead of a real
//! backing service. Intended for development and testing only: it has no
//! regions, no encryption, and values are visible in process listings.
//!
//! Selected by pointing a backend endpoint at the `env://` scheme:
//!
//! ```bash
//! export CACHEPLANE_SECRET_ENDPOINT="env://CACHE_FIXTURE"
//! export CACHE_FIXTURE_DB_PASS="hunter2"
//! ```
//!
//! A fetch for `db-pass` then reads `CACHE_FIXTURE_DB_PASS`.

use async_trait::async_trait;
use std::env;

use super::connector::{Connector, FetchError, FetchResult};

/// Backend connector that reads values from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConnector {
    prefix: String,
}

impl EnvConnector {
    /// Creates a connector that reads variables under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Converts a resource name to the environment variable name.
    ///
    /// Uppercases the name and replaces every non-alphanumeric character
    /// with an underscore, so `/app/db-url` under prefix `FIXTURE`
    /// becomes `FIXTURE_APP_DB_URL`.
    fn name_to_env_var(&self, name: &str) -> String {
        let mangled: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("{}_{}", self.prefix, mangled.trim_matches('_'))
    }
}

#[async_trait]
impl Connector for EnvConnector {
    async fn fetch(&self, name: &str) -> FetchResult<String> {
        let env_var = self.name_to_env_var(name);

        env::var(&env_var).map_err(|_| {
            FetchError::not_found(format!("{} (looking for {})", name, env_var))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_to_env_var() {
        let connector = EnvConnector::new("CACHE_FIXTURE");
        assert_eq!(connector.name_to_env_var("db_pass"), "CACHE_FIXTURE_DB_PASS");
        assert_eq!(connector.name_to_env_var("db-pass"), "CACHE_FIXTURE_DB_PASS");
        assert_eq!(connector.name_to_env_var("/app/db_url"), "CACHE_FIXTURE_APP_DB_URL");
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let connector = EnvConnector::new("CACHE_FIXTURE");
        let result = connector.fetch("nonexistent_resource").await;
        assert!(matches!(result.unwrap_err(), FetchError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_from_env() {
        env::set_var("ENV_CONNECTOR_TEST_SOME_KEY", "some-value");

        let connector = EnvConnector::new("ENV_CONNECTOR_TEST");
        let result = connector.fetch("some/key").await;

        assert_eq!(result.unwrap(), "some-value");

        env::remove_var("ENV_CONNECTOR_TEST_SOME_KEY");
    }
}
