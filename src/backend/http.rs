//! HTTP backend connector.
//!
//! Talks to a backing service over its regional HTTP endpoint. A fetch is
//! a single GET of `{base_url}/{name}`; the response body is either the
//! raw value or a small JSON envelope with a `value` field (plaintext) or
//! a `binary` field (base64). Upstream failure statuses are mapped onto
//! the fetch error codes the engine logs.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use super::connector::{Connector, FetchError, FetchResult};
use crate::errors::{Error, Result};

/// Backend connector that fetches values from a regional HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    base_url: String,
    client: reqwest::Client,
}

impl HttpConnector {
    /// Create a connector for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            Error::internal(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { base_url: base_url.into().trim_end_matches('/').to_string(), client })
    }

    fn value_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(name))
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn fetch(&self, name: &str) -> FetchResult<String> {
        let url = self.value_url(name);
        debug!(url = %url, "Fetching value from backend endpoint");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::unclassified(name, format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| FetchError::unclassified(name, format!("failed to read response body: {}", e)))?;
            return decode_payload(name, &body);
        }

        let message = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => FetchError::not_found(name),
            StatusCode::BAD_REQUEST => FetchError::invalid_request(name, message),
            StatusCode::FORBIDDEN => FetchError::invalid_parameter(name, message),
            s if s.is_server_error() => FetchError::internal_service(name, message),
            s => FetchError::unclassified(name, format!("status {}: {}", s, message)),
        })
    }
}

/// Unwrap a backend response body into the cached string value.
///
/// Plaintext values may arrive raw or as `{"value": "..."}`. Binary
/// values arrive as `{"binary": "<base64>"}` and must decode to UTF-8.
fn decode_payload(name: &str, body: &str) -> FetchResult<String> {
    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) else {
        return Ok(body.to_string());
    };
    let Some(object) = parsed.as_object() else {
        return Ok(body.to_string());
    };

    if let Some(text) = object.get("value").and_then(|v| v.as_str()) {
        return Ok(text.to_string());
    }

    if let Some(encoded) = object.get("binary").and_then(|v| v.as_str()) {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| FetchError::decryption_failure(name, format!("invalid base64 payload: {}", e)))?;
        return String::from_utf8(bytes)
            .map_err(|e| FetchError::decryption_failure(name, format!("binary payload is not UTF-8: {}", e)));
    }

    Ok(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_decode_raw_payload() {
        assert_eq!(decode_payload("k", "hunter2").unwrap(), "hunter2");
        assert_eq!(decode_payload("k", "").unwrap(), "");
        // Non-object JSON is treated as a raw value.
        assert_eq!(decode_payload("k", "[1,2]").unwrap(), "[1,2]");
    }

    #[test]
    fn test_decode_value_field() {
        assert_eq!(decode_payload("k", r#"{"value":"hunter2"}"#).unwrap(), "hunter2");
    }

    #[test]
    fn test_decode_binary_field() {
        // "hunter2" base64-encoded
        assert_eq!(decode_payload("k", r#"{"binary":"aHVudGVyMg=="}"#).unwrap(), "hunter2");
    }

    #[test]
    fn test_decode_invalid_base64() {
        let err = decode_payload("k", r#"{"binary":"!!!"}"#).unwrap_err();
        assert!(matches!(err, FetchError::DecryptionFailure { .. }));
    }

    #[test]
    fn test_decode_object_without_known_fields() {
        let body = r#"{"other":"x"}"#;
        assert_eq!(decode_payload("k", body).unwrap(), body);
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/db-pass"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hunter2"))
            .mount(&server)
            .await;

        let connector = HttpConnector::new(server.uri(), Duration::from_secs(2)).unwrap();
        assert_eq!(connector.fetch("db-pass").await.unwrap(), "hunter2");
    }

    #[tokio::test]
    async fn test_fetch_json_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/db-pass"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"value":"from-envelope"}"#),
            )
            .mount(&server)
            .await;

        let connector = HttpConnector::new(server.uri(), Duration::from_secs(2)).unwrap();
        assert_eq!(connector.fetch("db-pass").await.unwrap(), "from-envelope");
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let connector = HttpConnector::new(server.uri(), Duration::from_secs(2)).unwrap();
        let err = connector.fetch("missing").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let connector = HttpConnector::new(server.uri(), Duration::from_secs(2)).unwrap();
        let err = connector.fetch("broken").await.unwrap_err();
        assert!(matches!(err, FetchError::InternalService { .. }));
        assert_eq!(err.code(), "internal_service_error");
    }

    #[tokio::test]
    async fn test_fetch_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/odd"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let connector = HttpConnector::new(server.uri(), Duration::from_secs(2)).unwrap();
        let err = connector.fetch("odd").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Port 9 is discard; nothing listens there in the test environment.
        let connector =
            HttpConnector::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let err = connector.fetch("anything").await.unwrap_err();
        assert!(matches!(err, FetchError::Unclassified { .. }));
    }
}
