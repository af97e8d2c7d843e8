//! Backend access layer.
//!
//! This module covers everything between a cache miss and a backing
//! service: the closed set of backend kinds, the connector trait a
//! resolution fetches through, concrete connectors (regional HTTP
//! endpoint, environment variables for development), the factory that
//! constructs connectors from endpoint templates, and the region-keyed
//! pool that guarantees at most one connector per (kind, region).

pub mod connector;
pub mod env;
pub mod factory;
pub mod http;
pub mod kind;
pub mod pool;

pub use connector::{Connector, FetchError, FetchResult};
pub use env::EnvConnector;
pub use factory::{
    ConnectorFactory, RemoteConnectorFactory, ENV_DYNAMODB_ENDPOINT, ENV_PARAMETERS_ENDPOINT,
    ENV_SECRET_ENDPOINT, ENV_UPSTREAM_TIMEOUT,
};
pub use http::HttpConnector;
pub use kind::BackendKind;
pub use pool::ConnectorPool;
