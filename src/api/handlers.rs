//! Read and write handlers for the cache port.
//!
//! Success responses are bare plain text: the cached value for reads,
//! `OK` for writes. Failure bodies come from [`super::error`].

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::{info, warn};

use crate::backend::BackendKind;

use super::error::ApiError;
use super::routes::ApiState;

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WriteQuery {
    #[serde(default)]
    pub value: Option<String>,
}

/// `GET /{kind}?name=...`
pub async fn read_value_handler(
    State(state): State<ApiState>,
    Path(kind): Path<String>,
    Query(query): Query<ReadQuery>,
) -> Result<String, ApiError> {
    let kind: BackendKind = kind.parse().map_err(|err: String| {
        warn!(error = %err, "Read rejected");
        ApiError::bad_read()
    })?;

    let name = match query.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => {
            warn!(kind = %kind, "Read rejected, no name given");
            return Err(ApiError::bad_read());
        }
    };

    // Dispatcher failures are already logged with backend detail.
    state.engine.read(kind, name).await.map_err(ApiError::from_read)
}

/// `PUT /{kind}/{name}?value=...`
///
/// A missing `value` stores the empty string, which later reads treat
/// as a miss.
pub async fn write_value_handler(
    State(state): State<ApiState>,
    Path((kind, name)): Path<(String, String)>,
    Query(query): Query<WriteQuery>,
) -> Result<&'static str, ApiError> {
    let kind: BackendKind = kind.parse().map_err(|err: String| {
        warn!(error = %err, "Write rejected");
        ApiError::bad_write()
    })?;

    let value = query.value.unwrap_or_default();
    state.engine.write(kind, &name, &value).await.map_err(ApiError::from_write)?;

    info!(kind = %kind, name = %name, "Stored value");
    Ok("OK")
}
