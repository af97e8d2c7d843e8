//! Error mapping for the control surface.
//!
//! Failed reads and writes each carry one fixed plaintext body; the
//! status code distinguishes a plain miss from a bad request, an
//! upstream outage, or a local fault.

use axum::{http::StatusCode, response::IntoResponse};

use crate::backend::FetchError;
use crate::engine::EngineError;

/// Body returned for every failed read.
pub const NO_DATA: &str = "No data found";

/// Body returned for every failed write.
pub const CANT_STORE: &str = "Can't store value to cache";

#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(&'static str),
    NotFound(&'static str),
    BadGateway(&'static str),
    Internal(&'static str),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a failed read to its response.
    ///
    /// A backend that reports the resource as missing is a miss, not an
    /// outage.
    pub fn from_read(err: EngineError) -> Self {
        match err {
            EngineError::NoData { .. } => ApiError::NotFound(NO_DATA),
            EngineError::ReadOnly { .. } => ApiError::BadRequest(NO_DATA),
            EngineError::Upstream { source: FetchError::NotFound { .. }, .. } => {
                ApiError::NotFound(NO_DATA)
            }
            EngineError::Upstream { .. } => ApiError::BadGateway(NO_DATA),
            EngineError::Internal(_) => ApiError::Internal(NO_DATA),
        }
    }

    /// Map a failed write to its response.
    pub fn from_write(err: EngineError) -> Self {
        match err {
            EngineError::ReadOnly { .. } => ApiError::BadRequest(CANT_STORE),
            EngineError::NoData { .. } => ApiError::NotFound(CANT_STORE),
            EngineError::Upstream { .. } => ApiError::BadGateway(CANT_STORE),
            EngineError::Internal(_) => ApiError::Internal(CANT_STORE),
        }
    }

    /// A read the dispatcher never saw: unknown kind or missing name.
    pub fn bad_read() -> Self {
        ApiError::BadRequest(NO_DATA)
    }

    /// A write the dispatcher never saw.
    pub fn bad_write() -> Self {
        ApiError::BadRequest(CANT_STORE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = match self {
            ApiError::BadRequest(body)
            | ApiError::NotFound(body)
            | ApiError::BadGateway(body)
            | ApiError::Internal(body) => body,
        };
        (status, body).into_response()
    }
}
