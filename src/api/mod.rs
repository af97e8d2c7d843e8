//! # Control Surface
//!
//! Loopback HTTP endpoints for reading and writing cache entries:
//! `GET /{kind}?name=...` returns the cached value, `PUT
//! /{kind}/{name}?value=...` stores one. Every response is plain text.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use server::start_server;
