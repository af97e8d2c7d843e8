//! Process-local cache state.
//!
//! Entries and the per-kind synchronized stores that hold them. Policy
//! (when to fetch, what to do on failure) lives in the engine; this
//! module only guarantees consistent concurrent access to the state.

pub mod entry;
pub mod store;

pub use entry::{expiry_for, CacheEntry};
pub use store::BackendStore;
