//! # Configuration Management
//!
//! This module provides configuration management for the cacheplane
//! daemon: environment-driven settings and the resource file listing
//! what to cache.

pub mod resources;
pub mod settings;

pub use resources::{ResourceFile, ResourceGroup};
pub use settings::{parse_duration, LogSettings, Settings};
pub use settings::{
    ENV_BIND_ADDRESS, ENV_CONFIG_FILE, ENV_DEFAULT_REGION, ENV_LOG_JSON, ENV_LOG_LEVEL, ENV_PORT,
    ENV_TTL, ENV_WARM_ON_STARTUP,
};
