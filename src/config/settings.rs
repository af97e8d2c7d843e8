//! # Configuration Settings
//!
//! Environment-driven settings for the cacheplane daemon. Malformed
//! values for the typed variables (booleans, durations, the port) are
//! fatal rather than silently defaulted; an unset variable takes its
//! documented default.

use chrono::Duration;
use std::path::PathBuf;

use crate::errors::{Error, Result};

/// Eager vs. lazy startup initialization (bool).
pub const ENV_WARM_ON_STARTUP: &str = "CACHEPLANE_WARM_ON_STARTUP";
/// Process-wide cache TTL, in `90d`/`12h`/`30m`/`45s` form.
pub const ENV_TTL: &str = "CACHEPLANE_TTL";
/// Fallback region for resources configured without one.
pub const ENV_DEFAULT_REGION: &str = "CACHEPLANE_DEFAULT_REGION";
/// Path to the resource configuration file.
pub const ENV_CONFIG_FILE: &str = "CACHEPLANE_CONFIG_FILE";
/// Control-plane listen address.
pub const ENV_BIND_ADDRESS: &str = "CACHEPLANE_BIND_ADDRESS";
/// Control-plane listen port.
pub const ENV_PORT: &str = "CACHEPLANE_PORT";
/// Log filter level (trace, debug, info, warn, error).
pub const ENV_LOG_LEVEL: &str = "CACHEPLANE_LOG_LEVEL";
/// Enable JSON structured logging (bool).
pub const ENV_LOG_JSON: &str = "CACHEPLANE_LOG_JSON";

const DEFAULT_TTL: &str = "60m";
const DEFAULT_CONFIG_FILE: &str = "cacheplane.yaml";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4000;

/// Core daemon settings read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the control-plane server binds to. Loopback by default.
    pub bind_address: String,
    /// Port the control-plane server listens on.
    pub port: u16,
    /// Whether the initializer fetches configured resources eagerly.
    pub warm_on_startup: bool,
    /// Freshness window applied to every cached value.
    pub ttl: Duration,
    /// Region used when a resource's configured region is empty.
    pub default_region: String,
    /// Path of the resource configuration file.
    pub config_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            warm_on_startup: false,
            ttl: Duration::minutes(60),
            default_region: String::new(),
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }
}

impl Settings {
    /// Create settings from environment variables.
    pub fn from_env() -> Result<Self> {
        let bind_address =
            std::env::var(ENV_BIND_ADDRESS).unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        let port = match std::env::var(ENV_PORT) {
            Ok(value) => {
                value.parse().map_err(|e| Error::config(format!("Invalid {}: {}", ENV_PORT, e)))?
            }
            Err(_) => DEFAULT_PORT,
        };

        let warm_on_startup = match std::env::var(ENV_WARM_ON_STARTUP) {
            Ok(value) => parse_bool(ENV_WARM_ON_STARTUP, &value)?,
            Err(_) => false,
        };

        let ttl_value = std::env::var(ENV_TTL).unwrap_or_else(|_| DEFAULT_TTL.to_string());
        let ttl = parse_duration(&ttl_value)?;

        let default_region = std::env::var(ENV_DEFAULT_REGION).unwrap_or_default();

        let config_file = std::env::var(ENV_CONFIG_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Ok(Self { bind_address, port, warm_on_startup, ttl, default_region, config_file })
    }

    /// Listen address in `host:port` form.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Logging settings, read before the subscriber is installed.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON instead of human-readable lines.
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

impl LogSettings {
    /// Create logging settings from environment variables.
    pub fn from_env() -> Result<Self> {
        let level = std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string());
        let json = match std::env::var(ENV_LOG_JSON) {
            Ok(value) => parse_bool(ENV_LOG_JSON, &value)?,
            Err(_) => false,
        };
        Ok(Self { level, json })
    }
}

/// Parse a duration given as a quantity plus a one-letter unit.
pub fn parse_duration(value: &str) -> Result<Duration> {
    // The unit is the final character and may be more than one byte wide.
    let (boundary, unit) = match value.char_indices().next_back() {
        Some((boundary, unit)) if boundary > 0 => (boundary, unit),
        _ => {
            return Err(Error::config(format!(
                "Invalid duration '{}': expected format like 90d, 12h, 30m, 45s",
                value
            )))
        }
    };

    let number = &value[..boundary];
    let quantity: i64 = number
        .parse()
        .map_err(|err| Error::config(format!("Invalid duration '{}': {}", value, err)))?;

    let duration = match unit {
        'd' | 'D' => Duration::days(quantity),
        'h' | 'H' => Duration::hours(quantity),
        'm' | 'M' => Duration::minutes(quantity),
        's' | 'S' => Duration::seconds(quantity),
        _ => {
            return Err(Error::config(format!(
                "Invalid duration unit '{}': expected one of d (days), h (hours), m (minutes), s (seconds)",
                unit
            )))
        }
    };

    Ok(duration)
}

/// Parse a boolean environment value, accepting `true`/`false`/`1`/`0`.
fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::config(format!(
            "Invalid {}: '{}' is not a boolean (expected true/false/1/0)",
            var, other
        ))),
    }
}
