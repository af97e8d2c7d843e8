//! Resource configuration file.
//!
//! A YAML document listing, per fetchable backend kind, the resources
//! the cache tracks. Each kind holds region groups so one file can span
//! several regions:
//!
//! ```yaml
//! parameters:
//!   - region: us-east-1
//!     names:
//!       - /app/feature_flags
//! dynamodb:
//!   - names:
//!       - session-table-defaults
//! secret:
//!   - region: eu-west-1
//!     names:
//!       - db-pass
//!       - api-key
//! ```
//!
//! A group without a region falls back to the process-wide default
//! region at initialization time. Custom entries are caller-supplied at
//! runtime and never appear here.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::backend::BackendKind;
use crate::errors::{Error, Result};

/// One region's worth of resource names for a backend kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// Region the names are fetched from. Empty means the default region.
    #[serde(default)]
    pub region: String,
    /// Resource names to track.
    #[serde(default)]
    pub names: Vec<String>,
}

/// Parsed resource configuration for all fetchable backend kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFile {
    /// Parameter store resources.
    #[serde(default)]
    pub parameters: Vec<ResourceGroup>,
    /// Document table records.
    #[serde(default, rename = "dynamodb")]
    pub records: Vec<ResourceGroup>,
    /// Secrets manager resources.
    #[serde(default, rename = "secret")]
    pub secrets: Vec<ResourceGroup>,
}

impl ResourceFile {
    /// Load and parse the resource file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read resource file '{}': {}", path.display(), e))
        })?;
        Self::parse(&data)
    }

    /// Parse a resource document from YAML text.
    ///
    /// An empty document is a valid configuration tracking nothing.
    pub fn parse(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(data)
            .map_err(|err| Error::config(format!("Invalid resource document: {}", err)))
    }

    /// The region groups configured for `kind`.
    pub fn groups(&self, kind: BackendKind) -> &[ResourceGroup] {
        match kind {
            BackendKind::Parameters => &self.parameters,
            BackendKind::Records => &self.records,
            BackendKind::Secrets => &self.secrets,
            BackendKind::Custom => &[],
        }
    }

    /// Total number of configured names across all kinds.
    pub fn total_names(&self) -> usize {
        BackendKind::FETCHABLE
            .iter()
            .flat_map(|kind| self.groups(*kind))
            .map(|group| group.names.len())
            .sum()
    }
}
