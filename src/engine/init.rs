//! Startup initialization.
//!
//! Walks the resource configuration exactly once. Every configured name
//! is registered with its resolved region; with warm-up enabled each
//! one is also resolved immediately, paying the fetch cost at startup
//! instead of on the first request. A name listed twice registers once.

use tracing::{debug, info, warn};

use super::{resolve_region, CacheEngine, EngineError};
use crate::backend::BackendKind;
use crate::config::ResourceFile;
use crate::errors::Result;

impl CacheEngine {
    /// Register every configured resource, optionally warming it.
    ///
    /// Failed warm-up fetches leave the resource registered for lazy
    /// resolution and do not abort startup; configuration-class errors
    /// (no endpoint, no session) do.
    pub async fn initialize(&self, resources: &ResourceFile, warm: bool) -> Result<()> {
        for kind in BackendKind::FETCHABLE {
            for group in resources.groups(kind) {
                let region = resolve_region(&group.region, &self.default_region);
                for name in &group.names {
                    if !self.store(kind).register(name, &region).await {
                        info!(
                            kind = %kind,
                            name = %name,
                            "Resource listed more than once, skipping duplicate"
                        );
                        continue;
                    }
                    debug!(kind = %kind, name = %name, region = %region, "Registered resource");

                    if warm {
                        match self.resolve(kind, name).await {
                            Ok(_) => {
                                debug!(kind = %kind, name = %name, "Warmed resource at startup")
                            }
                            Err(EngineError::Internal(err)) => return Err(err),
                            Err(err) => warn!(
                                kind = %kind,
                                name = %name,
                                error = %err,
                                "Warm-up fetch failed, resource stays registered"
                            ),
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
