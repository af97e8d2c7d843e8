use std::sync::Arc;

use cacheplane::{
    api::start_server,
    backend::RemoteConnectorFactory,
    config::{LogSettings, ResourceFile, Settings},
    engine::CacheEngine,
    observability::init_tracing,
    Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists. This must happen before any config is
    // read from the environment.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let log_settings = LogSettings::from_env()?;
    init_tracing(&log_settings)?;

    info!(app_name = APP_NAME, version = VERSION, "Starting cacheplane daemon");

    let settings = Settings::from_env()?;
    info!(
        bind_address = %settings.bind_address,
        port = settings.port,
        ttl = %settings.ttl,
        warm_on_startup = settings.warm_on_startup,
        "Loaded configuration from environment"
    );

    let resources = ResourceFile::load(&settings.config_file)?;
    info!(
        path = %settings.config_file.display(),
        resources = resources.total_names(),
        "Loaded resource file"
    );

    let factory = Arc::new(RemoteConnectorFactory::from_env()?);
    let engine =
        Arc::new(CacheEngine::new(factory, settings.ttl, settings.default_region.clone()));

    engine.initialize(&resources, settings.warm_on_startup).await?;

    start_server(&settings, engine).await
}
