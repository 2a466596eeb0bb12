//! Backend entry-point: loads settings, seeds the store and runs the server.

mod server;

use std::sync::Arc;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, bootstrap_admin, create_server};
use taxi_backend::config::TaxiSettings;
use taxi_backend::outbound::memory::InMemoryFleetStore;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = TaxiSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::from_settings(&settings)?;
    let store = Arc::new(InMemoryFleetStore::new());

    if let Some((username, password)) = settings.bootstrap_admin() {
        bootstrap_admin(store.as_ref(), username, password)
            .await
            .map_err(|e| std::io::Error::other(format!("failed to create startup driver: {e}")))?;
    }

    info!(bind_addr = %config.bind_addr, page_size = config.page_size.get(), "starting server");
    create_server(&store, config)?.await
}
