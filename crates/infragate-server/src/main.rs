//! infragate server: process entry point.

mod config;

use infragate_adapter::InventoryAdapter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("infragate=info"));
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!("Starting infragate server...");

    if let Err(err) = run().await {
        error!(error = %err, "infragate server failed");
        std::process::exit(1);
    }

    info!("infragate server stopped.");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Configuration.
    let config = ServerConfig::from_env()?;

    // 2. Database connection, schema and store.
    let inventory = infragate_inventory::connect(&config.db).await?;

    // 3. Adapter over the inventory backend.
    let adapter = InventoryAdapter::new(inventory, config.adapter);
    info!(
        max_page_size = adapter.config().max_page_size,
        nesting_depth = adapter.config().nesting_depth,
        "Inventory adapter ready"
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    Ok(())
}
