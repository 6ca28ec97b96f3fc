use product_catalog::{config, core::Product, errors::Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load .env and the application configuration
    let app_config = config::load_app_configuration()?;

    // 2. Initialize tracing, RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(app_config.log_level())),
        )
        .init();
    info!("Successfully processed application configuration.");

    // 3. Connect and ensure the products table exists
    let db = config::init_db(&app_config)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    let products = Product::all(&db).await?;
    info!(count = products.len(), "Product catalog ready");

    Ok(())
}
