//! Database configuration module.
//!
//! Handles the database connection and table creation using `SeaORM`. The
//! `products` table is generated from the entity definition with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! struct without hand-written SQL.

use crate::config::app::AppConfig;
use crate::entities::ProductEntity;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Opens a connection to the database at `database_url`.
///
/// For an `SQLite` file the parent directory is created first, since
/// `mode=rwc` creates the file but not the directories leading to it.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Initializing database connection to: {}", database_url);
    if let Some(dir) = sqlite_file_path(database_url).and_then(Path::parent) {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Database::connect(database_url).await.map_err(Into::into)
}

/// File path of an `SQLite` URL, `None` for in-memory or other backends.
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(Path::new(path))
    }
}

/// Creates the `products` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(ProductEntity);
    product_table.if_not_exists();
    db.execute(builder.build(&product_table)).await?;

    Ok(())
}

/// Connects using the configured URL and ensures the schema exists.
#[instrument(skip(config), fields(testing = config.testing))]
pub async fn init_db(config: &AppConfig) -> Result<DatabaseConnection> {
    let db = create_connection(&config.database_url()).await?;
    info!("Database connection opened. Ensuring tables are created...");
    create_tables(&db).await?;
    Ok(db)
}
