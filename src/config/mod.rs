/// Application configuration object and config.toml loading
pub mod app;

/// Database connection and table creation
pub mod database;

pub use app::{AppConfig, load_app_configuration};
pub use database::init_db;
