//! Shared test utilities for the product catalog.
//!
//! This module provides helpers for setting up test databases and a factory
//! that builds randomized, valid products.

use crate::{
    config::{AppConfig, database},
    core::product::Product,
    entities::Category,
    errors::Result,
};
use rand::{Rng, seq::SliceRandom};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

const NAMES: &[&str] = &[
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

const DESCRIPTIONS: &[&str] = &[
    "Sturdy and dependable",
    "Limited seasonal edition",
    "Customer favourite",
    "Imported from overseas",
    "Locally sourced",
];

const CATEGORIES: &[Category] = &[
    Category::Unknown,
    Category::Cloths,
    Category::Food,
    Category::Housewares,
    Category::Automotive,
    Category::Tools,
];

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let config = AppConfig::for_testing();
    let url = config.database_url.as_deref().unwrap_or("sqlite::memory:");
    let db = database::create_connection(url).await?;
    database::create_tables(&db).await?;
    Ok(db)
}

/// Builds random products that satisfy every field constraint.
///
/// # Defaults
/// * `name`: one of a short list of common goods, so duplicates are likely
/// * `price`: 0.50 to 2000.00 with two decimal places
pub struct ProductFactory;

impl ProductFactory {
    /// One unsaved product with random fields.
    #[must_use]
    pub fn build() -> Product {
        let mut rng = rand::thread_rng();
        Product::new(
            *NAMES.choose(&mut rng).unwrap_or(&"Hat"),
            DESCRIPTIONS
                .choose(&mut rng)
                .map(|text| (*text).to_string()),
            Decimal::new(rng.gen_range(50..=200_000), 2),
            rng.gen_bool(0.5),
            *CATEGORIES.choose(&mut rng).unwrap_or(&Category::Unknown),
        )
    }
}

/// Creates and persists one random product.
pub async fn create_test_product(db: &DatabaseConnection) -> Result<Product> {
    let mut product = ProductFactory::build();
    product.create(db).await?;
    Ok(product)
}

/// Creates and persists `count` random products, returned in creation order.
pub async fn create_test_products(db: &DatabaseConnection, count: usize) -> Result<Vec<Product>> {
    let mut products = Vec::with_capacity(count);
    for _ in 0..count {
        products.push(create_test_product(db).await?);
    }
    Ok(products)
}
