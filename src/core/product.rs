//! Product store operations - The in-memory product and its persistence.
//!
//! A [`Product`] starts life in memory with no id. [`Product::create`] inserts it
//! and records the id the store assigned; from then on [`Product::update`] and
//! [`Product::delete`] address the row by that id. Lookups return fresh
//! `Product` values built from the stored rows. [`Product::serialize`] and
//! [`Product::deserialize`] convert to and from a JSON object for transport.

use crate::{
    entities::{Category, ProductEntity, product},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{NotSet, Select, Set, Unchanged, prelude::*};
use serde_json::{Value, json};
use std::fmt;
use tracing::{debug, info, instrument};

/// A catalog product, persisted or not.
///
/// `id` is `None` until [`Product::create`] succeeds. Deleting a product leaves
/// the id in place even though the row is gone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    /// Store-assigned identifier, `None` while unsaved
    pub id: Option<i32>,
    /// Display name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Unit price
    pub price: Decimal,
    /// Whether the product can currently be ordered
    pub available: bool,
    /// Category the product is listed under
    pub category: Category,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            price: Decimal::ZERO,
            available: true,
            category: Category::Unknown,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{id}]>", self.name),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

/// Decimal places kept for a price
pub const PRICE_SCALE: u32 = 2;

/// Largest price the `DECIMAL(10, 2)` limits allow, 99,999,999.99
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

impl From<product::Model> for Product {
    fn from(model: product::Model) -> Self {
        // the REAL column drops trailing zeros
        let mut price = model.price.round_dp(PRICE_SCALE);
        price.rescale(PRICE_SCALE);
        Self {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            price,
            available: model.available,
            category: model.category,
        }
    }
}

impl Product {
    /// Builds an unsaved product.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            price,
            available,
            category,
        }
    }

    /// Active model carrying every field except the id.
    fn to_active_model(&self) -> product::ActiveModel {
        product::ActiveModel {
            id: NotSet,
            name: Set(self.name.clone()),
            description: Set(self.description.clone()),
            price: Set(self.price),
            available: Set(self.available),
            category: Set(self.category),
        }
    }

    /// Inserts this product as a new row and stores the assigned id.
    ///
    /// Any id already present is ignored; the store always picks a fresh one.
    ///
    /// # Errors
    /// Returns an error if the price is outside `DECIMAL(10, 2)` or the
    /// database insert fails.
    #[instrument(skip(self, db), fields(name = %self.name))]
    pub async fn create(&mut self, db: &DatabaseConnection) -> Result<()> {
        info!("Creating {}", self.name);
        validate_price(self.price)?;
        let model = self.to_active_model().insert(db).await?;
        self.id = Some(model.id);
        debug!("Created {}", self);
        Ok(())
    }

    /// Writes the in-memory fields to the row with this product's id.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The id is `None` or the price is outside `DECIMAL(10, 2)` (nothing
    ///   is sent to the store)
    /// - No row has this id, or the database update fails
    #[instrument(skip(self, db), fields(name = %self.name, id = ?self.id))]
    pub async fn update(&self, db: &DatabaseConnection) -> Result<()> {
        info!("Saving {}", self.name);
        let id = self
            .id
            .ok_or_else(|| Error::validation("Update called with empty ID field"))?;
        validate_price(self.price)?;

        let mut product = self.to_active_model();
        product.id = Unchanged(id);
        product.update(db).await?;
        Ok(())
    }

    /// Removes the row with this product's id. The in-memory id is left as-is.
    ///
    /// Deleting an id whose row is already gone succeeds without effect.
    ///
    /// # Errors
    /// Returns an error if the id is `None` or the database delete fails.
    #[instrument(skip(self, db), fields(name = %self.name, id = ?self.id))]
    pub async fn delete(&self, db: &DatabaseConnection) -> Result<()> {
        info!("Deleting {}", self.name);
        let id = self
            .id
            .ok_or_else(|| Error::validation("Delete called with empty ID field"))?;

        let result = ProductEntity::delete_by_id(id).exec(db).await?;
        debug!(rows = result.rows_affected, "Delete finished");
        Ok(())
    }

    /// Runs a select and converts each row.
    async fn fetch(db: &DatabaseConnection, select: Select<ProductEntity>) -> Result<Vec<Self>> {
        let rows = select.all(db).await?;
        Ok(rows.into_iter().map(Self::from).collect())
    }

    /// Returns every stored product, in no particular order.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    #[instrument(skip(db))]
    pub async fn all(db: &DatabaseConnection) -> Result<Vec<Self>> {
        info!("Processing all Products");
        Self::fetch(db, ProductEntity::find()).await
    }

    /// Finds a product by its id, returning None if there is no such row.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    #[instrument(skip(db))]
    pub async fn find(db: &DatabaseConnection, product_id: i32) -> Result<Option<Self>> {
        info!("Processing lookup for id {product_id} ...");
        let model = ProductEntity::find_by_id(product_id).one(db).await?;
        Ok(model.map(Self::from))
    }

    /// Returns all products whose name matches exactly.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    #[instrument(skip(db))]
    pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Vec<Self>> {
        info!("Processing name query for {name} ...");
        Self::fetch(
            db,
            ProductEntity::find().filter(product::Column::Name.eq(name)),
        )
        .await
    }

    /// Returns all products with exactly this price.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    #[instrument(skip(db))]
    pub async fn find_by_price(db: &DatabaseConnection, price: Decimal) -> Result<Vec<Self>> {
        info!("Processing price query for {price} ...");
        Self::fetch(
            db,
            ProductEntity::find().filter(product::Column::Price.eq(price)),
        )
        .await
    }

    /// Returns all products with the given availability.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    #[instrument(skip(db))]
    pub async fn find_by_availability(
        db: &DatabaseConnection,
        available: bool,
    ) -> Result<Vec<Self>> {
        info!("Processing available query for {available} ...");
        Self::fetch(
            db,
            ProductEntity::find().filter(product::Column::Available.eq(available)),
        )
        .await
    }

    /// Returns all products listed under the given category.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    #[instrument(skip(db))]
    pub async fn find_by_category(
        db: &DatabaseConnection,
        category: Category,
    ) -> Result<Vec<Self>> {
        info!("Processing category query for {category} ...");
        Self::fetch(
            db,
            ProductEntity::find().filter(product::Column::Category.eq(category)),
        )
        .await
    }

    /// Deletes every product row and returns how many were removed.
    ///
    /// # Errors
    /// Returns an error if the database delete fails.
    #[instrument(skip(db))]
    pub async fn remove_all(db: &DatabaseConnection) -> Result<u64> {
        let result = ProductEntity::delete_many().exec(db).await?;
        info!(rows = result.rows_affected, "Removed all products");
        Ok(result.rows_affected)
    }

    /// Converts the product into a JSON object.
    ///
    /// The price is rendered as a decimal string so no precision is lost, and
    /// the category as its uppercase name.
    #[must_use]
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.to_string(),
        })
    }

    /// Overwrites this product's fields from a JSON object. The id is untouched.
    ///
    /// Every field is validated before any is assigned, so a failed call leaves
    /// the product unchanged.
    ///
    /// # Errors
    /// Returns [`Error::DataValidation`] if:
    /// - `data` is not a JSON object
    /// - Any of `name`, `description`, `price`, `available`, `category` is missing
    /// - A field has the wrong type, the price is not a decimal within
    ///   `DECIMAL(10, 2)`, or the category is not a known name
    pub fn deserialize(&mut self, data: &Value) -> Result<&mut Self> {
        let data = data.as_object().ok_or_else(|| {
            Error::validation("Invalid product: body of request contained bad or no data")
        })?;
        let field = |key: &str| {
            data.get(key)
                .ok_or_else(|| Error::validation(format!("Invalid product: missing {key}")))
        };

        let name = field("name")?
            .as_str()
            .ok_or_else(|| Error::validation("Invalid type for string [name]"))?
            .to_string();
        let description = match field("description")? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => {
                return Err(Error::validation(format!(
                    "Invalid type for string [description]: {other}"
                )));
            }
        };
        let available = match field("available")? {
            Value::Bool(flag) => *flag,
            other => {
                return Err(Error::validation(format!(
                    "Invalid type for boolean [available]: {other}"
                )));
            }
        };
        let price = parse_price(field("price")?)?;
        let label = field("category")?;
        let category = label
            .as_str()
            .and_then(Category::from_name)
            .ok_or_else(|| Error::validation(format!("Invalid attribute: category {label}")))?;

        self.name = name;
        self.description = description;
        self.price = price;
        self.available = available;
        self.category = category;
        Ok(self)
    }
}

/// Accepts a decimal string (`"12.50"`) or a JSON number (`12.5`).
fn parse_price(value: &Value) -> Result<Decimal> {
    let text = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        other => {
            return Err(Error::validation(format!(
                "Invalid type for decimal [price]: {other}"
            )));
        }
    };
    let price = text
        .trim()
        .parse::<Decimal>()
        .map_err(|e| Error::validation(format!("Invalid decimal [price] {text:?}: {e}")))?;
    validate_price(price)?;
    Ok(price)
}

/// Rejects prices with more than two decimal places or beyond 99,999,999.99.
fn validate_price(price: Decimal) -> Result<()> {
    if price.normalize().scale() > PRICE_SCALE {
        return Err(Error::validation(format!(
            "Invalid price {price}: at most {PRICE_SCALE} decimal places"
        )));
    }
    if price.abs() > MAX_PRICE {
        return Err(Error::validation(format!(
            "Invalid price {price}: exceeds {MAX_PRICE}"
        )));
    }
    Ok(())
}
