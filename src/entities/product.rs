//! Product entity - Represents a catalog item row in the `products` table.
//!
//! Each product has a name, optional description, decimal price, availability
//! flag and a category drawn from a fixed set. The category is stored as its
//! uppercase name so the column stays readable from plain SQL.

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed set of product categories
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Not yet classified
    #[default]
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
    /// Clothing and accessories
    #[sea_orm(string_value = "CLOTHS")]
    Cloths,
    /// Groceries and other edibles
    #[sea_orm(string_value = "FOOD")]
    Food,
    /// Household goods
    #[sea_orm(string_value = "HOUSEWARES")]
    Housewares,
    /// Vehicles and parts
    #[sea_orm(string_value = "AUTOMOTIVE")]
    Automotive,
    /// Hand and power tools
    #[sea_orm(string_value = "TOOLS")]
    Tools,
}

impl Category {
    /// Looks up a category by its stored name (e.g. `"CLOTHS"`).
    ///
    /// Matching is exact; `"cloths"` is not a category.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|category| category.to_value() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_value())
    }
}

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier assigned by the store
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name (e.g., "Fedora", "Hammer")
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub name: String,
    /// Free-form description, may be absent
    #[sea_orm(column_type = "String(StringLen::N(250))", nullable)]
    pub description: Option<String>,
    /// Unit price with two decimal places, at most 99,999,999.99. SQLite has no
    /// decimal storage class, so the column is declared REAL; prices inside
    /// those limits survive the conversion exactly.
    #[sea_orm(column_type = "Double")]
    pub price: Decimal,
    /// Whether the product can currently be ordered
    pub available: bool,
    /// Category the product is listed under
    pub category: Category,
}

/// `Product` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_name() {
        assert_eq!(Category::from_name("CLOTHS"), Some(Category::Cloths));
        assert_eq!(Category::from_name("TOOLS"), Some(Category::Tools));
        assert_eq!(Category::from_name("cloths"), None);
        assert_eq!(Category::from_name("GADGETS"), None);
    }

    #[test]
    fn test_category_display_matches_stored_value() {
        for category in Category::iter() {
            assert_eq!(category.to_string(), category.to_value());
        }
        assert_eq!(Category::Housewares.to_string(), "HOUSEWARES");
    }
}
