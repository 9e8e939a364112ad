use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Fruit,
    Vegetable,
}

impl ProductCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Fruit => "fruit",
            ProductCategory::Vegetable => "vegetable",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fruit" => Ok(ProductCategory::Fruit),
            "vegetable" => Ok(ProductCategory::Vegetable),
            other => Err(DomainError::InvalidInput(format!(
                "unknown product category '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxType {
    pub id: i32,
    pub name: String,
    pub price: BigDecimal,
    /// Advertised item count for the box. Not enforced against cart contents.
    pub items_limit: i32,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewBoxType {
    pub name: String,
    pub price: BigDecimal,
    pub items_limit: i32,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Partial update of a box type. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct BoxTypePatch {
    pub name: Option<String>,
    pub price: Option<BigDecimal>,
    pub items_limit: Option<i32>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl BoxTypePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.items_limit.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category: ProductCategory,
    pub price: BigDecimal,
    /// Selling unit label, e.g. "kg", "dozen", "bunch".
    pub unit: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
    pub nutrition_info: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: ProductCategory,
    pub price: BigDecimal,
    pub unit: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
    pub nutrition_info: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<ProductCategory>,
    pub price: Option<BigDecimal>,
    pub unit: Option<String>,
    pub image_url: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub is_available: Option<bool>,
    pub nutrition_info: Option<Option<Value>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.unit.is_none()
            && self.image_url.is_none()
            && self.description.is_none()
            && self.is_available.is_none()
            && self.nutrition_info.is_none()
    }
}

/// Product listing filter. Both criteria combine; the result is always
/// ordered by category, then name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub category: Option<ProductCategory>,
    pub available_only: bool,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.category.map_or(true, |c| product.category == c)
            && (!self.available_only || product.is_available)
    }
}
