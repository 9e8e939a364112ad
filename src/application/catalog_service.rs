use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;

use crate::domain::catalog::{
    BoxType, BoxTypePatch, NewBoxType, NewProduct, Product, ProductCategory, ProductFilter,
    ProductPatch,
};
use crate::domain::errors::DomainError;
use crate::domain::money::{fits_numeric, PRICE_PRECISION};
use crate::domain::ports::CatalogRepository;

const DEFAULT_BOX_TYPES: [(&str, &str, i32, &str); 3] = [
    ("Small Box", "799.00", 3, "Perfect for 1-2 people, 2-3 premium items"),
    ("Medium Box", "1399.00", 6, "Great for families, 4-6 premium items"),
    ("Large Box", "1999.00", 10, "Perfect for large families, 7-10 premium items"),
];

const DEFAULT_PRODUCTS: [(&str, ProductCategory, &str, &str, &str); 12] = [
    ("Fresh Apples", ProductCategory::Fruit, "150.00", "kg", "Sweet and crispy red apples"),
    ("Bananas", ProductCategory::Fruit, "80.00", "dozen", "Fresh yellow bananas"),
    ("Oranges", ProductCategory::Fruit, "120.00", "kg", "Juicy Valencia oranges"),
    ("Mangoes", ProductCategory::Fruit, "200.00", "kg", "Sweet Pakistani mangoes"),
    ("Grapes", ProductCategory::Fruit, "180.00", "kg", "Fresh green grapes"),
    ("Tomatoes", ProductCategory::Vegetable, "60.00", "kg", "Fresh red tomatoes"),
    ("Onions", ProductCategory::Vegetable, "40.00", "kg", "Fresh white onions"),
    ("Potatoes", ProductCategory::Vegetable, "35.00", "kg", "Fresh potatoes"),
    ("Carrots", ProductCategory::Vegetable, "70.00", "kg", "Fresh orange carrots"),
    ("Spinach", ProductCategory::Vegetable, "30.00", "bunch", "Fresh green spinach"),
    ("Lettuce", ProductCategory::Vegetable, "45.00", "head", "Fresh iceberg lettuce"),
    ("Bell Peppers", ProductCategory::Vegetable, "90.00", "kg", "Fresh colorful bell peppers"),
];

fn parse_price(raw: &str) -> Result<BigDecimal, DomainError> {
    BigDecimal::from_str(raw).map_err(|e| DomainError::Internal(format!("bad seed price: {e}")))
}

fn check_price(price: &BigDecimal) -> Result<(), DomainError> {
    if *price < BigDecimal::from(0) {
        return Err(DomainError::InvalidInput(
            "price must not be negative".to_string(),
        ));
    }
    if !fits_numeric(price, PRICE_PRECISION) {
        return Err(DomainError::InvalidInput(format!(
            "price {price} must have at most two decimal places and fewer than {} integer digits",
            PRICE_PRECISION - 1
        )));
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput("name is required".to_string()));
    }
    Ok(())
}

pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub fn list_box_types(&self) -> Result<Vec<BoxType>, DomainError> {
        self.repo.list_box_types()
    }

    pub fn create_box_type(&self, new: NewBoxType) -> Result<BoxType, DomainError> {
        check_name(&new.name)?;
        check_price(&new.price)?;
        if new.items_limit < 1 {
            return Err(DomainError::InvalidInput(
                "items limit must be at least 1".to_string(),
            ));
        }
        self.repo.create_box_type(new)
    }

    pub fn update_box_type(&self, id: i32, patch: BoxTypePatch) -> Result<BoxType, DomainError> {
        if let Some(name) = &patch.name {
            check_name(name)?;
        }
        if let Some(price) = &patch.price {
            check_price(price)?;
        }
        self.repo
            .update_box_type(id, patch)?
            .ok_or(DomainError::NotFound("Box type"))
    }

    pub fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError> {
        self.repo.list_products(filter)
    }

    pub fn create_product(&self, new: NewProduct) -> Result<Product, DomainError> {
        check_name(&new.name)?;
        check_price(&new.price)?;
        self.repo.create_product(new)
    }

    pub fn update_product(&self, id: i32, patch: ProductPatch) -> Result<Product, DomainError> {
        if let Some(name) = &patch.name {
            check_name(name)?;
        }
        if let Some(price) = &patch.price {
            check_price(price)?;
        }
        self.repo
            .update_product(id, patch)?
            .ok_or(DomainError::NotFound("Product"))
    }

    pub fn delete_product(&self, id: i32) -> Result<(), DomainError> {
        if self.repo.delete_product(id)? {
            log::info!("Product {} deleted", id);
            Ok(())
        } else {
            Err(DomainError::NotFound("Product"))
        }
    }

    /// Insert the default box types and products when the catalog is empty.
    /// Each half is seeded independently.
    pub fn seed_defaults(&self) -> Result<(), DomainError> {
        if self.repo.list_box_types()?.is_empty() {
            for (name, price, items_limit, description) in DEFAULT_BOX_TYPES {
                self.repo.create_box_type(NewBoxType {
                    name: name.to_string(),
                    price: parse_price(price)?,
                    items_limit,
                    description: Some(description.to_string()),
                    is_active: true,
                })?;
            }
            log::info!("Seeded {} default box types", DEFAULT_BOX_TYPES.len());
        }

        if self.repo.list_products(ProductFilter::default())?.is_empty() {
            for (name, category, price, unit, description) in DEFAULT_PRODUCTS {
                self.repo.create_product(NewProduct {
                    name: name.to_string(),
                    category,
                    price: parse_price(price)?,
                    unit: unit.to_string(),
                    image_url: None,
                    description: Some(description.to_string()),
                    is_available: true,
                    nutrition_info: None,
                })?;
            }
            log::info!("Seeded {} default products", DEFAULT_PRODUCTS.len());
        }
        Ok(())
    }
}
