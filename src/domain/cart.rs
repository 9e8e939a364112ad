//! Shopping cart for one box-customization session.
//!
//! The cart is a plain value: the product page builds it, serializes it and
//! hands it to checkout, which turns it into an [`OrderSubmission`]. Nothing
//! about it is stored server-side until that submission is made.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::Product;
use super::money::sum_of_lines;
use super::order::{CustomerDetails, OrderLineInput, OrderSubmission};
use super::status::PaymentMethod;

/// Upper bound of a single add action. Cumulative quantity is not capped.
pub const MAX_QUANTITY_PER_ADD: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity per add must be between 1 and 10, got {0}")]
    InvalidQuantity(u32),
    #[error("cart is empty")]
    Empty,
}

/// The slice of a catalog product the cart needs to price and display a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub unit: String,
}

impl From<&Product> for CartProduct {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            price: p.price.clone(),
            unit: p.unit.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: CartProduct,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    box_type_id: i32,
    items: Vec<CartItem>,
}

impl Cart {
    /// Start an empty cart for the selected box type.
    pub fn new(box_type_id: i32) -> Self {
        Self {
            box_type_id,
            items: Vec::new(),
        }
    }

    pub fn box_type_id(&self) -> i32 {
        self.box_type_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    pub fn quantity_of(&self, product_id: i32) -> u32 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Add `quantity` units. An existing line for the same product grows;
    /// otherwise a new line is appended.
    pub fn add_item(&mut self, product: CartProduct, quantity: u32) -> Result<(), CartError> {
        if !(1..=MAX_QUANTITY_PER_ADD).contains(&quantity) {
            return Err(CartError::InvalidQuantity(quantity));
        }
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(CartItem { product, quantity }),
        }
        Ok(())
    }

    /// Set a line's quantity. Zero or negative removes the line; an unknown
    /// product id is a no-op.
    pub fn update_quantity(&mut self, product_id: i32, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    pub fn remove_item(&mut self, product_id: i32) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Sum of `price × quantity`, rounded to two places. The box's own price
    /// is never part of it.
    pub fn total(&self) -> BigDecimal {
        let quantities: Vec<BigDecimal> = self
            .items
            .iter()
            .map(|i| BigDecimal::from(i.quantity))
            .collect();
        sum_of_lines(
            quantities
                .iter()
                .zip(self.items.iter().map(|i| &i.product.price)),
        )
    }

    /// Switching the box type starts over with an empty cart.
    pub fn reset(&mut self, box_type_id: i32) {
        self.box_type_id = box_type_id;
        self.items.clear();
    }

    /// Consume the cart and build the checkout payload. Each line carries the
    /// price the customer saw.
    pub fn into_submission(
        self,
        customer: CustomerDetails,
        payment_method: PaymentMethod,
        special_instructions: Option<String>,
        delivery_date: Option<DateTime<Utc>>,
    ) -> Result<OrderSubmission, CartError> {
        if self.items.is_empty() {
            return Err(CartError::Empty);
        }
        let declared_total = Some(self.total());
        let items = self
            .items
            .into_iter()
            .map(|i| OrderLineInput {
                product_id: i.product.id,
                quantity: BigDecimal::from(i.quantity),
                unit_price: i.product.price,
            })
            .collect();
        Ok(OrderSubmission {
            customer,
            box_type_id: self.box_type_id,
            payment_method,
            special_instructions,
            delivery_date,
            declared_total,
            items,
        })
    }
}
