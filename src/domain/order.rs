use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use validator::Validate;

use super::catalog::{BoxType, Product};
use super::errors::DomainError;
use super::money::{fits_numeric, sum_of_lines, to_money, PRICE_PRECISION, QUANTITY_PRECISION};
use super::status::{OrderStatus, PaymentMethod, PaymentStatus};

/// Contact fields supplied at checkout. `email` is the natural key that
/// identifies a returning customer.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CustomerDetails {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 11, message = "a valid phone number is required"))]
    pub phone: String,
    #[validate(length(min = 10, message = "a complete address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
}

impl CustomerDetails {
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineInput {
    pub product_id: i32,
    pub quantity: BigDecimal,
    /// Price the customer saw when adding the item. Stored verbatim.
    pub unit_price: BigDecimal,
}

/// Checkout payload as received from the client.
#[derive(Debug, Clone, Validate)]
pub struct OrderSubmission {
    #[validate(nested)]
    pub customer: CustomerDetails,
    pub box_type_id: i32,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
    /// Total computed by the client, if it sent one.
    pub declared_total: Option<BigDecimal>,
    pub items: Vec<OrderLineInput>,
}

impl OrderSubmission {
    /// Validate the payload and compute the authoritative total.
    pub fn into_new_order(self) -> Result<NewOrder, DomainError> {
        let submission = OrderSubmission {
            customer: self.customer.normalized(),
            ..self
        };
        submission.validate()?;
        if submission.items.is_empty() {
            return Err(DomainError::InvalidInput(
                "an order needs at least one item".to_string(),
            ));
        }

        let zero = BigDecimal::from(0);
        for line in &submission.items {
            if line.quantity <= zero {
                return Err(DomainError::InvalidInput(format!(
                    "quantity for product {} must be positive",
                    line.product_id
                )));
            }
            if line.unit_price < zero {
                return Err(DomainError::InvalidInput(format!(
                    "unit price for product {} must not be negative",
                    line.product_id
                )));
            }
            if !fits_numeric(&line.quantity, QUANTITY_PRECISION) {
                return Err(DomainError::InvalidInput(format!(
                    "quantity {} for product {} must have at most two decimal places and fewer than {} integer digits",
                    line.quantity,
                    line.product_id,
                    QUANTITY_PRECISION - 1
                )));
            }
            if !fits_numeric(&line.unit_price, PRICE_PRECISION) {
                return Err(DomainError::InvalidInput(format!(
                    "unit price {} for product {} must have at most two decimal places and fewer than {} integer digits",
                    line.unit_price,
                    line.product_id,
                    PRICE_PRECISION - 1
                )));
            }
        }

        let total_amount = sum_of_lines(
            submission
                .items
                .iter()
                .map(|l| (&l.quantity, &l.unit_price)),
        );
        if !fits_numeric(&total_amount, PRICE_PRECISION) {
            return Err(DomainError::InvalidInput(format!(
                "order total {total_amount} is too large"
            )));
        }
        if let Some(declared) = &submission.declared_total {
            if to_money(declared) != total_amount {
                return Err(DomainError::InvalidInput(format!(
                    "declared total {declared} does not match items total {total_amount}"
                )));
            }
        }

        let special_instructions = submission
            .special_instructions
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(NewOrder {
            customer: submission.customer,
            box_type_id: submission.box_type_id,
            total_amount,
            payment_method: submission.payment_method,
            special_instructions,
            delivery_date: submission.delivery_date,
            items: submission.items,
        })
    }
}

/// A validated order ready to be persisted. The repository resolves the
/// customer and writes the order with its items as one unit.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer: CustomerDetails,
    pub box_type_id: i32,
    pub total_amount: BigDecimal,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub items: Vec<OrderLineInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub box_type_id: i32,
    pub total_amount: BigDecimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub delivery_date: Option<DateTime<Utc>>,
    pub special_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone)]
pub struct OrderItemDetails {
    pub item: OrderItem,
    pub product: Product,
}

/// An order joined with everything an admin or receipt needs.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub customer: Customer,
    pub box_type: BoxType,
    pub items: Vec<OrderItemDetails>,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderDetails>,
    pub total: i64,
}

/// Rows to skip for a 1-based `page` of `limit` rows.
pub fn page_offset(page: i64, limit: i64) -> Result<i64, DomainError> {
    page.max(1)
        .checked_sub(1)
        .and_then(|p| p.checked_mul(limit))
        .ok_or_else(|| DomainError::InvalidInput(format!("page {page} is out of range")))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn customer() -> CustomerDetails {
        CustomerDetails {
            first_name: "Ayesha".to_string(),
            last_name: "Khan".to_string(),
            email: "ayesha@example.com".to_string(),
            phone: "03001234567".to_string(),
            address: "House 12, Street 4, F-7".to_string(),
            city: "Islamabad".to_string(),
        }
    }

    fn submission() -> OrderSubmission {
        OrderSubmission {
            customer: customer(),
            box_type_id: 1,
            payment_method: PaymentMethod::Easypaisa,
            special_instructions: None,
            delivery_date: None,
            declared_total: None,
            items: vec![
                OrderLineInput {
                    product_id: 1,
                    quantity: dec("2"),
                    unit_price: dec("150.00"),
                },
                OrderLineInput {
                    product_id: 2,
                    quantity: dec("3"),
                    unit_price: dec("80.00"),
                },
            ],
        }
    }

    #[test]
    fn computes_total_from_items() {
        let order = submission().into_new_order().expect("valid submission");
        assert_eq!(order.total_amount.to_string(), "540.00");
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn accepts_matching_declared_total() {
        let mut s = submission();
        s.declared_total = Some(dec("540"));
        assert!(s.into_new_order().is_ok());
    }

    #[test]
    fn rejects_mismatched_declared_total() {
        let mut s = submission();
        s.declared_total = Some(dec("1339.00"));
        let err = s.into_new_order().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn rejects_empty_items() {
        let mut s = submission();
        s.items.clear();
        assert!(matches!(
            s.into_new_order().unwrap_err(),
            DomainError::InvalidInput(_)
        ));
    }

    #[test]
    fn rejects_malformed_email() {
        let mut s = submission();
        s.customer.email = "not-an-email".to_string();
        assert!(s.into_new_order().is_err());
    }

    #[test]
    fn rejects_short_phone() {
        let mut s = submission();
        s.customer.phone = "12345".to_string();
        assert!(s.into_new_order().is_err());
    }

    #[test]
    fn rejects_blank_name_after_trimming() {
        let mut s = submission();
        s.customer.first_name = "   ".to_string();
        assert!(s.into_new_order().is_err());
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let mut s = submission();
        s.items[0].quantity = dec("0");
        assert!(s.into_new_order().is_err());
    }

    #[test]
    fn rejects_negative_unit_price() {
        let mut s = submission();
        s.items[1].unit_price = dec("-1.00");
        assert!(s.into_new_order().is_err());
    }

    #[test]
    fn blank_instructions_become_none() {
        let mut s = submission();
        s.special_instructions = Some("   ".to_string());
        let order = s.into_new_order().unwrap();
        assert!(order.special_instructions.is_none());
    }

    #[test]
    fn unit_prices_pass_through_verbatim() {
        let order = submission().into_new_order().unwrap();
        assert_eq!(order.items[0].unit_price, dec("150.00"));
        assert_eq!(order.items[1].unit_price, dec("80.00"));
    }

    #[test]
    fn rejects_sub_cent_unit_price() {
        let mut s = submission();
        for line in &mut s.items {
            line.quantity = dec("1");
            line.unit_price = dec("0.004");
        }
        assert!(matches!(
            s.into_new_order().unwrap_err(),
            DomainError::InvalidInput(_)
        ));
    }

    #[test]
    fn rejects_values_too_wide_for_storage() {
        let mut s = submission();
        s.items[0].quantity = dec("1000000");
        assert!(matches!(
            s.into_new_order().unwrap_err(),
            DomainError::InvalidInput(_)
        ));

        let mut s = submission();
        s.items[0].unit_price = dec("100000000.00");
        assert!(matches!(
            s.into_new_order().unwrap_err(),
            DomainError::InvalidInput(_)
        ));

        let mut s = submission();
        s.items[0].quantity = dec("999999");
        s.items[0].unit_price = dec("99999999.99");
        assert!(matches!(
            s.into_new_order().unwrap_err(),
            DomainError::InvalidInput(_)
        ));
    }

    #[test]
    fn two_place_fractions_are_accepted() {
        let mut s = submission();
        s.items[0].quantity = dec("1.50");
        s.items[0].unit_price = dec("150.25");
        let order = s.into_new_order().unwrap();
        assert_eq!(order.items[0].unit_price, dec("150.25"));
    }

    #[test]
    fn page_offset_handles_extremes() {
        assert_eq!(page_offset(1, 20).unwrap(), 0);
        assert_eq!(page_offset(3, 20).unwrap(), 40);
        assert_eq!(page_offset(0, 20).unwrap(), 0);
        assert!(matches!(
            page_offset(i64::MAX, 100).unwrap_err(),
            DomainError::InvalidInput(_)
        ));
    }
}
