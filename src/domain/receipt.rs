use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, Utc};

use super::money::{line_total, to_money};
use super::order::{CustomerDetails, OrderDetails};
use super::status::PaymentMethod;

/// Estimated delivery is always this many days after the order was placed.
pub const DELIVERY_OFFSET_DAYS: i64 = 2;

/// Human-facing order number, e.g. `FB000042`.
pub fn order_number(order_id: i32) -> String {
    format!("FB{order_id:06}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub product_name: String,
    pub unit: String,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub order_id: i32,
    pub order_number: String,
    pub customer: CustomerDetails,
    pub box_type_name: String,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: BigDecimal,
    pub total: BigDecimal,
    pub payment_method: PaymentMethod,
    pub order_date: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
}

impl Receipt {
    /// Line totals use the unit price captured with the order, never the
    /// product's current price. The box price is not charged.
    pub fn from_details(details: &OrderDetails) -> Self {
        let order = &details.order;
        let lines: Vec<ReceiptLine> = details
            .items
            .iter()
            .map(|d| ReceiptLine {
                product_name: d.product.name.clone(),
                unit: d.product.unit.clone(),
                quantity: d.item.quantity.clone(),
                unit_price: d.item.unit_price.clone(),
                line_total: line_total(&d.item.quantity, &d.item.unit_price),
            })
            .collect();
        let subtotal = to_money(
            &lines
                .iter()
                .fold(BigDecimal::from(0), |acc, l| acc + &l.line_total),
        );
        let c = &details.customer;

        Self {
            order_id: order.id,
            order_number: order_number(order.id),
            customer: CustomerDetails {
                first_name: c.first_name.clone(),
                last_name: c.last_name.clone(),
                email: c.email.clone(),
                phone: c.phone.clone(),
                address: c.address.clone(),
                city: c.city.clone(),
            },
            box_type_name: details.box_type.name.clone(),
            lines,
            subtotal,
            total: to_money(&order.total_amount),
            payment_method: order.payment_method,
            order_date: order.created_at,
            estimated_delivery: order.created_at + Duration::days(DELIVERY_OFFSET_DAYS),
        }
    }
}
