use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::catalog::{BoxType, BoxTypePatch, NewBoxType, NewProduct, Product, ProductPatch};
use crate::domain::contact::{ContactMessage, NewContactMessage};
use crate::domain::errors::DomainError;
use crate::domain::order::{Customer, CustomerDetails, Order, OrderItem};
use crate::schema::{box_types, contact_messages, customers, order_items, orders, products};

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = box_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoxTypeRow {
    pub id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub items_limit: i32,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<BoxTypeRow> for BoxType {
    fn from(r: BoxTypeRow) -> Self {
        BoxType {
            id: r.id,
            name: r.name,
            price: r.price,
            items_limit: r.items_limit,
            description: r.description,
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = box_types)]
pub struct NewBoxTypeRow {
    pub name: String,
    pub price: BigDecimal,
    pub items_limit: i32,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<NewBoxType> for NewBoxTypeRow {
    fn from(n: NewBoxType) -> Self {
        NewBoxTypeRow {
            name: n.name,
            price: n.price,
            items_limit: n.items_limit,
            description: n.description,
            is_active: n.is_active,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = box_types)]
pub struct BoxTypeChangeset {
    pub name: Option<String>,
    pub price: Option<BigDecimal>,
    pub items_limit: Option<i32>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl From<BoxTypePatch> for BoxTypeChangeset {
    fn from(p: BoxTypePatch) -> Self {
        BoxTypeChangeset {
            name: p.name,
            price: p.price,
            items_limit: p.items_limit,
            description: p.description,
            is_active: p.is_active,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub price: BigDecimal,
    pub unit: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
    pub nutrition_info: Option<Value>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(r: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: r.id,
            name: r.name,
            category: r
                .category
                .parse()
                .map_err(|e: DomainError| DomainError::Internal(e.to_string()))?,
            price: r.price,
            unit: r.unit,
            image_url: r.image_url,
            description: r.description,
            is_available: r.is_available,
            nutrition_info: r.nutrition_info,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub name: String,
    pub category: String,
    pub price: BigDecimal,
    pub unit: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
    pub nutrition_info: Option<Value>,
}

impl From<NewProduct> for NewProductRow {
    fn from(n: NewProduct) -> Self {
        NewProductRow {
            name: n.name,
            category: n.category.as_str().to_string(),
            price: n.price,
            unit: n.unit,
            image_url: n.image_url,
            description: n.description,
            is_available: n.is_available,
            nutrition_info: n.nutrition_info,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
pub struct ProductChangeset {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<BigDecimal>,
    pub unit: Option<String>,
    pub image_url: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub is_available: Option<bool>,
    pub nutrition_info: Option<Option<Value>>,
}

impl From<ProductPatch> for ProductChangeset {
    fn from(p: ProductPatch) -> Self {
        ProductChangeset {
            name: p.name,
            category: p.category.map(|c| c.as_str().to_string()),
            price: p.price,
            unit: p.unit,
            image_url: p.image_url,
            description: p.description,
            is_available: p.is_available,
            nutrition_info: p.nutrition_info,
        }
    }
}

// ── Customers and orders ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Customer {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            address: r.address,
            city: r.city,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

impl From<CustomerDetails> for NewCustomerRow {
    fn from(c: CustomerDetails) -> Self {
        NewCustomerRow {
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            phone: c.phone,
            address: c.address,
            city: c.city,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub customer_id: i32,
    pub box_type_id: i32,
    pub total_amount: BigDecimal,
    pub payment_method: String,
    pub payment_status: String,
    pub order_status: String,
    pub delivery_date: Option<DateTime<Utc>>,
    pub special_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(super) fn stored<T>(value: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    value
        .parse()
        .map_err(|e: DomainError| DomainError::Internal(format!("corrupt stored value: {e}")))
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: r.id,
            customer_id: r.customer_id,
            box_type_id: r.box_type_id,
            total_amount: r.total_amount,
            payment_method: stored(&r.payment_method)?,
            payment_status: stored(&r.payment_status)?,
            order_status: stored(&r.order_status)?,
            delivery_date: r.delivery_date,
            special_instructions: r.special_instructions,
            created_at: r.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub customer_id: i32,
    pub box_type_id: i32,
    pub total_amount: BigDecimal,
    pub payment_method: String,
    pub payment_status: String,
    pub order_status: String,
    pub delivery_date: Option<DateTime<Utc>>,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(r: OrderItemRow) -> Self {
        OrderItem {
            id: r.id,
            order_id: r.order_id,
            product_id: r.product_id,
            quantity: r.quantity,
            unit_price: r.unit_price,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
}

// ── Contact messages ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = contact_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContactMessageRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_replied: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessageRow> for ContactMessage {
    fn from(r: ContactMessageRow) -> Self {
        ContactMessage {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            subject: r.subject,
            message: r.message,
            is_replied: r.is_replied,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = contact_messages)]
pub struct NewContactMessageRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl From<NewContactMessage> for NewContactMessageRow {
    fn from(m: NewContactMessage) -> Self {
        NewContactMessageRow {
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            subject: m.subject,
            message: m.message,
        }
    }
}
