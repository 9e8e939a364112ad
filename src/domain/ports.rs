use super::catalog::{
    BoxType, BoxTypePatch, NewBoxType, NewProduct, Product, ProductFilter, ProductPatch,
};
use super::contact::{ContactMessage, NewContactMessage};
use super::errors::DomainError;
use super::order::{ListResult, NewOrder, Order, OrderDetails, PlacedOrder};
use super::stats::{OrderStats, RevenueBasis};
use super::status::{OrderStatus, PaymentStatus, TransitionPolicy};

pub trait CatalogRepository: Send + Sync + 'static {
    /// Active box types, cheapest first.
    fn list_box_types(&self) -> Result<Vec<BoxType>, DomainError>;
    fn create_box_type(&self, new: NewBoxType) -> Result<BoxType, DomainError>;
    fn update_box_type(&self, id: i32, patch: BoxTypePatch) -> Result<Option<BoxType>, DomainError>;
    /// Products matching `filter`, ordered by category then name.
    fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError>;
    fn create_product(&self, new: NewProduct) -> Result<Product, DomainError>;
    fn update_product(&self, id: i32, patch: ProductPatch) -> Result<Option<Product>, DomainError>;
    fn delete_product(&self, id: i32) -> Result<bool, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Resolve the customer by email (insert-or-fetch) and write the order
    /// with all of its items atomically.
    fn create(&self, order: NewOrder) -> Result<PlacedOrder, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<OrderDetails>, DomainError>;
    /// Newest first. `page` is 1-based.
    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError>;
    /// Change only the order status. `Ok(None)` when the order does not exist.
    fn update_order_status(
        &self,
        id: i32,
        status: OrderStatus,
        policy: TransitionPolicy,
    ) -> Result<Option<Order>, DomainError>;
    /// Change only the payment status. `Ok(None)` when the order does not exist.
    fn update_payment_status(
        &self,
        id: i32,
        status: PaymentStatus,
        policy: TransitionPolicy,
    ) -> Result<Option<Order>, DomainError>;
}

pub trait StatsRepository: Send + Sync + 'static {
    fn order_stats(&self, basis: RevenueBasis) -> Result<OrderStats, DomainError>;
}

pub trait ContactRepository: Send + Sync + 'static {
    fn create(&self, message: NewContactMessage) -> Result<ContactMessage, DomainError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<ContactMessage>, DomainError>;
    fn mark_replied(&self, id: i32) -> Result<Option<ContactMessage>, DomainError>;
}
