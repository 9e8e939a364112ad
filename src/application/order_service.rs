use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{ListResult, Order, OrderDetails, OrderSubmission, PlacedOrder};
use crate::domain::ports::OrderRepository;
use crate::domain::receipt::Receipt;
use crate::domain::status::{OrderStatus, PaymentStatus, TransitionPolicy};

pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    policy: TransitionPolicy,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>, policy: TransitionPolicy) -> Self {
        Self { repo, policy }
    }

    pub fn submit_order(&self, submission: OrderSubmission) -> Result<PlacedOrder, DomainError> {
        let new_order = submission.into_new_order()?;
        let placed = self.repo.create(new_order)?;
        log::info!(
            "Order {} created for customer {} (total {}, {} items)",
            placed.order.id,
            placed.customer.id,
            placed.order.total_amount,
            placed.items.len()
        );
        Ok(placed)
    }

    pub fn get_order(&self, id: i32) -> Result<Option<OrderDetails>, DomainError> {
        self.repo.find_by_id(id)
    }

    pub fn list_orders(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        self.repo.list(page, limit)
    }

    pub fn receipt(&self, id: i32) -> Result<Receipt, DomainError> {
        let details = self
            .repo
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Order"))?;
        Ok(Receipt::from_details(&details))
    }

    pub fn set_order_status(&self, id: i32, status: OrderStatus) -> Result<Order, DomainError> {
        let order = self
            .repo
            .update_order_status(id, status, self.policy)?
            .ok_or(DomainError::NotFound("Order"))?;
        log::info!("Order {} status set to {}", id, status);
        Ok(order)
    }

    pub fn set_payment_status(&self, id: i32, status: PaymentStatus) -> Result<Order, DomainError> {
        let order = self
            .repo
            .update_payment_status(id, status, self.policy)?
            .ok_or(DomainError::NotFound("Order"))?;
        log::info!("Order {} payment status set to {}", id, status);
        Ok(order)
    }
}
