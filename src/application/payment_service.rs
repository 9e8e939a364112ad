//! Stand-in for the Easypaisa / JazzCash gateways.
//!
//! A payment request is acknowledged immediately and the order's payment is
//! marked completed after a fixed delay on the async runtime. The delayed
//! update has no cancellation hook; if the process exits first it is lost.

use std::sync::Arc;
use std::time::Duration;

use bigdecimal::BigDecimal;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::order_service::OrderService;
use crate::domain::errors::DomainError;
use crate::domain::money::to_money;
use crate::domain::status::{PaymentMethod, PaymentStatus};

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub order_id: i32,
    pub amount: BigDecimal,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentAck {
    pub transaction_id: String,
    pub message: String,
}

pub struct PaymentService {
    orders: Arc<OrderService>,
    callback_delay: Duration,
}

impl PaymentService {
    pub fn new(orders: Arc<OrderService>, callback_delay: Duration) -> Self {
        Self {
            orders,
            callback_delay,
        }
    }

    /// Accept a wallet payment for an existing order. Blocking; call from a
    /// blocking context.
    pub fn initiate(
        &self,
        method: PaymentMethod,
        request: &PaymentRequest,
    ) -> Result<PaymentAck, DomainError> {
        if request.phone.trim().len() < 11 {
            return Err(DomainError::InvalidInput(
                "a valid wallet phone number is required".to_string(),
            ));
        }
        let details = self
            .orders
            .get_order(request.order_id)?
            .ok_or(DomainError::NotFound("Order"))?;

        if to_money(&request.amount) != to_money(&details.order.total_amount) {
            return Err(DomainError::InvalidInput(format!(
                "amount {} does not match order total {}",
                request.amount, details.order.total_amount
            )));
        }

        let transaction_id = format!(
            "{}{}",
            method.transaction_prefix(),
            Uuid::new_v4().simple()
        )
        .to_uppercase();
        log::info!(
            "{} payment {} accepted for order {}",
            method,
            transaction_id,
            request.order_id
        );

        Ok(PaymentAck {
            transaction_id,
            message: "Payment processed successfully".to_string(),
        })
    }

    /// Mark the order's payment completed once the callback delay elapses.
    /// Must be called from within a Tokio runtime.
    pub fn schedule_completion(&self, order_id: i32) -> JoinHandle<()> {
        let orders = Arc::clone(&self.orders);
        let delay = self.callback_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = tokio::task::spawn_blocking(move || {
                orders.set_payment_status(order_id, PaymentStatus::Completed)
            })
            .await;
            match result {
                Ok(Ok(_)) => log::info!("Payment for order {} completed", order_id),
                Ok(Err(e)) => log::warn!("Payment completion for order {} failed: {}", order_id, e),
                Err(e) => log::warn!("Payment completion task for order {} aborted: {}", order_id, e),
            }
        })
    }
}
