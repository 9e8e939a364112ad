//! Order and payment status values and the rules for moving between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn allowed_transitions(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Processing => &[Confirmed, Cancelled],
            Confirmed => &[Delivered, Cancelled],
            Delivered | Cancelled => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(OrderStatus::Processing),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::InvalidInput(format!(
                "invalid order status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn allowed_transitions(self) -> &'static [PaymentStatus] {
        match self {
            PaymentStatus::Pending => &[PaymentStatus::Completed, PaymentStatus::Failed],
            PaymentStatus::Completed | PaymentStatus::Failed => &[],
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(DomainError::InvalidInput(format!(
                "invalid payment status '{other}'"
            ))),
        }
    }
}

/// Supported mobile wallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Easypaisa,
    Jazzcash,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Easypaisa => "easypaisa",
            PaymentMethod::Jazzcash => "jazzcash",
        }
    }

    /// Prefix used for stub gateway transaction ids.
    pub fn transaction_prefix(self) -> &'static str {
        match self {
            PaymentMethod::Easypaisa => "EP",
            PaymentMethod::Jazzcash => "JC",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easypaisa" => Ok(PaymentMethod::Easypaisa),
            "jazzcash" => Ok(PaymentMethod::Jazzcash),
            other => Err(DomainError::InvalidInput(format!(
                "unsupported payment method '{other}'"
            ))),
        }
    }
}

/// How status updates are checked against the transition tables.
///
/// `Permissive` lets an administrator set any enumerated value from any
/// other. `Strict` only accepts moves listed by `allowed_transitions`.
/// Re-applying the current value is accepted under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn check_order(self, from: OrderStatus, to: OrderStatus) -> Result<(), DomainError> {
        if self == TransitionPolicy::Permissive
            || from == to
            || from.allowed_transitions().contains(&to)
        {
            return Ok(());
        }
        Err(DomainError::IllegalTransition {
            field: "order status",
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub fn check_payment(self, from: PaymentStatus, to: PaymentStatus) -> Result<(), DomainError> {
        if self == TransitionPolicy::Permissive
            || from == to
            || from.allowed_transitions().contains(&to)
        {
            return Ok(());
        }
        Err(DomainError::IllegalTransition {
            field: "payment status",
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

impl FromStr for TransitionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "strict" => Ok(TransitionPolicy::Strict),
            other => Err(DomainError::InvalidInput(format!(
                "unknown transition policy '{other}'"
            ))),
        }
    }
}
