use std::str::FromStr;

use bigdecimal::BigDecimal;

use super::errors::DomainError;

/// Which orders count towards revenue.
///
/// `AllOrders` sums every order total whatever its payment status, which is
/// what the dashboard has always shown. `CompletedPayments` restricts the sum
/// to orders whose payment has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevenueBasis {
    #[default]
    AllOrders,
    CompletedPayments,
}

impl FromStr for RevenueBasis {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all_orders" => Ok(RevenueBasis::AllOrders),
            "completed_payments" => Ok(RevenueBasis::CompletedPayments),
            other => Err(DomainError::InvalidInput(format!(
                "unknown revenue basis '{other}'"
            ))),
        }
    }
}

/// Raw aggregates as read from storage. `total_revenue` is `None` when no
/// order contributes to the sum.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStats {
    pub total_orders: i64,
    pub total_revenue: Option<BigDecimal>,
    pub total_customers: i64,
    pub total_products: i64,
}

impl OrderStats {
    /// Revenue as shown to admins: `"0"` when nothing was summed.
    pub fn revenue_display(&self) -> String {
        self.total_revenue
            .as_ref()
            .map_or_else(|| "0".to_string(), ToString::to_string)
    }
}
