use bigdecimal::BigDecimal;
use diesel::dsl::sum;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::StatsRepository;
use crate::domain::stats::{OrderStats, RevenueBasis};
use crate::domain::status::PaymentStatus;
use crate::schema::{customers, orders, products};

pub struct DieselStatsRepository {
    pool: DbPool,
}

impl DieselStatsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl StatsRepository for DieselStatsRepository {
    fn order_stats(&self, basis: RevenueBasis) -> Result<OrderStats, DomainError> {
        let mut conn = self.pool.get()?;

        // One snapshot so the four figures agree with each other.
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, DomainError, _>(|conn| {
                let total_orders: i64 = orders::table.count().get_result(conn)?;

                let total_revenue: Option<BigDecimal> = match basis {
                    RevenueBasis::AllOrders => orders::table
                        .select(sum(orders::total_amount))
                        .first(conn)?,
                    RevenueBasis::CompletedPayments => orders::table
                        .filter(orders::payment_status.eq(PaymentStatus::Completed.as_str()))
                        .select(sum(orders::total_amount))
                        .first(conn)?,
                };

                let total_customers: i64 = customers::table.count().get_result(conn)?;
                let total_products: i64 = products::table.count().get_result(conn)?;

                Ok(OrderStats {
                    total_orders,
                    total_revenue,
                    total_customers,
                    total_products,
                })
            })
    }
}
