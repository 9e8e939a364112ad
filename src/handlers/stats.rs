use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::stats::OrderStats;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_orders: i64,
    /// Decimal string; "0" when there is nothing to sum.
    pub total_revenue: String,
    pub total_customers: i64,
    pub total_products: i64,
}

impl From<OrderStats> for StatsResponse {
    fn from(s: OrderStats) -> Self {
        Self {
            total_revenue: s.revenue_display(),
            total_orders: s.total_orders,
            total_customers: s.total_customers,
            total_products: s.total_products,
        }
    }
}

/// GET /api/stats
///
/// Recomputed on every call. Which orders count towards revenue is set by
/// `REVENUE_BASIS`.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Dashboard figures", body = StatsResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "stats"
)]
pub async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let stats = Arc::clone(&state.stats);

    let result = web::block(move || stats.compute_stats())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(StatsResponse::from(result)))
}
