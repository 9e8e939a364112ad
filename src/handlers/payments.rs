use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::parse_decimal;
use crate::application::payment_service::PaymentRequest;
use crate::domain::status::PaymentMethod;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequestBody {
    pub order_id: i32,
    /// Must equal the order total, e.g. "540.00"
    pub amount: String,
    /// Wallet account phone number
    pub phone: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    pub transaction_id: String,
    pub message: String,
}

/// POST /api/payment/{method}
///
/// Simulated wallet payment. Answers immediately; the order's payment status
/// moves to `completed` after `PAYMENT_CALLBACK_DELAY_MS`.
#[utoipa::path(
    post,
    path = "/api/payment/{method}",
    params(("method" = String, Path, description = "\"easypaisa\" or \"jazzcash\"")),
    request_body = PaymentRequestBody,
    responses(
        (status = 200, description = "Payment accepted", body = PaymentResponse),
        (status = 400, description = "Unknown method or amount mismatch"),
        (status = 404, description = "Order not found"),
    ),
    tag = "payments"
)]
pub async fn initiate_payment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PaymentRequestBody>,
) -> Result<HttpResponse, AppError> {
    let method = path.into_inner().parse::<PaymentMethod>()?;
    let body = body.into_inner();
    let request = PaymentRequest {
        order_id: body.order_id,
        amount: parse_decimal("amount", &body.amount)?,
        phone: body.phone,
    };
    let payments = Arc::clone(&state.payments);

    let ack = web::block(move || payments.initiate(method, &request))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    // Completion runs detached; the handle is not awaited.
    state.payments.schedule_completion(body.order_id);

    Ok(HttpResponse::Ok().json(PaymentResponse {
        success: true,
        transaction_id: ack.transaction_id,
        message: ack.message,
    }))
}
