use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::contact::{ContactMessage, NewContactMessage};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageResponse {
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

impl From<ContactMessage> for ContactMessageResponse {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            subject: m.subject,
            message: m.message,
            is_replied: m.is_replied,
            created_at: m.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Message stored", body = ContactMessageResponse),
        (status = 400, description = "Invalid contact message data"),
    ),
    tag = "contact"
)]
pub async fn create_message(
    state: web::Data<AppState>,
    body: web::Json<CreateContactRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let message = NewContactMessage {
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        phone: body.phone,
        subject: body.subject,
        message: body.message,
    };
    let contact = Arc::clone(&state.contact);

    let created = web::block(move || contact.create_message(message))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(ContactMessageResponse::from(created)))
}

/// GET /api/contact
///
/// All messages, newest first.
#[utoipa::path(
    get,
    path = "/api/contact",
    responses(
        (status = 200, description = "Contact messages", body = [ContactMessageResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "contact"
)]
pub async fn list_messages(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let contact = Arc::clone(&state.contact);

    let messages = web::block(move || contact.list_messages())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(
        messages
            .into_iter()
            .map(ContactMessageResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    put,
    path = "/api/contact/{id}/replied",
    params(("id" = i32, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message marked as replied", body = ContactMessageResponse),
        (status = 404, description = "Message not found"),
    ),
    tag = "contact"
)]
pub async fn mark_replied(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let contact = Arc::clone(&state.contact);

    let message = web::block(move || contact.mark_replied(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ContactMessageResponse::from(message)))
}
