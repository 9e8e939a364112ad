use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::{BoxTypeResponse, ProductResponse};
use super::{parse_decimal, parse_optional_decimal};
use crate::domain::order::{
    Customer, CustomerDetails, Order, OrderDetails, OrderItem, OrderLineInput, OrderSubmission,
    PlacedOrder,
};
use crate::domain::receipt::Receipt;
use crate::domain::status::{OrderStatus, PaymentMethod, PaymentStatus};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    pub product_id: i32,
    /// Decimal string, e.g. "2"
    pub quantity: String,
    /// Price shown to the customer, e.g. "150.00". Stored as given.
    pub unit_price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer: CustomerRequest,
    pub box_type_id: i32,
    /// "easypaisa" or "jazzcash"
    pub payment_method: String,
    pub special_instructions: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
    /// Client-computed total. Rejected when it disagrees with the items.
    pub total_amount: Option<String>,
    pub items: Vec<CreateOrderItemRequest>,
}

impl CreateOrderRequest {
    fn into_submission(self) -> Result<OrderSubmission, AppError> {
        let items = self
            .items
            .into_iter()
            .map(|i| {
                Ok(OrderLineInput {
                    product_id: i.product_id,
                    quantity: parse_decimal("quantity", &i.quantity)?,
                    unit_price: parse_decimal("unitPrice", &i.unit_price)?,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(OrderSubmission {
            customer: CustomerDetails {
                first_name: self.customer.first_name,
                last_name: self.customer.last_name,
                email: self.customer.email,
                phone: self.customer.phone,
                address: self.customer.address,
                city: self.customer.city,
            },
            box_type_id: self.box_type_id,
            payment_method: self.payment_method.parse::<PaymentMethod>()?,
            special_instructions: self.special_instructions,
            delivery_date: self.delivery_date,
            declared_total: parse_optional_decimal("totalAmount", self.total_amount.as_deref())?,
            items,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: i32,
    pub box_type_id: i32,
    pub total_amount: String,
    pub payment_method: String,
    pub payment_status: String,
    pub order_status: String,
    pub delivery_date: Option<DateTime<Utc>>,
    pub special_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            customer_id: o.customer_id,
            box_type_id: o.box_type_id,
            total_amount: o.total_amount.to_string(),
            payment_method: o.payment_method.to_string(),
            payment_status: o.payment_status.to_string(),
            order_status: o.order_status.to_string(),
            delivery_date: o.delivery_date,
            special_instructions: o.special_instructions,
            created_at: o.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            phone: c.phone,
            address: c.address,
            city: c.city,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub quantity: String,
    pub unit_price: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(i: OrderItem) -> Self {
        Self {
            id: i.id,
            product_id: i.product_id,
            quantity: i.quantity.to_string(),
            unit_price: i.unit_price.to_string(),
        }
    }
}

/// The created order with its id at the top level, plus the resolved
/// customer and stored items.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub customer: CustomerResponse,
    pub items: Vec<OrderItemResponse>,
}

impl From<PlacedOrder> for PlacedOrderResponse {
    fn from(p: PlacedOrder) -> Self {
        Self {
            order: p.order.into(),
            customer: p.customer.into(),
            items: p.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDetailsResponse {
    #[serde(flatten)]
    pub item: OrderItemResponse,
    pub product: ProductResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailsResponse {
    pub order: OrderResponse,
    pub customer: CustomerResponse,
    pub box_type: BoxTypeResponse,
    pub items: Vec<OrderLineDetailsResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(d: OrderDetails) -> Self {
        Self {
            order: d.order.into(),
            customer: d.customer.into(),
            box_type: d.box_type.into(),
            items: d
                .items
                .into_iter()
                .map(|line| OrderLineDetailsResponse {
                    item: line.item.into(),
                    product: line.product.into(),
                })
                .collect(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderDetailsResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Receipt ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLineResponse {
    pub product_name: String,
    pub unit: String,
    pub quantity: String,
    pub unit_price: String,
    pub line_total: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub order_id: i32,
    /// e.g. "FB000042"
    pub order_number: String,
    pub customer: ReceiptCustomer,
    pub box_type: String,
    pub items: Vec<ReceiptLineResponse>,
    pub subtotal: String,
    pub total: String,
    pub payment_method: String,
    pub order_date: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
}

impl From<Receipt> for ReceiptResponse {
    fn from(r: Receipt) -> Self {
        Self {
            order_id: r.order_id,
            order_number: r.order_number,
            customer: ReceiptCustomer {
                first_name: r.customer.first_name,
                last_name: r.customer.last_name,
                email: r.customer.email,
                phone: r.customer.phone,
                address: r.customer.address,
                city: r.customer.city,
            },
            box_type: r.box_type_name,
            items: r
                .lines
                .into_iter()
                .map(|l| ReceiptLineResponse {
                    product_name: l.product_name,
                    unit: l.unit,
                    quantity: l.quantity.to_string(),
                    unit_price: l.unit_price.to_string(),
                    line_total: l.line_total.to_string(),
                })
                .collect(),
            subtotal: r.subtotal.to_string(),
            total: r.total.to_string(),
            payment_method: r.payment_method.to_string(),
            order_date: r.order_date,
            estimated_delivery: r.estimated_delivery,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub status: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Resolves the customer by email and creates the order with its items in
/// one transaction. The total is computed from the items.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = PlacedOrderResponse),
        (status = 400, description = "Invalid order data or unknown box type/product"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let submission = body.into_inner().into_submission()?;
    let orders = Arc::clone(&state.orders);

    let placed = web::block(move || orders.submit_order(submission))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(PlacedOrderResponse::from(placed)))
}

/// GET /api/orders/{id}
///
/// Returns the order with its customer, box type and items.
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderDetailsResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let orders = Arc::clone(&state.orders);

    let result = web::block(move || orders.get_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(details) => Ok(HttpResponse::Ok().json(OrderDetailsResponse::from(details))),
        None => Err(AppError::NotFound("Order")),
    }
}

/// GET /api/orders
///
/// Returns a paginated list of orders, newest first.
/// Use `page` (1-based) and `limit` to control pagination.
#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);
    let orders = Arc::clone(&state.orders);

    let result = web::block(move || orders.list_orders(page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result
            .items
            .into_iter()
            .map(OrderDetailsResponse::from)
            .collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// GET /api/orders/{id}/receipt
#[utoipa::path(
    get,
    path = "/api/orders/{id}/receipt",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Receipt for the order", body = ReceiptResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_receipt(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let orders = Arc::clone(&state.orders);

    let receipt = web::block(move || orders.receipt(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ReceiptResponse::from(receipt)))
}

/// PUT /api/orders/{id}/status
///
/// Changes the order status only. Under the strict policy a move outside
/// the transition table is answered with 409.
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Transition not allowed"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let status = body.status.parse::<OrderStatus>()?;
    let orders = Arc::clone(&state.orders);

    let order = web::block(move || orders.set_order_status(order_id, status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PUT /api/orders/{id}/payment
///
/// Changes the payment status only.
#[utoipa::path(
    put,
    path = "/api/orders/{id}/payment",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Transition not allowed"),
    ),
    tag = "orders"
)]
pub async fn update_payment_status(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let status = body.status.parse::<PaymentStatus>()?;
    let orders = Arc::clone(&state.orders);

    let order = web::block(move || orders.set_payment_status(order_id, status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::application::test_support::{dec, InMemoryStore};
    use crate::handlers::test_support::{config, state};

    fn order_body(email: &str) -> Value {
        json!({
            "customer": {
                "firstName": "Zainab",
                "lastName": "Raza",
                "email": email,
                "phone": "03331234567",
                "address": "Flat 3, Clifton Block 5",
                "city": "Karachi"
            },
            "boxTypeId": 1,
            "totalAmount": "540.00",
            "paymentMethod": "easypaisa",
            "items": [
                { "productId": 1, "quantity": "2", "unitPrice": "150.00" },
                { "productId": 2, "quantity": "3", "unitPrice": "80.00" }
            ]
        })
    }

    #[actix_web::test]
    async fn create_order_returns_created_order() {
        let store = InMemoryStore::seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&store, &config(&[]))))
                .configure(crate::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(order_body("zainab@example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;

        assert!(body["id"].as_i64().is_some());
        assert!(body.get("order").is_none());
        assert_eq!(body["totalAmount"], "540.00");
        assert_eq!(body["orderStatus"], "processing");
        assert_eq!(body["paymentStatus"], "pending");
        assert_eq!(body["paymentMethod"], "easypaisa");
        assert_eq!(body["customer"]["email"], "zainab@example.com");
        assert_eq!(body["items"][0]["unitPrice"], "150.00");
        assert_eq!(body["items"][1]["unitPrice"], "80.00");
    }

    #[actix_web::test]
    async fn second_order_with_same_email_reuses_customer() {
        let store = InMemoryStore::seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&store, &config(&[]))))
                .configure(crate::configure_routes),
        )
        .await;

        let mut customer_ids = vec![];
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/orders")
                .set_json(order_body("repeat@example.com"))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            customer_ids.push(body["customer"]["id"].as_i64().unwrap());
        }

        assert_eq!(customer_ids[0], customer_ids[1]);
        assert_eq!(store.customer_count(), 1);
        assert_eq!(store.order_count(), 2);
    }

    #[actix_web::test]
    async fn invalid_orders_are_rejected_without_side_effects() {
        let store = InMemoryStore::seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&store, &config(&[]))))
                .configure(crate::configure_routes),
        )
        .await;

        let bad_email = order_body("not-an-email");
        let mut no_items = order_body("a@example.com");
        no_items["items"] = json!([]);
        let mut bad_method = order_body("b@example.com");
        bad_method["paymentMethod"] = json!("cash");
        let mut wrong_total = order_body("c@example.com");
        wrong_total["totalAmount"] = json!("1339.00");
        let mut unknown_box = order_body("d@example.com");
        unknown_box["boxTypeId"] = json!(99);
        let missing_customer = json!({ "boxTypeId": 1, "paymentMethod": "jazzcash", "items": [] });

        for body in [bad_email, no_items, bad_method, wrong_total, unknown_box, missing_customer] {
            let req = test::TestRequest::post()
                .uri("/api/orders")
                .set_json(&body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
            let err: Value = test::read_body_json(resp).await;
            assert!(err["error"].is_string());
        }

        assert_eq!(store.customer_count(), 0);
        assert_eq!(store.order_count(), 0);
    }

    #[actix_web::test]
    async fn get_order_includes_items_with_products() {
        let store = InMemoryStore::seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&store, &config(&[]))))
                .configure(crate::configure_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(order_body("get@example.com"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();
        store.set_product_price(1, dec("999.00"));

        let req = test::TestRequest::get()
            .uri(&format!("/api/orders/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["boxType"]["name"], "Small Box");
        assert_eq!(body["items"][0]["unitPrice"], "150.00");
        assert_eq!(body["items"][0]["product"]["price"], "999.00");

        let req = test::TestRequest::get().uri("/api/orders/777").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn list_orders_clamps_limit() {
        let store = InMemoryStore::seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&store, &config(&[]))))
                .configure(crate::configure_routes),
        )
        .await;
        for n in 0..3 {
            let req = test::TestRequest::post()
                .uri("/api/orders")
                .set_json(order_body(&format!("l{n}@example.com")))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri("/api/orders?page=0&limit=500")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["page"], 1);
        assert_eq!(body["limit"], 100);
        assert_eq!(body["total"], 3);

        let req = test::TestRequest::get()
            .uri("/api/orders?page=2&limit=2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn list_orders_rejects_page_past_i64_range() {
        let store = InMemoryStore::seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&store, &config(&[]))))
                .configure(crate::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/orders?page=9223372036854775807&limit=100")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("out of range"));
    }

    #[actix_web::test]
    async fn sub_cent_unit_price_is_rejected() {
        let store = InMemoryStore::seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&store, &config(&[]))))
                .configure(crate::configure_routes),
        )
        .await;
        let mut body = order_body("cents@example.com");
        body["totalAmount"] = json!("0.01");
        body["items"] = json!([
            { "productId": 1, "quantity": "1", "unitPrice": "0.004" },
            { "productId": 2, "quantity": "1", "unitPrice": "0.004" }
        ]);

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(store.order_count(), 0);
    }

    #[actix_web::test]
    async fn receipt_has_order_number_and_delivery_estimate() {
        let store = InMemoryStore::seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&store, &config(&[]))))
                .configure(crate::configure_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(order_body("receipt@example.com"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/orders/{id}/receipt"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["orderNumber"], format!("FB{id:06}"));
        assert_eq!(body["boxType"], "Small Box");
        assert_eq!(body["total"], "540.00");
        assert_eq!(body["items"][1]["lineTotal"], "240.00");

        let placed: DateTime<Utc> = body["orderDate"].as_str().unwrap().parse().unwrap();
        let delivery: DateTime<Utc> = body["estimatedDelivery"].as_str().unwrap().parse().unwrap();
        assert_eq!(delivery - placed, chrono::Duration::days(2));
    }

    #[actix_web::test]
    async fn status_updates_touch_one_field() {
        let store = InMemoryStore::seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&store, &config(&[]))))
                .configure(crate::configure_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(order_body("status@example.com"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/orders/{id}/status"))
            .set_json(json!({ "status": "confirmed" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["orderStatus"], "confirmed");
        assert_eq!(body["paymentStatus"], "pending");

        let req = test::TestRequest::put()
            .uri(&format!("/api/orders/{id}/payment"))
            .set_json(json!({ "status": "failed" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["orderStatus"], "confirmed");
        assert_eq!(body["paymentStatus"], "failed");

        let req = test::TestRequest::put()
            .uri(&format!("/api/orders/{id}/status"))
            .set_json(json!({ "status": "shipped" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::put()
            .uri("/api/orders/404/status")
            .set_json(json!({ "status": "cancelled" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn strict_policy_answers_illegal_moves_with_conflict() {
        let store = InMemoryStore::seeded();
        let cfg = config(&[("ORDER_STATUS_POLICY", "strict")]);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&store, &cfg)))
                .configure(crate::configure_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(order_body("strict@example.com"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/orders/{id}/status"))
            .set_json(json!({ "status": "delivered" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
