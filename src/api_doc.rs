use utoipa::OpenApi;

use crate::handlers::{catalog, contact, orders, payments, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Freshbox storefront API",
        description = "Produce box catalog, checkout, payments and admin dashboard"
    ),
    paths(
        catalog::list_box_types,
        catalog::create_box_type,
        catalog::update_box_type,
        catalog::list_products,
        catalog::create_product,
        catalog::update_product,
        catalog::delete_product,
        orders::create_order,
        orders::get_order,
        orders::list_orders,
        orders::get_receipt,
        orders::update_order_status,
        orders::update_payment_status,
        payments::initiate_payment,
        stats::get_stats,
        contact::create_message,
        contact::list_messages,
        contact::mark_replied,
    ),
    components(schemas(
        catalog::BoxTypeResponse,
        catalog::CreateBoxTypeRequest,
        catalog::UpdateBoxTypeRequest,
        catalog::ProductResponse,
        catalog::CreateProductRequest,
        catalog::UpdateProductRequest,
        orders::CustomerRequest,
        orders::CreateOrderItemRequest,
        orders::CreateOrderRequest,
        orders::OrderResponse,
        orders::CustomerResponse,
        orders::OrderItemResponse,
        orders::PlacedOrderResponse,
        orders::OrderLineDetailsResponse,
        orders::OrderDetailsResponse,
        orders::ListOrdersResponse,
        orders::ReceiptCustomer,
        orders::ReceiptLineResponse,
        orders::ReceiptResponse,
        orders::StatusUpdateRequest,
        payments::PaymentRequestBody,
        payments::PaymentResponse,
        stats::StatsResponse,
        contact::CreateContactRequest,
        contact::ContactMessageResponse,
    )),
    tags(
        (name = "catalog", description = "Box types and products"),
        (name = "orders", description = "Checkout, order lookup and admin status updates"),
        (name = "payments", description = "Simulated mobile wallet payments"),
        (name = "stats", description = "Admin dashboard figures"),
        (name = "contact", description = "Contact form messages"),
    )
)]
pub struct ApiDoc;
