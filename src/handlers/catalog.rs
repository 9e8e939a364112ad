use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};

use super::{nullable, parse_decimal, parse_optional_decimal};
use crate::domain::catalog::{
    BoxType, BoxTypePatch, NewBoxType, NewProduct, Product, ProductCategory, ProductFilter,
    ProductPatch,
};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoxTypeResponse {
    pub id: i32,
    pub name: String,
    /// Decimal string, e.g. "799.00"
    pub price: String,
    pub items_limit: i32,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<BoxType> for BoxTypeResponse {
    fn from(b: BoxType) -> Self {
        Self {
            id: b.id,
            name: b.name,
            price: b.price.to_string(),
            items_limit: b.items_limit,
            description: b.description,
            is_active: b.is_active,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoxTypeRequest {
    pub name: String,
    pub price: String,
    pub items_limit: i32,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoxTypeRequest {
    pub name: Option<String>,
    pub price: Option<String>,
    pub items_limit: Option<i32>,
    /// `null` clears the description; omit the field to keep it.
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    /// "fruit" or "vegetable"
    pub category: String,
    pub price: String,
    pub unit: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
    #[schema(value_type = Option<Object>)]
    pub nutrition_info: Option<Value>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            category: p.category.to_string(),
            price: p.price.to_string(),
            unit: p.unit,
            image_url: p.image_url,
            description: p.description,
            is_available: p.is_available,
            nutrition_info: p.nutrition_info,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub price: String,
    pub unit: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[schema(value_type = Option<Object>)]
    pub nutrition_info: Option<Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Object>)]
    pub nutrition_info: Option<Option<Value>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Only products of this category ("fruit" or "vegetable").
    pub category: Option<String>,
    /// When true, only products currently available.
    pub available: Option<bool>,
}

fn parse_category(raw: &str) -> Result<ProductCategory, AppError> {
    Ok(raw.parse::<ProductCategory>()?)
}

// ── Box types ────────────────────────────────────────────────────────────────

/// GET /api/box-types
///
/// Active box types, cheapest first.
#[utoipa::path(
    get,
    path = "/api/box-types",
    responses(
        (status = 200, description = "Active box types", body = [BoxTypeResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_box_types(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let catalog = Arc::clone(&state.catalog);

    let box_types = web::block(move || catalog.list_box_types())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(
        box_types
            .into_iter()
            .map(BoxTypeResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/box-types",
    request_body = CreateBoxTypeRequest,
    responses(
        (status = 201, description = "Box type created", body = BoxTypeResponse),
        (status = 400, description = "Invalid box type data"),
    ),
    tag = "catalog"
)]
pub async fn create_box_type(
    state: web::Data<AppState>,
    body: web::Json<CreateBoxTypeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let new = NewBoxType {
        price: parse_decimal("price", &body.price)?,
        name: body.name,
        items_limit: body.items_limit,
        description: body.description,
        is_active: body.is_active,
    };
    let catalog = Arc::clone(&state.catalog);

    let created = web::block(move || catalog.create_box_type(new))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(BoxTypeResponse::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/box-types/{id}",
    params(("id" = i32, Path, description = "Box type id")),
    request_body = UpdateBoxTypeRequest,
    responses(
        (status = 200, description = "Box type updated", body = BoxTypeResponse),
        (status = 400, description = "Invalid box type data"),
        (status = 404, description = "Box type not found"),
    ),
    tag = "catalog"
)]
pub async fn update_box_type(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateBoxTypeRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let patch = BoxTypePatch {
        price: parse_optional_decimal("price", body.price.as_deref())?,
        name: body.name,
        items_limit: body.items_limit,
        description: body.description,
        is_active: body.is_active,
    };
    let catalog = Arc::clone(&state.catalog);

    let updated = web::block(move || catalog.update_box_type(id, patch))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(BoxTypeResponse::from(updated)))
}

// ── Products ─────────────────────────────────────────────────────────────────

/// GET /api/products
///
/// `category` and `available` may be combined.
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products by category, then name", body = [ProductResponse]),
        (status = 400, description = "Unknown category"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let filter = ProductFilter {
        category: query.category.as_deref().map(parse_category).transpose()?,
        available_only: query.available.unwrap_or(false),
    };
    let catalog = Arc::clone(&state.catalog);

    let products = web::block(move || catalog.list_products(filter))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(
        products
            .into_iter()
            .map(ProductResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product data"),
    ),
    tag = "catalog"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let new = NewProduct {
        category: parse_category(&body.category)?,
        price: parse_decimal("price", &body.price)?,
        name: body.name,
        unit: body.unit,
        image_url: body.image_url,
        description: body.description,
        is_available: body.is_available,
        nutrition_info: body.nutrition_info,
    };
    let catalog = Arc::clone(&state.catalog);

    let created = web::block(move || catalog.create_product(new))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(ProductResponse::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid product data"),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let patch = ProductPatch {
        category: body.category.as_deref().map(parse_category).transpose()?,
        price: parse_optional_decimal("price", body.price.as_deref())?,
        name: body.name,
        unit: body.unit,
        image_url: body.image_url,
        description: body.description,
        is_available: body.is_available,
        nutrition_info: body.nutrition_info,
    };
    let catalog = Arc::clone(&state.catalog);

    let updated = web::block(move || catalog.update_product(id, patch))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(updated)))
}

/// DELETE /api/products/{id}
///
/// Fails with 400 while order items still reference the product.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, description = "Product is referenced by orders"),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let catalog = Arc::clone(&state.catalog);

    web::block(move || catalog.delete_product(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Product deleted successfully" })))
}
