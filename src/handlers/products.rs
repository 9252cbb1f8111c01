use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::catalog::{parse_price, Product, ProductInput};
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::Products;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Decimal price as a string, e.g. "9.99". Must be at least 1.
    pub unit_price: String,
    pub inventory: i32,
    /// Collection id.
    pub collection: i64,
}

impl TryFrom<ProductRequest> for ProductInput {
    type Error = DomainError;

    fn try_from(r: ProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductInput {
            unit_price: parse_price(&r.unit_price)?,
            title: r.title,
            slug: r.slug,
            description: r.description,
            inventory: r.inventory,
            collection_id: r.collection,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub inventory: i32,
    pub unit_price: String,
    pub price_with_tax: String,
    pub collection: i64,
    pub last_update: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            price_with_tax: p.price_with_tax().to_string(),
            id: p.id,
            title: p.title,
            slug: p.slug,
            description: p.description,
            inventory: p.inventory,
            unit_price: p.unit_price.to_string(),
            collection: p.collection_id,
            last_update: p.last_update.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products, ordered by title", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products(service: web::Data<Products>) -> Result<HttpResponse, AppError> {
    let products = web::block(move || service.list_products()).await??;
    let body: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    service: web::Data<Products>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let product = web::block(move || service.get_product(id)).await??;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product"),
    ),
    tag = "products"
)]
pub async fn create_product(
    service: web::Data<Products>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let input = ProductInput::try_from(body.into_inner())?;
    let product = web::block(move || service.create_product(input)).await??;
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// PUT /products/{id}
///
/// Replaces every writable field of the product.
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product replaced", body = ProductResponse),
        (status = 400, description = "Invalid product"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn update_product(
    service: web::Data<Products>,
    path: web::Path<i64>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = ProductInput::try_from(body.into_inner())?;
    let product = web::block(move || service.update_product(id, input)).await??;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// DELETE /products/{id}
///
/// Refused with 405 while any order item references the product.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 405, description = "Product is referenced by an order"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    service: web::Data<Products>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || service.delete_product(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
