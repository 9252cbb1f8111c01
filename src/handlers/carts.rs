use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::{Cart, CartItemView, CartView};
use crate::domain::catalog::ProductSummary;
use crate::errors::AppError;
use crate::Carts;

#[derive(Debug, Serialize, ToSchema)]
pub struct SimpleProductResponse {
    pub id: i64,
    pub title: String,
    pub unit_price: String,
}

impl From<ProductSummary> for SimpleProductResponse {
    fn from(p: ProductSummary) -> Self {
        SimpleProductResponse {
            id: p.id,
            title: p.title,
            unit_price: p.unit_price.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemResponse {
    pub id: i64,
    pub product: SimpleProductResponse,
    pub quantity: i32,
    /// `quantity * product.unit_price`
    pub total_price: String,
}

impl From<CartItemView> for CartItemResponse {
    fn from(item: CartItemView) -> Self {
        CartItemResponse {
            total_price: item.total_price().to_string(),
            id: item.id,
            quantity: item.quantity,
            product: item.product.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub id: Uuid,
    pub created_at: String,
    pub items: Vec<CartItemResponse>,
    pub total_price: String,
}

impl From<CartView> for CartResponse {
    fn from(cart: CartView) -> Self {
        CartResponse {
            total_price: cart.total_price().to_string(),
            id: cart.id,
            created_at: cart.created_at.to_rfc3339(),
            items: cart.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartView {
            id: cart.id,
            created_at: cart.created_at,
            items: vec![],
        }
        .into()
    }
}

/// POST /carts
#[utoipa::path(
    post,
    path = "/carts",
    responses(
        (status = 201, description = "Empty cart created", body = CartResponse),
    ),
    tag = "carts"
)]
pub async fn create_cart(service: web::Data<Carts>) -> Result<HttpResponse, AppError> {
    let cart = web::block(move || service.create_cart()).await??;
    Ok(HttpResponse::Created().json(CartResponse::from(cart)))
}

/// GET /carts/{id}
///
/// Returns the cart with its items and the derived totals.
#[utoipa::path(
    get,
    path = "/carts/{id}",
    params(("id" = Uuid, Path, description = "Cart UUID")),
    responses(
        (status = 200, description = "Cart found", body = CartResponse),
        (status = 404, description = "Cart not found"),
    ),
    tag = "carts"
)]
pub async fn get_cart(
    service: web::Data<Carts>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let cart = web::block(move || service.get_cart(id)).await??;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

/// DELETE /carts/{id}
///
/// Deletes the cart together with all of its items.
#[utoipa::path(
    delete,
    path = "/carts/{id}",
    params(("id" = Uuid, Path, description = "Cart UUID")),
    responses(
        (status = 204, description = "Cart deleted"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "carts"
)]
pub async fn delete_cart(
    service: web::Data<Carts>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || service.delete_cart(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
