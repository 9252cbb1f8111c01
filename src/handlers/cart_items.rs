use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::carts::CartItemResponse;
use crate::errors::AppError;
use crate::Carts;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCartItemRequest {
    pub product_id: i64,
    /// Units to add. At least 1.
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    /// New quantity, replacing the current one. At least 1.
    pub quantity: i32,
}

/// GET /carts/{cart_id}/items
#[utoipa::path(
    get,
    path = "/carts/{cart_id}/items",
    params(("cart_id" = Uuid, Path, description = "Cart UUID")),
    responses(
        (status = 200, description = "Items in the cart", body = [CartItemResponse]),
        (status = 404, description = "Cart not found"),
    ),
    tag = "cart items"
)]
pub async fn list_items(
    service: web::Data<Carts>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let cart_id = path.into_inner();
    let items = web::block(move || service.list_items(cart_id)).await??;
    let body: Vec<CartItemResponse> = items.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /carts/{cart_id}/items/{id}
#[utoipa::path(
    get,
    path = "/carts/{cart_id}/items/{id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart UUID"),
        ("id" = i64, Path, description = "Cart item id"),
    ),
    responses(
        (status = 200, description = "Cart item found", body = CartItemResponse),
        (status = 404, description = "Cart item not found"),
    ),
    tag = "cart items"
)]
pub async fn get_item(
    service: web::Data<Carts>,
    path: web::Path<(Uuid, i64)>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, id) = path.into_inner();
    let item = web::block(move || service.get_item(cart_id, id)).await??;
    Ok(HttpResponse::Ok().json(CartItemResponse::from(item)))
}

/// POST /carts/{cart_id}/items
///
/// Adds a product to the cart. If the product is already in the cart the
/// existing line's quantity is increased instead of creating a second line.
#[utoipa::path(
    post,
    path = "/carts/{cart_id}/items",
    params(("cart_id" = Uuid, Path, description = "Cart UUID")),
    request_body = AddCartItemRequest,
    responses(
        (status = 201, description = "Resulting cart line", body = CartItemResponse),
        (status = 400, description = "Unknown product or quantity below 1"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "cart items"
)]
pub async fn add_item(
    service: web::Data<Carts>,
    path: web::Path<Uuid>,
    body: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let cart_id = path.into_inner();
    let body = body.into_inner();
    let item =
        web::block(move || service.add_item(cart_id, body.product_id, body.quantity)).await??;
    Ok(HttpResponse::Created().json(CartItemResponse::from(item)))
}

/// PATCH /carts/{cart_id}/items/{id}
#[utoipa::path(
    patch,
    path = "/carts/{cart_id}/items/{id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart UUID"),
        ("id" = i64, Path, description = "Cart item id"),
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity replaced", body = CartItemResponse),
        (status = 400, description = "Quantity below 1"),
        (status = 404, description = "Cart item not found"),
    ),
    tag = "cart items"
)]
pub async fn update_item(
    service: web::Data<Carts>,
    path: web::Path<(Uuid, i64)>,
    body: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, id) = path.into_inner();
    let quantity = body.into_inner().quantity;
    let item = web::block(move || service.set_quantity(cart_id, id, quantity)).await??;
    Ok(HttpResponse::Ok().json(CartItemResponse::from(item)))
}

/// DELETE /carts/{cart_id}/items/{id}
#[utoipa::path(
    delete,
    path = "/carts/{cart_id}/items/{id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart UUID"),
        ("id" = i64, Path, description = "Cart item id"),
    ),
    responses(
        (status = 204, description = "Cart item removed"),
        (status = 404, description = "Cart item not found"),
    ),
    tag = "cart items"
)]
pub async fn remove_item(
    service: web::Data<Carts>,
    path: web::Path<(Uuid, i64)>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, id) = path.into_inner();
    web::block(move || service.remove_item(cart_id, id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
