use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::catalog::{Review, ReviewInput};
use crate::errors::AppError;
use crate::Reviews;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub name: String,
    pub description: String,
}

impl From<ReviewRequest> for ReviewInput {
    fn from(r: ReviewRequest) -> Self {
        ReviewInput {
            name: r.name,
            description: r.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    /// Day the review was written, `YYYY-MM-DD`.
    pub date: String,
    pub name: String,
    pub description: String,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        ReviewResponse {
            id: r.id,
            date: r.date.to_string(),
            name: r.name,
            description: r.description,
        }
    }
}

/// GET /products/{product_id}/reviews
#[utoipa::path(
    get,
    path = "/products/{product_id}/reviews",
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Reviews of the product", body = [ReviewResponse]),
        (status = 404, description = "Product not found"),
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    service: web::Data<Reviews>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let reviews = web::block(move || service.list_reviews(product_id)).await??;
    let body: Vec<ReviewResponse> = reviews.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /products/{product_id}/reviews/{id}
#[utoipa::path(
    get,
    path = "/products/{product_id}/reviews/{id}",
    params(
        ("product_id" = i64, Path, description = "Product id"),
        ("id" = i64, Path, description = "Review id"),
    ),
    responses(
        (status = 200, description = "Review found", body = ReviewResponse),
        (status = 404, description = "Review not found"),
    ),
    tag = "reviews"
)]
pub async fn get_review(
    service: web::Data<Reviews>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (product_id, id) = path.into_inner();
    let review = web::block(move || service.get_review(product_id, id)).await??;
    Ok(HttpResponse::Ok().json(ReviewResponse::from(review)))
}

/// POST /products/{product_id}/reviews
#[utoipa::path(
    post,
    path = "/products/{product_id}/reviews",
    params(("product_id" = i64, Path, description = "Product id")),
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid review"),
        (status = 404, description = "Product not found"),
    ),
    tag = "reviews"
)]
pub async fn create_review(
    service: web::Data<Reviews>,
    path: web::Path<i64>,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let input = ReviewInput::from(body.into_inner());
    let review = web::block(move || service.create_review(product_id, input)).await??;
    Ok(HttpResponse::Created().json(ReviewResponse::from(review)))
}

/// PUT /products/{product_id}/reviews/{id}
#[utoipa::path(
    put,
    path = "/products/{product_id}/reviews/{id}",
    params(
        ("product_id" = i64, Path, description = "Product id"),
        ("id" = i64, Path, description = "Review id"),
    ),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review replaced", body = ReviewResponse),
        (status = 404, description = "Review not found"),
    ),
    tag = "reviews"
)]
pub async fn update_review(
    service: web::Data<Reviews>,
    path: web::Path<(i64, i64)>,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let (product_id, id) = path.into_inner();
    let input = ReviewInput::from(body.into_inner());
    let review = web::block(move || service.update_review(product_id, id, input)).await??;
    Ok(HttpResponse::Ok().json(ReviewResponse::from(review)))
}

/// DELETE /products/{product_id}/reviews/{id}
#[utoipa::path(
    delete,
    path = "/products/{product_id}/reviews/{id}",
    params(
        ("product_id" = i64, Path, description = "Product id"),
        ("id" = i64, Path, description = "Review id"),
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Review not found"),
    ),
    tag = "reviews"
)]
pub async fn delete_review(
    service: web::Data<Reviews>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (product_id, id) = path.into_inner();
    web::block(move || service.delete_review(product_id, id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
