use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::catalog::{Collection, CollectionInput};
use crate::errors::AppError;
use crate::Collections;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CollectionRequest {
    pub title: String,
    #[serde(default)]
    pub featured_product: Option<i64>,
}

impl From<CollectionRequest> for CollectionInput {
    fn from(r: CollectionRequest) -> Self {
        CollectionInput {
            title: r.title,
            featured_product_id: r.featured_product,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    pub id: i64,
    pub title: String,
    pub featured_product: Option<i64>,
    pub products_count: i64,
}

impl From<Collection> for CollectionResponse {
    fn from(c: Collection) -> Self {
        CollectionResponse {
            id: c.id,
            title: c.title,
            featured_product: c.featured_product_id,
            products_count: c.products_count,
        }
    }
}

/// GET /collections
#[utoipa::path(
    get,
    path = "/collections",
    responses(
        (
            status = 200,
            description = "All collections with product counts",
            body = [CollectionResponse]
        ),
    ),
    tag = "collections"
)]
pub async fn list_collections(service: web::Data<Collections>) -> Result<HttpResponse, AppError> {
    let collections = web::block(move || service.list_collections()).await??;
    let body: Vec<CollectionResponse> = collections.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /collections/{id}
#[utoipa::path(
    get,
    path = "/collections/{id}",
    params(("id" = i64, Path, description = "Collection id")),
    responses(
        (status = 200, description = "Collection found", body = CollectionResponse),
        (status = 404, description = "Collection not found"),
    ),
    tag = "collections"
)]
pub async fn get_collection(
    service: web::Data<Collections>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let collection = web::block(move || service.get_collection(id)).await??;
    Ok(HttpResponse::Ok().json(CollectionResponse::from(collection)))
}

/// POST /collections
#[utoipa::path(
    post,
    path = "/collections",
    request_body = CollectionRequest,
    responses(
        (status = 201, description = "Collection created", body = CollectionResponse),
        (status = 400, description = "Invalid collection"),
    ),
    tag = "collections"
)]
pub async fn create_collection(
    service: web::Data<Collections>,
    body: web::Json<CollectionRequest>,
) -> Result<HttpResponse, AppError> {
    let input = CollectionInput::from(body.into_inner());
    let collection = web::block(move || service.create_collection(input)).await??;
    Ok(HttpResponse::Created().json(CollectionResponse::from(collection)))
}

/// PUT /collections/{id}
#[utoipa::path(
    put,
    path = "/collections/{id}",
    params(("id" = i64, Path, description = "Collection id")),
    request_body = CollectionRequest,
    responses(
        (status = 200, description = "Collection replaced", body = CollectionResponse),
        (status = 400, description = "Invalid collection"),
        (status = 404, description = "Collection not found"),
    ),
    tag = "collections"
)]
pub async fn update_collection(
    service: web::Data<Collections>,
    path: web::Path<i64>,
    body: web::Json<CollectionRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = CollectionInput::from(body.into_inner());
    let collection = web::block(move || service.update_collection(id, input)).await??;
    Ok(HttpResponse::Ok().json(CollectionResponse::from(collection)))
}

/// DELETE /collections/{id}
#[utoipa::path(
    delete,
    path = "/collections/{id}",
    params(("id" = i64, Path, description = "Collection id")),
    responses(
        (status = 204, description = "Collection deleted"),
        (status = 404, description = "Collection not found"),
        (status = 405, description = "Collection still contains products"),
    ),
    tag = "collections"
)]
pub async fn delete_collection(
    service: web::Data<Collections>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || service.delete_collection(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
