use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::customer::{Customer, CustomerInput, Membership};
use crate::errors::AppError;
use crate::Customers;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// "B" (bronze, default), "S" (silver) or "G" (gold).
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub membership: Membership,
}

impl From<CustomerRequest> for CustomerInput {
    fn from(r: CustomerRequest) -> Self {
        CustomerInput {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            birth_date: r.birth_date,
            membership: r.membership,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    #[schema(value_type = String)]
    pub membership: Membership,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        CustomerResponse {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            phone: c.phone,
            birth_date: c.birth_date,
            membership: c.membership,
        }
    }
}

/// GET /customers
#[utoipa::path(
    get,
    path = "/customers",
    responses(
        (status = 200, description = "All customers, ordered by name", body = [CustomerResponse]),
    ),
    tag = "customers"
)]
pub async fn list_customers(service: web::Data<Customers>) -> Result<HttpResponse, AppError> {
    let customers = web::block(move || service.list_customers()).await??;
    let body: Vec<CustomerResponse> = customers.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /customers/{id}
#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn get_customer(
    service: web::Data<Customers>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let customer = web::block(move || service.get_customer(id)).await??;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// POST /customers
#[utoipa::path(
    post,
    path = "/customers",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid customer or duplicate email"),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    service: web::Data<Customers>,
    body: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let input = CustomerInput::from(body.into_inner());
    let customer = web::block(move || service.create_customer(input)).await??;
    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

/// PUT /customers/{id}
#[utoipa::path(
    put,
    path = "/customers/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer replaced", body = CustomerResponse),
        (status = 400, description = "Invalid customer or duplicate email"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn update_customer(
    service: web::Data<Customers>,
    path: web::Path<i64>,
    body: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = CustomerInput::from(body.into_inner());
    let customer = web::block(move || service.update_customer(id, input)).await??;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// DELETE /customers/{id}
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found"),
        (status = 405, description = "Customer has orders"),
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    service: web::Data<Customers>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || service.delete_customer(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
