use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::cart::{Cart, CartItem, CartItemView};
use crate::domain::catalog::{Collection, Product, ProductSummary, Review};
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::order::OrderItemView;
use crate::schema::{
    cart_items, carts, collections, customers, order_items, orders, products, reviews,
};

// ── Catalog ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CollectionRow {
    pub id: i64,
    pub title: String,
    pub featured_product_id: Option<i64>,
}

impl CollectionRow {
    pub fn into_domain(self, products_count: i64) -> Collection {
        Collection {
            id: self.id,
            title: self.title,
            featured_product_id: self.featured_product_id,
            products_count,
        }
    }
}

/// Used for both insert and full replacement.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = collections)]
#[diesel(treat_none_as_null = true)]
pub struct CollectionFields {
    pub title: String,
    pub featured_product_id: Option<i64>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub unit_price: BigDecimal,
    pub inventory: i32,
    pub last_update: DateTime<Utc>,
    pub collection_id: i64,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            title: r.title,
            slug: r.slug,
            description: r.description,
            unit_price: r.unit_price,
            inventory: r.inventory,
            last_update: r.last_update,
            collection_id: r.collection_id,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(treat_none_as_null = true)]
pub struct ProductFields {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub unit_price: BigDecimal,
    pub inventory: i32,
    pub collection_id: i64,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductSummaryRow {
    pub id: i64,
    pub title: String,
    pub unit_price: BigDecimal,
}

impl From<ProductSummaryRow> for ProductSummary {
    fn from(r: ProductSummaryRow) -> Self {
        ProductSummary {
            id: r.id,
            title: r.title,
            unit_price: r.unit_price,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub description: String,
    pub reviewed_on: NaiveDate,
}

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self {
        Review {
            id: r.id,
            product_id: r.product_id,
            name: r.name,
            description: r.description,
            date: r.reviewed_on,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow {
    pub product_id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = reviews)]
pub struct ReviewChangeset {
    pub name: String,
    pub description: String,
}

// ── Carts ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = carts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(r: CartRow) -> Self {
        Cart {
            id: r.id,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = carts)]
pub struct NewCartRow {
    pub id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartItemRow {
    pub id: i64,
    pub cart_id: Uuid,
    pub product_id: i64,
    pub quantity: i32,
}

impl From<CartItemRow> for CartItem {
    fn from(r: CartItemRow) -> Self {
        CartItem {
            id: r.id,
            cart_id: r.cart_id,
            product_id: r.product_id,
            quantity: r.quantity,
        }
    }
}

impl CartItemRow {
    pub fn with_product(self, product: ProductSummaryRow) -> CartItemView {
        CartItemView {
            id: self.id,
            cart_id: self.cart_id,
            product: product.into(),
            quantity: self.quantity,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_items)]
pub struct NewCartItemRow {
    pub cart_id: Uuid,
    pub product_id: i64,
    pub quantity: i32,
}

// ── Customers & orders ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub membership: String,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = DomainError;

    fn try_from(r: CustomerRow) -> Result<Self, Self::Error> {
        Ok(Customer {
            id: r.id,
            membership: r.membership.parse()?,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            birth_date: r.birth_date,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = customers)]
#[diesel(treat_none_as_null = true)]
pub struct CustomerFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub membership: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i64,
    pub placed_at: DateTime<Utc>,
    pub payment_status: String,
    pub customer_id: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub customer_id: i64,
    pub payment_status: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: BigDecimal,
}

impl From<OrderItemRow> for OrderItemView {
    fn from(r: OrderItemRow) -> Self {
        OrderItemView {
            id: r.id,
            product_id: r.product_id,
            quantity: r.quantity,
            unit_price: r.unit_price,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: BigDecimal,
}
