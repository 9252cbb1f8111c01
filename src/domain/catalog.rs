use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, NaiveDate, Utc};
use validator::{Validate, ValidationError};

use super::errors::DomainError;

pub const UNKNOWN_PRODUCT: &str = "The product does not exist with a given product_id.";
/// Prices are stored as NUMERIC(6, 2).
const PRICE_MAX_EXCLUSIVE: i64 = 10_000;
/// 1.1, as digits and scale.
const TAX_RATE: (i64, i64) = (11, 1);

#[derive(Debug, Clone)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub unit_price: BigDecimal,
    pub inventory: i32,
    pub last_update: DateTime<Utc>,
    pub collection_id: i64,
}

impl Product {
    pub fn price_with_tax(&self) -> BigDecimal {
        price_with_tax(&self.unit_price)
    }
}

/// The slice of a product embedded in cart lines.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub id: i64,
    pub title: String,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone, Validate)]
pub struct ProductInput {
    #[validate(
        length(min = 1, max = 255, message = "must be 1 to 255 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[validate(
        length(min = 1, max = 255, message = "must be 1 to 255 characters"),
        custom(function = "not_blank")
    )]
    pub slug: String,
    pub description: Option<String>,
    pub unit_price: BigDecimal,
    pub inventory: i32,
    pub collection_id: i64,
}

#[derive(Debug, Clone)]
pub struct Collection {
    pub id: i64,
    pub title: String,
    pub featured_product_id: Option<i64>,
    pub products_count: i64,
}

#[derive(Debug, Clone, Validate)]
pub struct CollectionInput {
    #[validate(
        length(min = 1, max = 255, message = "must be 1 to 255 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    pub featured_product_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Validate)]
pub struct ReviewInput {
    #[validate(
        length(min = 1, max = 255, message = "must be 1 to 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    pub description: String,
}

pub fn price_with_tax(unit_price: &BigDecimal) -> BigDecimal {
    let rate = BigDecimal::new(BigInt::from(TAX_RATE.0), TAX_RATE.1);
    (unit_price * rate).with_scale_round(2, RoundingMode::HalfUp)
}

pub fn parse_price(raw: &str) -> Result<BigDecimal, DomainError> {
    BigDecimal::from_str(raw.trim())
        .map_err(|e| DomainError::validation(format!("invalid unit_price '{}': {}", raw, e)))
}

pub fn validate_unit_price(price: &BigDecimal) -> Result<(), DomainError> {
    if *price < BigDecimal::from(1) {
        return Err(DomainError::validation("unit price must be >= 1"));
    }
    if *price >= BigDecimal::from(PRICE_MAX_EXCLUSIVE) {
        return Err(DomainError::validation(format!(
            "unit price must be below {}",
            PRICE_MAX_EXCLUSIVE
        )));
    }
    let (_, scale) = price.normalized().as_bigint_and_exponent();
    if scale > 2 {
        return Err(DomainError::validation(
            "unit price must have at most 2 decimal places",
        ));
    }
    Ok(())
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}
