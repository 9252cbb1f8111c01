use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "P")]
    Pending,
    #[serde(rename = "C")]
    Complete,
    #[serde(rename = "F")]
    Failed,
}

impl PaymentStatus {
    pub fn code(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "P",
            PaymentStatus::Complete => "C",
            PaymentStatus::Failed => "F",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(PaymentStatus::Pending),
            "C" => Ok(PaymentStatus::Complete),
            "F" => Ok(PaymentStatus::Failed),
            other => Err(DomainError::Internal(format!(
                "unknown payment status code '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: i64,
    pub customer_id: i64,
    pub payment_status: PaymentStatus,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}

impl OrderView {
    pub fn total_price(&self) -> BigDecimal {
        self.items
            .iter()
            .map(|i| &i.unit_price * BigDecimal::from(i.quantity))
            .fold(BigDecimal::from(0), |acc, t| acc + t)
    }
}

/// Reject empty orders and lines below one unit.
pub fn validate_order_items(items: &[OrderItemInput]) -> Result<(), DomainError> {
    if items.is_empty() {
        return Err(DomainError::validation("an order needs at least one item"));
    }
    if let Some(bad) = items.iter().find(|i| i.quantity < 1) {
        return Err(DomainError::validation(format!(
            "quantity for product {} must be at least 1",
            bad.product_id
        )));
    }
    Ok(())
}
