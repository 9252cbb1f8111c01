use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::catalog::ProductSummary;
use super::errors::DomainError;

/// Requested number of units for a cart line. Never below [`Quantity::MIN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(i32);

impl Quantity {
    pub const MIN: i32 = 1;

    pub fn new(value: i32) -> Result<Self, DomainError> {
        if value < Self::MIN {
            return Err(DomainError::validation(format!(
                "quantity must be at least {}, got {}",
                Self::MIN,
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Cart {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A stored cart line, as read back from the store before a mutation.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub id: i64,
    pub cart_id: Uuid,
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: i64,
    pub cart_id: Uuid,
    pub product: ProductSummary,
    pub quantity: i32,
}

impl CartItemView {
    pub fn total_price(&self) -> BigDecimal {
        line_total(self.quantity, &self.product.unit_price)
    }
}

#[derive(Debug, Clone)]
pub struct CartView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<CartItemView>,
}

impl CartView {
    pub fn total_price(&self) -> BigDecimal {
        self.items
            .iter()
            .map(CartItemView::total_price)
            .fold(BigDecimal::from(0), |acc, t| acc + t)
    }
}

pub fn line_total(quantity: i32, unit_price: &BigDecimal) -> BigDecimal {
    unit_price * BigDecimal::from(quantity)
}

/// What the store has to do to add `requested` units of a product to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartItemUpsert {
    /// The product already has a line in the cart; overwrite its quantity.
    Increment { item_id: i64, quantity: i32 },
    /// First time the product is added; insert a new line.
    Insert { quantity: i32 },
}

/// Decide between merging into the existing `(cart, product)` line and
/// inserting a new one. A cart never holds two lines for the same product.
pub fn resolve_add(
    existing: Option<&CartItem>,
    requested: Quantity,
) -> Result<CartItemUpsert, DomainError> {
    match existing {
        Some(item) => {
            let quantity = item
                .quantity
                .checked_add(requested.get())
                .ok_or_else(|| {
                    DomainError::validation(format!(
                        "quantity for product {} would exceed {}",
                        item.product_id,
                        i32::MAX
                    ))
                })?;
            Ok(CartItemUpsert::Increment {
                item_id: item.id,
                quantity,
            })
        }
        None => Ok(CartItemUpsert::Insert {
            quantity: requested.get(),
        }),
    }
}
