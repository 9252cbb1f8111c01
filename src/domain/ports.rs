use uuid::Uuid;

use super::cart::{Cart, CartItemView, CartView, Quantity};
use super::catalog::{Collection, CollectionInput, Product, ProductInput, Review, ReviewInput};
use super::customer::{Customer, CustomerInput};
use super::errors::DomainError;
use super::order::{OrderItemInput, OrderView, PaymentStatus};

/// Existence check the cart resolver runs before touching the store.
pub trait ProductCatalog: Send + Sync + 'static {
    fn exists(&self, product_id: i64) -> Result<bool, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Product>, DomainError>;
    fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError>;
    fn create(&self, input: ProductInput) -> Result<Product, DomainError>;
    fn update(&self, id: i64, input: ProductInput) -> Result<Option<Product>, DomainError>;
    /// Fails with `Protected` while any order item references the product.
    fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

pub trait CollectionRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Collection>, DomainError>;
    fn find_by_id(&self, id: i64) -> Result<Option<Collection>, DomainError>;
    fn create(&self, input: CollectionInput) -> Result<Collection, DomainError>;
    fn update(&self, id: i64, input: CollectionInput) -> Result<Option<Collection>, DomainError>;
    /// Fails with `Protected` while the collection still holds products.
    fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

pub trait ReviewRepository: Send + Sync + 'static {
    fn list_for_product(&self, product_id: i64) -> Result<Vec<Review>, DomainError>;
    fn find(&self, product_id: i64, id: i64) -> Result<Option<Review>, DomainError>;
    fn create(&self, product_id: i64, input: ReviewInput) -> Result<Review, DomainError>;
    fn update(
        &self,
        product_id: i64,
        id: i64,
        input: ReviewInput,
    ) -> Result<Option<Review>, DomainError>;
    fn delete(&self, product_id: i64, id: i64) -> Result<bool, DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    fn create(&self) -> Result<Cart, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<CartView>, DomainError>;
    /// Removes the cart and, by cascade, all of its items.
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    fn find_item(&self, cart_id: Uuid, item_id: i64) -> Result<Option<CartItemView>, DomainError>;
    /// Merge `quantity` into the cart's line for `product_id`, or insert a new
    /// line, as one atomic step. Unknown cart is `NotFound`.
    fn add_item(
        &self,
        cart_id: Uuid,
        product_id: i64,
        quantity: Quantity,
    ) -> Result<CartItemView, DomainError>;
    fn set_quantity(
        &self,
        cart_id: Uuid,
        item_id: i64,
        quantity: Quantity,
    ) -> Result<Option<CartItemView>, DomainError>;
    fn remove_item(&self, cart_id: Uuid, item_id: i64) -> Result<bool, DomainError>;
}

pub trait CustomerRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Customer>, DomainError>;
    fn find_by_id(&self, id: i64) -> Result<Option<Customer>, DomainError>;
    fn create(&self, input: CustomerInput) -> Result<Customer, DomainError>;
    fn update(&self, id: i64, input: CustomerInput) -> Result<Option<Customer>, DomainError>;
    /// Fails with `Protected` while the customer has orders.
    fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, customer_id: i64, items: Vec<OrderItemInput>) -> Result<i64, DomainError>;
    fn find_by_id(&self, id: i64) -> Result<Option<OrderView>, DomainError>;
    fn list(&self) -> Result<Vec<OrderView>, DomainError>;
    fn set_payment_status(
        &self,
        id: i64,
        status: PaymentStatus,
    ) -> Result<Option<OrderView>, DomainError>;
}
