use crate::domain::errors::DomainError;
use crate::domain::order::{validate_order_items, OrderItemInput, OrderView, PaymentStatus};
use crate::domain::ports::OrderRepository;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_order(
        &self,
        customer_id: i64,
        items: Vec<OrderItemInput>,
    ) -> Result<OrderView, DomainError> {
        validate_order_items(&items)?;
        let id = self.repo.create(customer_id, items)?;
        log::info!("placed order {} for customer {}", id, customer_id);
        self.get_order(id)
    }

    pub fn get_order(&self, id: i64) -> Result<OrderView, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound("Order"))
    }

    pub fn list_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        self.repo.list()
    }

    pub fn set_payment_status(
        &self,
        id: i64,
        status: PaymentStatus,
    ) -> Result<OrderView, DomainError> {
        self.repo
            .set_payment_status(id, status)?
            .ok_or(DomainError::NotFound("Order"))
    }
}
