use validator::Validate;

use crate::domain::customer::{Customer, CustomerInput};
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;

pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_customers(&self) -> Result<Vec<Customer>, DomainError> {
        self.repo.list()
    }

    pub fn get_customer(&self, id: i64) -> Result<Customer, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Customer"))
    }

    pub fn create_customer(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        input.validate()?;
        self.repo.create(input)
    }

    pub fn update_customer(&self, id: i64, input: CustomerInput) -> Result<Customer, DomainError> {
        input.validate()?;
        self.repo
            .update(id, input)?
            .ok_or(DomainError::NotFound("Customer"))
    }

    pub fn delete_customer(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id)? {
            return Err(DomainError::NotFound("Customer"));
        }
        Ok(())
    }
}
