use validator::Validate;

use crate::domain::catalog::{
    validate_unit_price, Collection, CollectionInput, Product, ProductInput, Review, ReviewInput,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::{
    CollectionRepository, ProductCatalog, ProductRepository, ReviewRepository,
};

pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.list()
    }

    pub fn get_product(&self, id: i64) -> Result<Product, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound("Product"))
    }

    pub fn create_product(&self, input: ProductInput) -> Result<Product, DomainError> {
        input.validate()?;
        validate_unit_price(&input.unit_price)?;
        self.repo.create(input)
    }

    pub fn update_product(&self, id: i64, input: ProductInput) -> Result<Product, DomainError> {
        input.validate()?;
        validate_unit_price(&input.unit_price)?;
        self.repo
            .update(id, input)?
            .ok_or(DomainError::NotFound("Product"))
    }

    pub fn delete_product(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id)? {
            return Err(DomainError::NotFound("Product"));
        }
        Ok(())
    }
}

pub struct CollectionService<R> {
    repo: R,
}

impl<R: CollectionRepository> CollectionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_collections(&self) -> Result<Vec<Collection>, DomainError> {
        self.repo.list()
    }

    pub fn get_collection(&self, id: i64) -> Result<Collection, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Collection"))
    }

    pub fn create_collection(&self, input: CollectionInput) -> Result<Collection, DomainError> {
        input.validate()?;
        self.repo.create(input)
    }

    pub fn update_collection(
        &self,
        id: i64,
        input: CollectionInput,
    ) -> Result<Collection, DomainError> {
        input.validate()?;
        self.repo
            .update(id, input)?
            .ok_or(DomainError::NotFound("Collection"))
    }

    pub fn delete_collection(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id)? {
            return Err(DomainError::NotFound("Collection"));
        }
        Ok(())
    }
}

/// Reviews are always addressed through their product.
pub struct ReviewService<R, P> {
    repo: R,
    catalog: P,
}

impl<R: ReviewRepository, P: ProductCatalog> ReviewService<R, P> {
    pub fn new(repo: R, catalog: P) -> Self {
        Self { repo, catalog }
    }

    pub fn list_reviews(&self, product_id: i64) -> Result<Vec<Review>, DomainError> {
        self.require_product(product_id)?;
        self.repo.list_for_product(product_id)
    }

    pub fn get_review(&self, product_id: i64, id: i64) -> Result<Review, DomainError> {
        self.repo
            .find(product_id, id)?
            .ok_or(DomainError::NotFound("Review"))
    }

    pub fn create_review(
        &self,
        product_id: i64,
        input: ReviewInput,
    ) -> Result<Review, DomainError> {
        input.validate()?;
        self.require_product(product_id)?;
        self.repo.create(product_id, input)
    }

    pub fn update_review(
        &self,
        product_id: i64,
        id: i64,
        input: ReviewInput,
    ) -> Result<Review, DomainError> {
        input.validate()?;
        self.repo
            .update(product_id, id, input)?
            .ok_or(DomainError::NotFound("Review"))
    }

    pub fn delete_review(&self, product_id: i64, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(product_id, id)? {
            return Err(DomainError::NotFound("Review"));
        }
        Ok(())
    }

    fn require_product(&self, product_id: i64) -> Result<(), DomainError> {
        if self.catalog.exists(product_id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound("Product"))
        }
    }
}
