use uuid::Uuid;

use crate::domain::cart::{Cart, CartItemView, CartView, Quantity};
use crate::domain::catalog::UNKNOWN_PRODUCT;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, ProductCatalog};

pub struct CartService<R, P> {
    repo: R,
    catalog: P,
}

impl<R: CartRepository, P: ProductCatalog> CartService<R, P> {
    pub fn new(repo: R, catalog: P) -> Self {
        Self { repo, catalog }
    }

    pub fn create_cart(&self) -> Result<Cart, DomainError> {
        let cart = self.repo.create()?;
        log::debug!("created cart {}", cart.id);
        Ok(cart)
    }

    pub fn get_cart(&self, id: Uuid) -> Result<CartView, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound("Cart"))
    }

    pub fn delete_cart(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(id)? {
            return Err(DomainError::NotFound("Cart"));
        }
        log::debug!("deleted cart {}", id);
        Ok(())
    }

    pub fn list_items(&self, cart_id: Uuid) -> Result<Vec<CartItemView>, DomainError> {
        Ok(self.get_cart(cart_id)?.items)
    }

    pub fn get_item(&self, cart_id: Uuid, item_id: i64) -> Result<CartItemView, DomainError> {
        self.repo
            .find_item(cart_id, item_id)?
            .ok_or(DomainError::NotFound("Cart item"))
    }

    /// Add `quantity` units of a product, merging into the existing line for
    /// that product if the cart already has one.
    pub fn add_item(
        &self,
        cart_id: Uuid,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartItemView, DomainError> {
        let quantity = Quantity::new(quantity)?;
        if !self.catalog.exists(product_id)? {
            return Err(DomainError::validation(UNKNOWN_PRODUCT));
        }
        let item = self.repo.add_item(cart_id, product_id, quantity)?;
        log::debug!(
            "cart {} now holds {} x product {}",
            cart_id,
            item.quantity,
            product_id
        );
        Ok(item)
    }

    /// Overwrite the quantity of a line. No aggregation.
    pub fn set_quantity(
        &self,
        cart_id: Uuid,
        item_id: i64,
        quantity: i32,
    ) -> Result<CartItemView, DomainError> {
        let quantity = Quantity::new(quantity)?;
        self.repo
            .set_quantity(cart_id, item_id, quantity)?
            .ok_or(DomainError::NotFound("Cart item"))
    }

    pub fn remove_item(&self, cart_id: Uuid, item_id: i64) -> Result<(), DomainError> {
        if !self.repo.remove_item(cart_id, item_id)? {
            return Err(DomainError::NotFound("Cart item"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use bigdecimal::BigDecimal;
    use chrono::Utc;

    use super::*;
    use crate::domain::cart::{resolve_add, CartItem, CartItemUpsert};
    use crate::domain::catalog::ProductSummary;

    struct FakeCatalog(HashSet<i64>);

    impl ProductCatalog for FakeCatalog {
        fn exists(&self, product_id: i64) -> Result<bool, DomainError> {
            Ok(self.0.contains(&product_id))
        }
    }

    #[derive(Default)]
    struct FakeCarts {
        carts: Mutex<HashMap<Uuid, Vec<CartItem>>>,
        next_id: Mutex<i64>,
    }

    impl FakeCarts {
        fn view(item: &CartItem) -> CartItemView {
            CartItemView {
                id: item.id,
                cart_id: item.cart_id,
                product: ProductSummary {
                    id: item.product_id,
                    title: format!("product {}", item.product_id),
                    unit_price: BigDecimal::from(2),
                },
                quantity: item.quantity,
            }
        }

        fn rows(&self, cart_id: Uuid) -> usize {
            self.carts.lock().unwrap()[&cart_id].len()
        }
    }

    impl CartRepository for FakeCarts {
        fn create(&self) -> Result<Cart, DomainError> {
            let id = Uuid::new_v4();
            self.carts.lock().unwrap().insert(id, vec![]);
            Ok(Cart {
                id,
                created_at: Utc::now(),
            })
        }

        fn find_by_id(&self, id: Uuid) -> Result<Option<CartView>, DomainError> {
            Ok(self.carts.lock().unwrap().get(&id).map(|items| CartView {
                id,
                created_at: Utc::now(),
                items: items.iter().map(Self::view).collect(),
            }))
        }

        fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
            Ok(self.carts.lock().unwrap().remove(&id).is_some())
        }

        fn find_item(
            &self,
            cart_id: Uuid,
            item_id: i64,
        ) -> Result<Option<CartItemView>, DomainError> {
            let carts = self.carts.lock().unwrap();
            Ok(carts
                .get(&cart_id)
                .and_then(|items| items.iter().find(|i| i.id == item_id))
                .map(Self::view))
        }

        fn add_item(
            &self,
            cart_id: Uuid,
            product_id: i64,
            quantity: Quantity,
        ) -> Result<CartItemView, DomainError> {
            let mut carts = self.carts.lock().unwrap();
            let items = carts.get_mut(&cart_id).ok_or(DomainError::NotFound("Cart"))?;
            let existing = items.iter().find(|i| i.product_id == product_id);
            match resolve_add(existing, quantity)? {
                CartItemUpsert::Increment { item_id, quantity } => {
                    let item = items.iter_mut().find(|i| i.id == item_id).unwrap();
                    item.quantity = quantity;
                    Ok(Self::view(item))
                }
                CartItemUpsert::Insert { quantity } => {
                    let mut next = self.next_id.lock().unwrap();
                    *next += 1;
                    let item = CartItem {
                        id: *next,
                        cart_id,
                        product_id,
                        quantity,
                    };
                    items.push(item.clone());
                    Ok(Self::view(&item))
                }
            }
        }

        fn set_quantity(
            &self,
            cart_id: Uuid,
            item_id: i64,
            quantity: Quantity,
        ) -> Result<Option<CartItemView>, DomainError> {
            let mut carts = self.carts.lock().unwrap();
            Ok(carts
                .get_mut(&cart_id)
                .and_then(|items| items.iter_mut().find(|i| i.id == item_id))
                .map(|item| {
                    item.quantity = quantity.get();
                    Self::view(item)
                }))
        }

        fn remove_item(&self, cart_id: Uuid, item_id: i64) -> Result<bool, DomainError> {
            let mut carts = self.carts.lock().unwrap();
            let Some(items) = carts.get_mut(&cart_id) else {
                return Ok(false);
            };
            let before = items.len();
            items.retain(|i| i.id != item_id);
            Ok(items.len() != before)
        }
    }

    fn service() -> CartService<FakeCarts, FakeCatalog> {
        CartService::new(FakeCarts::default(), FakeCatalog(HashSet::from([1, 2])))
    }

    #[test]
    fn first_add_creates_one_line() {
        let svc = service();
        let cart = svc.create_cart().unwrap();

        let item = svc.add_item(cart.id, 1, 2).unwrap();

        assert_eq!(item.quantity, 2);
        assert_eq!(svc.repo.rows(cart.id), 1);
    }

    #[test]
    fn repeated_add_merges_into_existing_line() {
        let svc = service();
        let cart = svc.create_cart().unwrap();

        let first = svc.add_item(cart.id, 1, 2).unwrap();
        let second = svc.add_item(cart.id, 1, 3).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 5);
        assert_eq!(svc.repo.rows(cart.id), 1);
    }

    #[test]
    fn zero_quantity_add_is_rejected_and_cart_unchanged() {
        let svc = service();
        let cart = svc.create_cart().unwrap();
        svc.add_item(cart.id, 1, 1).unwrap();

        let err = svc.add_item(cart.id, 2, 0).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        let items = svc.list_items(cart.id).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn unknown_product_is_a_validation_error() {
        let svc = service();
        let cart = svc.create_cart().unwrap();

        let err = svc.add_item(cart.id, 99, 1).unwrap_err();

        match err {
            DomainError::Validation(msg) => assert_eq!(msg, UNKNOWN_PRODUCT),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn add_to_unknown_cart_is_not_found() {
        let svc = service();
        let err = svc.add_item(Uuid::new_v4(), 1, 1).unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Cart")));
    }

    #[test]
    fn set_quantity_replaces_without_aggregating() {
        let svc = service();
        let cart = svc.create_cart().unwrap();
        let item = svc.add_item(cart.id, 1, 4).unwrap();

        let updated = svc.set_quantity(cart.id, item.id, 1).unwrap();

        assert_eq!(updated.quantity, 1);
    }

    #[test]
    fn set_quantity_below_minimum_is_rejected() {
        let svc = service();
        let cart = svc.create_cart().unwrap();
        let item = svc.add_item(cart.id, 1, 4).unwrap();

        assert!(matches!(
            svc.set_quantity(cart.id, item.id, 0),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(svc.get_item(cart.id, item.id).unwrap().quantity, 4);
    }

    #[test]
    fn remove_missing_item_is_not_found() {
        let svc = service();
        let cart = svc.create_cart().unwrap();
        assert!(matches!(
            svc.remove_item(cart.id, 42),
            Err(DomainError::NotFound("Cart item"))
        ));
    }

    #[test]
    fn deleting_cart_drops_its_items() {
        let svc = service();
        let cart = svc.create_cart().unwrap();
        svc.add_item(cart.id, 1, 1).unwrap();

        svc.delete_cart(cart.id).unwrap();

        assert!(matches!(
            svc.list_items(cart.id),
            Err(DomainError::NotFound("Cart"))
        ));
    }
}
