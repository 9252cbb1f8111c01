use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::{
    resolve_add, Cart, CartItem, CartItemUpsert, CartItemView, CartView, Quantity,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::{cart_items, carts, products};

use super::models::{CartItemRow, CartRow, NewCartItemRow, NewCartRow, ProductSummaryRow};

pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn load_items(
    conn: &mut PgConnection,
    cart_id: Uuid,
    item_id: Option<i64>,
) -> QueryResult<Vec<CartItemView>> {
    let mut query = cart_items::table
        .inner_join(products::table)
        .filter(cart_items::cart_id.eq(cart_id))
        .order(cart_items::id.asc())
        .select((CartItemRow::as_select(), ProductSummaryRow::as_select()))
        .into_boxed();
    if let Some(item_id) = item_id {
        query = query.filter(cart_items::id.eq(item_id));
    }
    let rows: Vec<(CartItemRow, ProductSummaryRow)> = query.load(conn)?;
    Ok(rows
        .into_iter()
        .map(|(item, product)| item.with_product(product))
        .collect())
}

fn load_item(
    conn: &mut PgConnection,
    cart_id: Uuid,
    item_id: i64,
) -> QueryResult<Option<CartItemView>> {
    Ok(load_items(conn, cart_id, Some(item_id))?.into_iter().next())
}

impl CartRepository for DieselCartRepository {
    fn create(&self) -> Result<Cart, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(carts::table)
            .values(&NewCartRow { id: Uuid::new_v4() })
            .returning(CartRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<CartView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let cart = carts::table
                .find(id)
                .select(CartRow::as_select())
                .first(conn)
                .optional()?;

            let Some(cart) = cart else {
                return Ok(None);
            };

            Ok(Some(CartView {
                id: cart.id,
                created_at: cart.created_at,
                items: load_items(conn, cart.id, None)?,
            }))
        })
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        // cart_items rows go with it via ON DELETE CASCADE.
        let deleted = diesel::delete(carts::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn find_item(&self, cart_id: Uuid, item_id: i64) -> Result<Option<CartItemView>, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(load_item(&mut conn, cart_id, item_id)?)
    }

    fn add_item(
        &self,
        cart_id: Uuid,
        product_id: i64,
        quantity: Quantity,
    ) -> Result<CartItemView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Lock the parent cart so concurrent adds to it run one at a time.
            carts::table
                .find(cart_id)
                .select(carts::id)
                .for_update()
                .get_result::<Uuid>(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Cart"))?;

            // 2. Look for an existing line for this product.
            let existing: Option<CartItem> = cart_items::table
                .filter(cart_items::cart_id.eq(cart_id))
                .filter(cart_items::product_id.eq(product_id))
                .select(CartItemRow::as_select())
                .first(conn)
                .optional()?
                .map(CartItem::from);

            // 3. Merge or insert.
            let item_id = match resolve_add(existing.as_ref(), quantity)? {
                CartItemUpsert::Increment { item_id, quantity } => {
                    diesel::update(cart_items::table.find(item_id))
                        .set(cart_items::quantity.eq(quantity))
                        .returning(cart_items::id)
                        .get_result::<i64>(conn)?
                }
                CartItemUpsert::Insert { quantity } => diesel::insert_into(cart_items::table)
                    .values(&NewCartItemRow {
                        cart_id,
                        product_id,
                        quantity,
                    })
                    .returning(cart_items::id)
                    .get_result::<i64>(conn)?,
            };

            load_item(conn, cart_id, item_id)?.ok_or_else(|| {
                DomainError::Internal(format!("cart item {} vanished after write", item_id))
            })
        })
    }

    fn set_quantity(
        &self,
        cart_id: Uuid,
        item_id: i64,
        quantity: Quantity,
    ) -> Result<Option<CartItemView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let updated = diesel::update(
                cart_items::table
                    .filter(cart_items::id.eq(item_id))
                    .filter(cart_items::cart_id.eq(cart_id)),
            )
            .set(cart_items::quantity.eq(quantity.get()))
            .execute(conn)?;

            if updated == 0 {
                return Ok(None);
            }
            Ok(load_item(conn, cart_id, item_id)?)
        })
    }

    fn remove_item(&self, cart_id: Uuid, item_id: i64) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(
            cart_items::table
                .filter(cart_items::id.eq(item_id))
                .filter(cart_items::cart_id.eq(cart_id)),
        )
        .execute(&mut conn)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use diesel::prelude::*;
    use uuid::Uuid;

    use super::DieselCartRepository;
    use crate::domain::cart::Quantity;
    use crate::domain::errors::DomainError;
    use crate::domain::ports::CartRepository;
    use crate::infrastructure::test_support::{seed_collection, seed_product, setup_db};
    use crate::schema::cart_items;

    fn qty(n: i32) -> Quantity {
        Quantity::new(n).expect("valid quantity")
    }

    #[tokio::test]
    async fn add_then_add_again_merges_into_one_row() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Kitchen");
        let product = seed_product(&pool, collection, "Kettle", "24.00");
        let repo = DieselCartRepository::new(pool.clone());
        let cart = repo.create().expect("create cart failed");

        let first = repo.add_item(cart.id, product, qty(2)).expect("add failed");
        let second = repo.add_item(cart.id, product, qty(3)).expect("add failed");

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 5);

        let mut conn = pool.get().expect("Failed to get connection");
        let rows: i64 = cart_items::table
            .filter(cart_items::cart_id.eq(cart.id))
            .count()
            .get_result(&mut conn)
            .expect("count failed");
        assert_eq!(rows, 1, "no duplicate line for the same product");
    }

    #[tokio::test]
    async fn concurrent_adds_of_one_product_serialise_on_the_cart() {
        const WRITERS: usize = 8;
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Kitchen");
        let product = seed_product(&pool, collection, "Kettle", "24.00");
        let repo = Arc::new(DieselCartRepository::new(pool.clone()));
        let cart = repo.create().expect("create cart failed");
        let start = Arc::new(Barrier::new(WRITERS));

        let handles: Vec<_> = (0..WRITERS)
            .map(|_| {
                let repo = Arc::clone(&repo);
                let start = Arc::clone(&start);
                thread::spawn(move || {
                    start.wait();
                    repo.add_item(cart.id, product, qty(1))
                })
            })
            .collect();
        for handle in handles {
            handle
                .join()
                .expect("writer thread panicked")
                .expect("add failed");
        }

        let mut conn = pool.get().expect("Failed to get connection");
        let quantities: Vec<i32> = cart_items::table
            .filter(cart_items::cart_id.eq(cart.id))
            .select(cart_items::quantity)
            .load(&mut conn)
            .expect("load failed");
        assert_eq!(quantities, vec![WRITERS as i32]);
    }

    #[tokio::test]
    async fn cart_view_reports_line_and_cart_totals() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Kitchen");
        let kettle = seed_product(&pool, collection, "Kettle", "24.00");
        let mug = seed_product(&pool, collection, "Mug", "3.50");
        let repo = DieselCartRepository::new(pool);
        let cart = repo.create().expect("create cart failed");

        repo.add_item(cart.id, kettle, qty(1)).expect("add failed");
        repo.add_item(cart.id, mug, qty(4)).expect("add failed");

        let view = repo
            .find_by_id(cart.id)
            .expect("find failed")
            .expect("cart should exist");
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[1].product.title, "Mug");
        assert_eq!(view.items[1].total_price().to_string(), "14.00");
        assert_eq!(view.total_price().to_string(), "38.00");
    }

    #[tokio::test]
    async fn add_to_missing_cart_is_not_found() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Kitchen");
        let product = seed_product(&pool, collection, "Kettle", "24.00");
        let repo = DieselCartRepository::new(pool);

        let err = repo
            .add_item(Uuid::new_v4(), product, qty(1))
            .expect_err("unknown cart must fail");
        assert!(matches!(err, DomainError::NotFound("Cart")));
    }

    #[tokio::test]
    async fn set_quantity_replaces_value() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Kitchen");
        let product = seed_product(&pool, collection, "Kettle", "24.00");
        let repo = DieselCartRepository::new(pool);
        let cart = repo.create().expect("create cart failed");
        let item = repo.add_item(cart.id, product, qty(6)).expect("add failed");

        let updated = repo
            .set_quantity(cart.id, item.id, qty(2))
            .expect("update failed")
            .expect("item should exist");
        assert_eq!(updated.quantity, 2);

        let other_cart = repo.create().expect("create cart failed");
        let missing = repo
            .set_quantity(other_cart.id, item.id, qty(2))
            .expect("update failed");
        assert!(missing.is_none(), "items are addressed through their own cart");
    }

    #[tokio::test]
    async fn deleting_cart_cascades_to_items() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Kitchen");
        let product = seed_product(&pool, collection, "Kettle", "24.00");
        let repo = DieselCartRepository::new(pool.clone());
        let cart = repo.create().expect("create cart failed");
        repo.add_item(cart.id, product, qty(1)).expect("add failed");

        assert!(repo.delete(cart.id).expect("delete failed"));
        assert!(repo.find_by_id(cart.id).expect("find failed").is_none());

        let mut conn = pool.get().expect("Failed to get connection");
        let rows: i64 = cart_items::table
            .filter(cart_items::cart_id.eq(cart.id))
            .count()
            .get_result(&mut conn)
            .expect("count failed");
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn remove_item_reports_whether_anything_was_deleted() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Kitchen");
        let product = seed_product(&pool, collection, "Kettle", "24.00");
        let repo = DieselCartRepository::new(pool);
        let cart = repo.create().expect("create cart failed");
        let item = repo.add_item(cart.id, product, qty(1)).expect("add failed");

        assert!(repo.remove_item(cart.id, item.id).expect("remove failed"));
        assert!(!repo.remove_item(cart.id, item.id).expect("remove failed"));
    }
}
