use std::collections::HashMap;

use chrono::Utc;
use diesel::dsl::{count, exists};
use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{
    Collection, CollectionInput, Product, ProductInput, Review, ReviewInput,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::{
    CollectionRepository, ProductCatalog, ProductRepository, ReviewRepository,
};
use crate::schema::{collections, order_items, products, reviews};

use super::models::{
    CollectionFields, CollectionRow, NewReviewRow, ProductFields, ProductRow, ReviewChangeset,
    ReviewRow,
};

const UNKNOWN_COLLECTION: &str = "The collection does not exist with a given collection_id.";

// ── Products ─────────────────────────────────────────────────────────────────

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn require_collection(conn: &mut PgConnection, collection_id: i64) -> Result<(), DomainError> {
    let found: bool =
        diesel::select(exists(collections::table.find(collection_id))).get_result(conn)?;
    if found {
        Ok(())
    } else {
        Err(DomainError::validation(UNKNOWN_COLLECTION))
    }
}

fn product_fields(input: ProductInput) -> ProductFields {
    ProductFields {
        title: input.title,
        slug: input.slug,
        description: input.description,
        unit_price: input.unit_price,
        inventory: input.inventory,
        collection_id: input.collection_id,
        last_update: Utc::now(),
    }
}

impl ProductCatalog for DieselProductRepository {
    fn exists(&self, product_id: i64) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let found = diesel::select(exists(products::table.find(product_id))).get_result(&mut conn)?;
        Ok(found)
    }
}

impl ProductRepository for DieselProductRepository {
    fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = products::table
            .select(ProductRow::as_select())
            .order((products::title.asc(), products::id.asc()))
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Product::from))
    }

    fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            require_collection(conn, input.collection_id)?;
            let row = diesel::insert_into(products::table)
                .values(&product_fields(input))
                .returning(ProductRow::as_returning())
                .get_result(conn)?;
            Ok(row.into())
        })
    }

    fn update(&self, id: i64, input: ProductInput) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            require_collection(conn, input.collection_id)?;
            let row = diesel::update(products::table.find(id))
                .set(&product_fields(input))
                .returning(ProductRow::as_returning())
                .get_result(conn)
                .optional()?;
            Ok(row.map(Product::from))
        })
    }

    fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let ordered: i64 = order_items::table
                .filter(order_items::product_id.eq(id))
                .count()
                .get_result(conn)?;
            if ordered > 0 {
                return Err(DomainError::Protected(
                    "Product cannot be deleted because it is associated with an order item."
                        .to_string(),
                ));
            }
            let deleted = diesel::delete(products::table.find(id)).execute(conn)?;
            Ok(deleted > 0)
        })
    }
}

// ── Collections ──────────────────────────────────────────────────────────────

pub struct DieselCollectionRepository {
    pool: DbPool,
}

impl DieselCollectionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn products_in(conn: &mut PgConnection, collection_id: i64) -> QueryResult<i64> {
    products::table
        .filter(products::collection_id.eq(collection_id))
        .count()
        .get_result(conn)
}

impl CollectionRepository for DieselCollectionRepository {
    fn list(&self) -> Result<Vec<Collection>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let rows = collections::table
                .select(CollectionRow::as_select())
                .order(collections::id.asc())
                .load(conn)?;

            let counts: HashMap<i64, i64> = products::table
                .group_by(products::collection_id)
                .select((products::collection_id, count(products::id)))
                .load::<(i64, i64)>(conn)?
                .into_iter()
                .collect();

            Ok(rows
                .into_iter()
                .map(|r| {
                    let n = counts.get(&r.id).copied().unwrap_or(0);
                    r.into_domain(n)
                })
                .collect())
        })
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Collection>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = collections::table
                .find(id)
                .select(CollectionRow::as_select())
                .first(conn)
                .optional()?;
            let Some(row) = row else {
                return Ok(None);
            };
            let n = products_in(conn, row.id)?;
            Ok(Some(row.into_domain(n)))
        })
    }

    fn create(&self, input: CollectionInput) -> Result<Collection, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(collections::table)
            .values(&CollectionFields {
                title: input.title,
                featured_product_id: input.featured_product_id,
            })
            .returning(CollectionRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into_domain(0))
    }

    fn update(&self, id: i64, input: CollectionInput) -> Result<Option<Collection>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::update(collections::table.find(id))
                .set(&CollectionFields {
                    title: input.title,
                    featured_product_id: input.featured_product_id,
                })
                .returning(CollectionRow::as_returning())
                .get_result(conn)
                .optional()?;
            let Some(row) = row else {
                return Ok(None);
            };
            let n = products_in(conn, row.id)?;
            Ok(Some(row.into_domain(n)))
        })
    }

    fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            if products_in(conn, id)? > 0 {
                return Err(DomainError::Protected(
                    "Collection cannot be deleted because it contains one or more products."
                        .to_string(),
                ));
            }
            let deleted = diesel::delete(collections::table.find(id)).execute(conn)?;
            Ok(deleted > 0)
        })
    }
}

// ── Reviews ──────────────────────────────────────────────────────────────────

pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ReviewRepository for DieselReviewRepository {
    fn list_for_product(&self, product_id: i64) -> Result<Vec<Review>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = reviews::table
            .filter(reviews::product_id.eq(product_id))
            .select(ReviewRow::as_select())
            .order(reviews::id.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    fn find(&self, product_id: i64, id: i64) -> Result<Option<Review>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = reviews::table
            .filter(reviews::id.eq(id))
            .filter(reviews::product_id.eq(product_id))
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Review::from))
    }

    fn create(&self, product_id: i64, input: ReviewInput) -> Result<Review, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(reviews::table)
            .values(&NewReviewRow {
                product_id,
                name: input.name,
                description: input.description,
            })
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update(
        &self,
        product_id: i64,
        id: i64,
        input: ReviewInput,
    ) -> Result<Option<Review>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::update(
            reviews::table
                .filter(reviews::id.eq(id))
                .filter(reviews::product_id.eq(product_id)),
        )
        .set(&ReviewChangeset {
            name: input.name,
            description: input.description,
        })
        .returning(ReviewRow::as_returning())
        .get_result(&mut conn)
        .optional()?;
        Ok(row.map(Review::from))
    }

    fn delete(&self, product_id: i64, id: i64) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(
            reviews::table
                .filter(reviews::id.eq(id))
                .filter(reviews::product_id.eq(product_id)),
        )
        .execute(&mut conn)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::infrastructure::test_support::{seed_collection, seed_product, setup_db};

    fn product_input(collection_id: i64, title: &str) -> ProductInput {
        ProductInput {
            title: title.to_string(),
            slug: title.to_lowercase(),
            description: Some("Hand thrown stoneware.".to_string()),
            unit_price: BigDecimal::from_str("12.50").expect("valid decimal"),
            inventory: 5,
            collection_id,
        }
    }

    #[tokio::test]
    async fn products_are_listed_by_title() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Tableware");
        let repo = DieselProductRepository::new(pool);

        repo.create(product_input(collection, "Saucer")).expect("create failed");
        repo.create(product_input(collection, "Bowl")).expect("create failed");

        let titles: Vec<String> = repo
            .list()
            .expect("list failed")
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Bowl", "Saucer"]);
    }

    #[tokio::test]
    async fn create_product_in_unknown_collection_is_rejected() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let err = repo
            .create(product_input(404, "Bowl"))
            .expect_err("unknown collection must fail");
        assert!(matches!(err, DomainError::Validation(msg) if msg == UNKNOWN_COLLECTION));
    }

    #[tokio::test]
    async fn update_replaces_description_with_null() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Tableware");
        let repo = DieselProductRepository::new(pool);
        let created = repo.create(product_input(collection, "Bowl")).expect("create failed");

        let mut input = product_input(collection, "Bowl");
        input.description = None;
        let updated = repo
            .update(created.id, input)
            .expect("update failed")
            .expect("product should exist");

        assert!(updated.description.is_none());
        assert!(updated.last_update >= created.last_update);
    }

    #[tokio::test]
    async fn exists_reflects_catalog() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Tableware");
        let id = seed_product(&pool, collection, "Cup", "4.00");
        let repo = DieselProductRepository::new(pool);

        assert!(repo.exists(id).expect("exists failed"));
        assert!(!repo.exists(id + 1000).expect("exists failed"));
    }

    #[tokio::test]
    async fn collection_counts_its_products() {
        let (_container, pool) = setup_db().await;
        let full = seed_collection(&pool, "Tableware");
        let empty = seed_collection(&pool, "Linen");
        seed_product(&pool, full, "Cup", "4.00");
        seed_product(&pool, full, "Plate", "6.00");
        let repo = DieselCollectionRepository::new(pool);

        let all = repo.list().expect("list failed");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].products_count, 2);
        assert_eq!(all[1].products_count, 0);

        let one = repo
            .find_by_id(empty)
            .expect("find failed")
            .expect("collection should exist");
        assert_eq!(one.title, "Linen");
    }

    #[tokio::test]
    async fn non_empty_collection_cannot_be_deleted() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Tableware");
        seed_product(&pool, collection, "Cup", "4.00");
        let repo = DieselCollectionRepository::new(pool);

        let err = repo.delete(collection).expect_err("delete must be refused");
        assert!(matches!(err, DomainError::Protected(_)));
        assert!(repo.find_by_id(collection).expect("find failed").is_some());
    }

    #[tokio::test]
    async fn deleting_featured_product_clears_the_reference() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Tableware");
        let cup = seed_product(&pool, collection, "Cup", "4.00");
        let collections = DieselCollectionRepository::new(pool.clone());
        let products = DieselProductRepository::new(pool);

        collections
            .update(
                collection,
                CollectionInput {
                    title: "Tableware".to_string(),
                    featured_product_id: Some(cup),
                },
            )
            .expect("update failed");
        assert!(products.delete(cup).expect("delete failed"));

        let after = collections
            .find_by_id(collection)
            .expect("find failed")
            .expect("collection should exist");
        assert_eq!(after.featured_product_id, None);
    }

    #[tokio::test]
    async fn reviews_follow_their_product() {
        let (_container, pool) = setup_db().await;
        let collection = seed_collection(&pool, "Tableware");
        let cup = seed_product(&pool, collection, "Cup", "4.00");
        let reviews = DieselReviewRepository::new(pool.clone());
        let products = DieselProductRepository::new(pool);

        let review = reviews
            .create(
                cup,
                ReviewInput {
                    name: "Sam".to_string(),
                    description: "Keeps coffee warm.".to_string(),
                },
            )
            .expect("create failed");
        assert!(reviews.find(cup, review.id).expect("find failed").is_some());

        products.delete(cup).expect("delete failed");
        assert!(reviews.list_for_product(cup).expect("list failed").is_empty());
    }
}
