use std::collections::HashMap;

use bigdecimal::BigDecimal;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::UNKNOWN_PRODUCT;
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderItemInput, OrderItemView, OrderView, PaymentStatus};
use crate::domain::ports::OrderRepository;
use crate::schema::{customers, order_items, orders, products};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_view(order: OrderRow, items: Vec<OrderItemRow>) -> Result<OrderView, DomainError> {
    Ok(OrderView {
        id: order.id,
        customer_id: order.customer_id,
        payment_status: order.payment_status.parse()?,
        placed_at: order.placed_at,
        items: items.into_iter().map(OrderItemView::from).collect(),
    })
}

fn load_order(conn: &mut PgConnection, id: i64) -> Result<Option<OrderView>, DomainError> {
    let order = orders::table
        .find(id)
        .select(OrderRow::as_select())
        .first(conn)
        .optional()?;

    let Some(order) = order else {
        return Ok(None);
    };

    let items = OrderItemRow::belonging_to(&order)
        .select(OrderItemRow::as_select())
        .order(order_items::id.asc())
        .load(conn)?;

    to_view(order, items).map(Some)
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, customer_id: i64, items: Vec<OrderItemInput>) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. The customer must exist.
            let known: bool =
                diesel::select(exists(customers::table.find(customer_id))).get_result(conn)?;
            if !known {
                return Err(DomainError::NotFound("Customer"));
            }

            // 2. Snapshot current unit prices.
            let ids: Vec<i64> = items.iter().map(|i| i.product_id).collect();
            let prices: HashMap<i64, BigDecimal> = products::table
                .filter(products::id.eq_any(ids))
                .select((products::id, products::unit_price))
                .load::<(i64, BigDecimal)>(conn)?
                .into_iter()
                .collect();

            // 3. Insert the order and its items.
            let order_id: i64 = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    customer_id,
                    payment_status: PaymentStatus::default().code().to_string(),
                })
                .returning(orders::id)
                .get_result(conn)?;

            let rows = items
                .iter()
                .map(|i| {
                    let unit_price = prices
                        .get(&i.product_id)
                        .cloned()
                        .ok_or_else(|| DomainError::validation(UNKNOWN_PRODUCT))?;
                    Ok(NewOrderItemRow {
                        order_id,
                        product_id: i.product_id,
                        quantity: i.quantity,
                        unit_price,
                    })
                })
                .collect::<Result<Vec<_>, DomainError>>()?;
            diesel::insert_into(order_items::table)
                .values(&rows)
                .execute(conn)?;

            Ok(order_id)
        })
    }

    fn find_by_id(&self, id: i64) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;
        load_order(&mut conn, id)
    }

    fn list(&self) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let rows = orders::table
                .select(OrderRow::as_select())
                .order((orders::placed_at.desc(), orders::id.desc()))
                .load(conn)?;

            let items = OrderItemRow::belonging_to(&rows)
                .select(OrderItemRow::as_select())
                .order(order_items::id.asc())
                .load(conn)?
                .grouped_by(&rows);

            rows.into_iter()
                .zip(items)
                .map(|(order, items)| to_view(order, items))
                .collect()
        })
    }

    fn set_payment_status(
        &self,
        id: i64,
        status: PaymentStatus,
    ) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let updated = diesel::update(orders::table.find(id))
                .set(orders::payment_status.eq(status.code()))
                .execute(conn)?;
            if updated == 0 {
                return Ok(None);
            }
            load_order(conn, id)
        })
    }
}
