use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::customer::{Customer, CustomerInput};
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;
use crate::schema::{customers, orders};

use super::models::{CustomerFields, CustomerRow};

pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<CustomerInput> for CustomerFields {
    fn from(input: CustomerInput) -> Self {
        CustomerFields {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            birth_date: input.birth_date,
            membership: input.membership.code().to_string(),
        }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn list(&self) -> Result<Vec<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        customers::table
            .select(CustomerRow::as_select())
            .order((customers::first_name.asc(), customers::last_name.asc()))
            .load(&mut conn)?
            .into_iter()
            .map(Customer::try_from)
            .collect()
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Customer::try_from)
            .transpose()
    }

    fn create(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;
        diesel::insert_into(customers::table)
            .values(&CustomerFields::from(input))
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)?
            .try_into()
    }

    fn update(&self, id: i64, input: CustomerInput) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        diesel::update(customers::table.find(id))
            .set(&CustomerFields::from(input))
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .optional()?
            .map(Customer::try_from)
            .transpose()
    }

    fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let placed: i64 = orders::table
                .filter(orders::customer_id.eq(id))
                .count()
                .get_result(conn)?;
            if placed > 0 {
                return Err(DomainError::Protected(
                    "Customer cannot be deleted because they have placed orders.".to_string(),
                ));
            }
            let deleted = diesel::delete(customers::table.find(id)).execute(conn)?;
            Ok(deleted > 0)
        })
    }
}
