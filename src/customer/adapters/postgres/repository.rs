//! `PostgreSQL` repository implementation for customer storage.

use super::{
    models::{CustomerRow, NewCustomerRow},
    schema::customers,
};
use crate::customer::{
    domain::{
        ContactDetails, Customer, CustomerId, CustomerName, CustomerNameKey,
        PersistedCustomerData,
    },
    ports::{CustomerRepository, CustomerRepositoryError, CustomerRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by customer adapters.
pub type CustomerPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed customer repository.
///
/// Relies on the unique index over `customers.name_key`; creation is an
/// `INSERT ... ON CONFLICT DO NOTHING` followed by a lookup, so concurrent
/// sessions converge on a single row.
#[derive(Debug, Clone)]
pub struct PostgresCustomerRepository {
    pool: CustomerPgPool,
}

impl PostgresCustomerRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CustomerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CustomerRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CustomerRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CustomerRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CustomerRepositoryError::persistence)?
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_or_create(&self, candidate: &Customer) -> CustomerRepositoryResult<Customer> {
        let new_row = to_new_row(candidate);
        let key = candidate.name_key().clone();

        self.run_blocking(move |connection| {
            diesel::insert_into(customers::table)
                .values(&new_row)
                .on_conflict(customers::name_key)
                .do_nothing()
                .execute(connection)
                .map_err(CustomerRepositoryError::persistence)?;

            let row = find_row_by_key(connection, &key)?.ok_or_else(|| {
                CustomerRepositoryError::persistence(std::io::Error::other(format!(
                    "customer row for key '{key}' vanished after upsert"
                )))
            })?;
            row_to_customer(row)
        })
        .await
    }

    async fn find_by_name_key(
        &self,
        key: &CustomerNameKey,
    ) -> CustomerRepositoryResult<Option<Customer>> {
        let lookup_key = key.clone();
        self.run_blocking(move |connection| {
            find_row_by_key(connection, &lookup_key)?
                .map(row_to_customer)
                .transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: CustomerId) -> CustomerRepositoryResult<Option<Customer>> {
        self.run_blocking(move |connection| {
            let row = customers::table
                .filter(customers::id.eq(id.into_inner()))
                .select(CustomerRow::as_select())
                .first::<CustomerRow>(connection)
                .optional()
                .map_err(CustomerRepositoryError::persistence)?;
            row.map(row_to_customer).transpose()
        })
        .await
    }
}

fn find_row_by_key(
    connection: &mut PgConnection,
    key: &CustomerNameKey,
) -> CustomerRepositoryResult<Option<CustomerRow>> {
    customers::table
        .filter(customers::name_key.eq(key.as_str()))
        .select(CustomerRow::as_select())
        .first::<CustomerRow>(connection)
        .optional()
        .map_err(CustomerRepositoryError::persistence)
}

pub(super) fn to_new_row(customer: &Customer) -> NewCustomerRow {
    let contact = customer.contact();
    NewCustomerRow {
        id: customer.id().into_inner(),
        name: customer.name().as_str().to_owned(),
        name_key: customer.name_key().as_str().to_owned(),
        phone: contact.phone().map(str::to_owned),
        postal: contact.postal().map(str::to_owned),
        city: contact.city().to_owned(),
        province: contact.province().to_owned(),
        created_at: customer.created_at(),
    }
}

pub(super) fn row_to_customer(row: CustomerRow) -> CustomerRepositoryResult<Customer> {
    let CustomerRow {
        id,
        name,
        name_key: _,
        phone,
        postal,
        city,
        province,
        created_at,
    } = row;

    let name = CustomerName::new(name).map_err(CustomerRepositoryError::persistence)?;
    Ok(Customer::from_persisted(PersistedCustomerData {
        id: CustomerId::from_uuid(id),
        name,
        contact: ContactDetails::new(phone, postal, city, province),
        created_at,
    }))
}
