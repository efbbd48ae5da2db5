use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::invoice::{Customer, errors::InvoiceError, ports::CustomerRepository};

#[derive(Debug, FromRow)]
struct CustomerRecord {
  id: Uuid,
  name: String,
  email: Option<String>,
  street: Option<String>,
  city: Option<String>,
  postal_code: Option<String>,
  country: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<CustomerRecord> for Customer {
  fn from(record: CustomerRecord) -> Self {
    Customer {
      id: record.id,
      name: record.name,
      email: record.email,
      street: record.street,
      city: record.city,
      postal_code: record.postal_code,
      country: record.country,
      created_at: record.created_at,
      updated_at: record.updated_at,
    }
  }
}

pub struct PostgresCustomerRepository {
  pool: PgPool,
}

impl PostgresCustomerRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, InvoiceError> {
    let record = sqlx::query_as::<_, CustomerRecord>(
      r#"
            SELECT id, name, email, street, city, postal_code, country,
                   created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(record.map(Customer::from))
  }
}
