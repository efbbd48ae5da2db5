use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::invoice::{
  Invoice, InvoiceStatus, errors::InvoiceError,
  ports::{InvoiceQuery, InvoiceRepository},
};

const INVOICE_COLUMNS: &str = "id, customer_id, start_date, end_date, total_sum, \
                               comment, status, created_at, updated_at, deleted_at";

#[derive(Debug, FromRow)]
struct InvoiceRecord {
  id: Uuid,
  customer_id: Uuid,
  start_date: DateTime<Utc>,
  end_date: DateTime<Utc>,
  total_sum: Decimal,
  comment: Option<String>,
  status: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<InvoiceRecord> for Invoice {
  type Error = InvoiceError;

  fn try_from(record: InvoiceRecord) -> Result<Self, Self::Error> {
    let status = InvoiceStatus::from_str(&record.status)?;

    Ok(Invoice {
      id: record.id,
      customer_id: record.customer_id,
      start_date: record.start_date,
      end_date: record.end_date,
      total_sum: record.total_sum,
      comment: record.comment,
      status,
      created_at: record.created_at,
      updated_at: record.updated_at,
      deleted_at: record.deleted_at,
    })
  }
}

pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create(&self, invoice: &Invoice) -> Result<Invoice, InvoiceError> {
    let record = sqlx::query_as::<_, InvoiceRecord>(&format!(
      r#"
            INSERT INTO invoices (
                id, customer_id, start_date, end_date, total_sum,
                comment, status, created_at, updated_at, deleted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {INVOICE_COLUMNS}
            "#,
    ))
    .bind(invoice.id)
    .bind(invoice.customer_id)
    .bind(invoice.start_date)
    .bind(invoice.end_date)
    .bind(invoice.total_sum)
    .bind(&invoice.comment)
    .bind(invoice.status.as_str())
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .bind(invoice.deleted_at)
    .fetch_one(&self.pool)
    .await?;

    record.try_into()
  }

  async fn update(&self, invoice: &Invoice) -> Result<Invoice, InvoiceError> {
    let record = sqlx::query_as::<_, InvoiceRecord>(&format!(
      r#"
            UPDATE invoices
            SET customer_id = $2, start_date = $3, end_date = $4,
                total_sum = $5, comment = $6, status = $7,
                updated_at = $8, deleted_at = $9
            WHERE id = $1
            RETURNING {INVOICE_COLUMNS}
            "#,
    ))
    .bind(invoice.id)
    .bind(invoice.customer_id)
    .bind(invoice.start_date)
    .bind(invoice.end_date)
    .bind(invoice.total_sum)
    .bind(&invoice.comment)
    .bind(invoice.status.as_str())
    .bind(invoice.updated_at)
    .bind(invoice.deleted_at)
    .fetch_one(&self.pool)
    .await?;

    record.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let record = sqlx::query_as::<_, InvoiceRecord>(&format!(
      r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE id = $1 AND deleted_at IS NULL
            "#,
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    record.map(|r| r.try_into()).transpose()
  }

  async fn count(&self, search: Option<&str>) -> Result<u64, InvoiceError> {
    let count: i64 = match search {
      Some(term) => {
        sqlx::query_scalar(
          r#"
                SELECT COUNT(*)
                FROM invoices
                WHERE deleted_at IS NULL
                  AND (comment ILIKE $1 OR status ILIKE $1)
                "#,
        )
        .bind(format!("%{}%", term))
        .fetch_one(&self.pool)
        .await?
      }
      None => {
        sqlx::query_scalar(
          r#"
                SELECT COUNT(*)
                FROM invoices
                WHERE deleted_at IS NULL
                "#,
        )
        .fetch_one(&self.pool)
        .await?
      }
    };

    Ok(count as u64)
  }

  async fn list(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, InvoiceError> {
    // ORDER BY fragment comes from an enumerated set, never from raw input
    let order_sql = query.order_by.as_sql();

    let records = match &query.search {
      Some(term) => {
        sqlx::query_as::<_, InvoiceRecord>(&format!(
          r#"
                SELECT {INVOICE_COLUMNS}
                FROM invoices
                WHERE deleted_at IS NULL
                  AND (comment ILIKE $1 OR status ILIKE $1)
                ORDER BY {order_sql}
                LIMIT $2 OFFSET $3
                "#,
        ))
        .bind(format!("%{}%", term))
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await?
      }
      None => {
        sqlx::query_as::<_, InvoiceRecord>(&format!(
          r#"
                SELECT {INVOICE_COLUMNS}
                FROM invoices
                WHERE deleted_at IS NULL
                ORDER BY {order_sql}
                LIMIT $1 OFFSET $2
                "#,
        ))
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await?
      }
    };

    records.into_iter().map(|r| r.try_into()).collect()
  }
}
