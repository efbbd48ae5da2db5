use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::invoice::{
  InvoiceRow, Quantity, ServiceDescription, UnitPrice, errors::InvoiceError,
  ports::InvoiceRowRepository,
};

#[derive(Debug, FromRow)]
struct InvoiceRowRecord {
  id: Uuid,
  invoice_id: Uuid,
  service: String,
  quantity: Decimal,
  unit_price: Decimal,
  line_order: i32,
}

impl TryFrom<InvoiceRowRecord> for InvoiceRow {
  type Error = InvoiceError;

  fn try_from(record: InvoiceRowRecord) -> Result<Self, Self::Error> {
    Ok(InvoiceRow {
      id: record.id,
      invoice_id: record.invoice_id,
      service: ServiceDescription::new(record.service)?,
      quantity: Quantity::new(record.quantity)?,
      unit_price: UnitPrice::new(record.unit_price)?,
      line_order: record.line_order,
    })
  }
}

pub struct PostgresInvoiceRowRepository {
  pool: PgPool,
}

impl PostgresInvoiceRowRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRowRepository for PostgresInvoiceRowRepository {
  async fn create_many(&self, rows: &[InvoiceRow]) -> Result<Vec<InvoiceRow>, InvoiceError> {
    let mut created = Vec::with_capacity(rows.len());

    for row in rows {
      let record = sqlx::query_as::<_, InvoiceRowRecord>(
        r#"
            INSERT INTO invoice_rows (id, invoice_id, service, quantity, unit_price, line_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, invoice_id, service, quantity, unit_price, line_order
            "#,
      )
      .bind(row.id)
      .bind(row.invoice_id)
      .bind(row.service.value())
      .bind(row.quantity.value())
      .bind(row.unit_price.value())
      .bind(row.line_order)
      .fetch_one(&self.pool)
      .await?;

      created.push(record.try_into()?);
    }

    Ok(created)
  }

  async fn find_by_invoice_id(&self, invoice_id: Uuid) -> Result<Vec<InvoiceRow>, InvoiceError> {
    let records = sqlx::query_as::<_, InvoiceRowRecord>(
      r#"
            SELECT id, invoice_id, service, quantity, unit_price, line_order
            FROM invoice_rows
            WHERE invoice_id = $1
            ORDER BY line_order ASC
            "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    records.into_iter().map(|r| r.try_into()).collect()
  }
}
