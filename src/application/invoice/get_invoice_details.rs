use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceRow, InvoiceService, InvoiceStatus};

#[derive(Debug, Serialize)]
pub struct InvoiceRowDto {
  pub id: Uuid,
  pub service: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub sum: Decimal,
  pub line_order: i32,
}

impl From<&InvoiceRow> for InvoiceRowDto {
  fn from(row: &InvoiceRow) -> Self {
    Self {
      id: row.id,
      service: row.service.value().to_string(),
      quantity: row.quantity.value(),
      unit_price: row.unit_price.value(),
      sum: row.sum(),
      line_order: row.line_order,
    }
  }
}

/// Full invoice representation shared by every use case that returns one.
#[derive(Debug, Serialize)]
pub struct InvoiceDetailsResponse {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub start_date: DateTime<Utc>,
  pub end_date: DateTime<Utc>,
  pub rows: Vec<InvoiceRowDto>,
  pub total_sum: Decimal,
  pub comment: Option<String>,
  pub status: InvoiceStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl InvoiceDetailsResponse {
  pub fn from_parts(invoice: Invoice, rows: Vec<InvoiceRow>) -> Self {
    Self {
      id: invoice.id,
      customer_id: invoice.customer_id,
      start_date: invoice.start_date,
      end_date: invoice.end_date,
      rows: rows.iter().map(InvoiceRowDto::from).collect(),
      total_sum: invoice.total_sum,
      comment: invoice.comment,
      status: invoice.status,
      created_at: invoice.created_at,
      updated_at: invoice.updated_at,
    }
  }
}

pub struct GetInvoiceDetailsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, invoice_id: Uuid) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let (invoice, rows) = self.invoice_service.get_invoice(invoice_id).await?;
    Ok(InvoiceDetailsResponse::from_parts(invoice, rows))
  }
}
