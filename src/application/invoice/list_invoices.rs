use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService, InvoiceStatus, OrderBy};

#[derive(Debug, Deserialize)]
pub struct ListInvoicesCommand {
  pub page: u32,
  pub page_size: u32,
  pub search: Option<String>,
  pub order_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceSummaryDto {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub start_date: DateTime<Utc>,
  pub end_date: DateTime<Utc>,
  pub total_sum: Decimal,
  pub comment: Option<String>,
  pub status: InvoiceStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceSummaryDto {
  fn from(invoice: Invoice) -> Self {
    Self {
      id: invoice.id,
      customer_id: invoice.customer_id,
      start_date: invoice.start_date,
      end_date: invoice.end_date,
      total_sum: invoice.total_sum,
      comment: invoice.comment,
      status: invoice.status,
      created_at: invoice.created_at,
      updated_at: invoice.updated_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub items: Vec<InvoiceSummaryDto>,
  pub page: u32,
  pub page_size: u32,
  pub total_count: u64,
  pub total_pages: u32,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: ListInvoicesCommand,
  ) -> Result<ListInvoicesResponse, InvoiceError> {
    let order_by = command
      .order_by
      .as_deref()
      .map(OrderBy::from_str)
      .transpose()?;

    let page = self
      .invoice_service
      .list_invoices(command.page, command.page_size, command.search, order_by)
      .await?;

    Ok(ListInvoicesResponse {
      items: page.items.into_iter().map(InvoiceSummaryDto::from).collect(),
      page: page.page,
      page_size: page.page_size,
      total_count: page.total_count,
      total_pages: page.total_pages,
    })
  }
}
