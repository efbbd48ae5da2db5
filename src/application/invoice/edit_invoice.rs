use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use super::get_invoice_details::InvoiceDetailsResponse;
use crate::domain::invoice::{InvoiceChanges, InvoiceError, InvoiceService, InvoiceStatus};

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct EditInvoiceCommand {
  pub user_id: Uuid,
  pub invoice_id: Uuid,
  pub customer_id: Option<Uuid>,
  pub start_date: Option<DateTime<Utc>>,
  pub end_date: Option<DateTime<Utc>>,
  pub comment: Option<String>,
  pub status: Option<String>,
}

pub struct EditInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl EditInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: EditInvoiceCommand,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let status = command
      .status
      .as_deref()
      .map(InvoiceStatus::from_str)
      .transpose()?;

    let (invoice, rows) = self
      .invoice_service
      .edit_invoice(
        command.user_id,
        command.invoice_id,
        InvoiceChanges {
          customer_id: command.customer_id,
          start_date: command.start_date,
          end_date: command.end_date,
          comment: command.comment,
          status,
        },
      )
      .await?;

    Ok(InvoiceDetailsResponse::from_parts(invoice, rows))
  }
}
