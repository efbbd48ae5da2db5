use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use super::get_invoice_details::InvoiceDetailsResponse;
use crate::domain::invoice::{InvoiceError, InvoiceService, InvoiceStatus};

#[derive(Debug, Deserialize)]
pub struct ChangeInvoiceStatusCommand {
  pub user_id: Uuid,
  pub invoice_id: Uuid,
  pub status: String,
}

pub struct ChangeInvoiceStatusUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ChangeInvoiceStatusUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: ChangeInvoiceStatusCommand,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let status = InvoiceStatus::from_str(&command.status)?;

    let (invoice, rows) = self
      .invoice_service
      .change_status(command.user_id, command.invoice_id, status)
      .await?;

    Ok(InvoiceDetailsResponse::from_parts(invoice, rows))
  }
}
