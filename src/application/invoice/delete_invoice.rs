use std::sync::Arc;
use uuid::Uuid;

use super::get_invoice_details::InvoiceDetailsResponse;
use crate::domain::invoice::{InvoiceError, InvoiceService};

pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Soft-deletes the invoice and returns it as it stood before the
  /// delete.
  pub async fn execute(
    &self,
    user_id: Uuid,
    invoice_id: Uuid,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let (invoice, rows) = self
      .invoice_service
      .delete_invoice(user_id, invoice_id)
      .await?;

    Ok(InvoiceDetailsResponse::from_parts(invoice, rows))
  }
}
