use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::UserRepository;
use crate::domain::invoice::{DocumentFormat, InvoiceError, InvoiceService, PartyBlock};

#[derive(Debug)]
pub struct ExportInvoiceCommand {
  pub user_id: Uuid,
  pub invoice_id: Uuid,
  pub format: DocumentFormat,
}

/// Rendered document bytes plus the HTTP metadata to serve them with.
pub struct ExportInvoiceResponse {
  pub bytes: Vec<u8>,
  pub content_type: &'static str,
  pub file_name: &'static str,
}

pub struct ExportInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  user_repo: Arc<dyn UserRepository>,
}

impl ExportInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, user_repo: Arc<dyn UserRepository>) -> Self {
    Self {
      invoice_service,
      user_repo,
    }
  }

  /// The requester's profile becomes the seller block on the document.
  pub async fn execute(
    &self,
    command: ExportInvoiceCommand,
  ) -> Result<ExportInvoiceResponse, InvoiceError> {
    let user = self
      .user_repo
      .find_by_id(command.user_id)
      .await
      .map_err(|e| InvoiceError::Internal(e.to_string()))?
      .ok_or_else(|| InvoiceError::Internal("Requesting user not found".to_string()))?;

    let seller = PartyBlock {
      name: user.name.clone(),
      lines: user.contact_lines(),
    };

    let bytes = self
      .invoice_service
      .render_document(command.user_id, command.invoice_id, command.format, seller)
      .await?;

    Ok(ExportInvoiceResponse {
      bytes,
      content_type: command.format.content_type(),
      file_name: command.format.file_name(),
    })
  }
}
