pub mod docx;
pub mod pdf;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::ports::{DocumentFormat, DocumentRenderer, InvoiceDocumentData};

/// Renders invoices to office document formats entirely in process.
pub struct OfficeDocumentRenderer;

impl OfficeDocumentRenderer {
  pub fn new() -> Self {
    Self
  }
}

impl Default for OfficeDocumentRenderer {
  fn default() -> Self {
    Self::new()
  }
}

impl DocumentRenderer for OfficeDocumentRenderer {
  fn render(
    &self,
    data: &InvoiceDocumentData,
    format: DocumentFormat,
  ) -> Result<Vec<u8>, InvoiceError> {
    match format {
      DocumentFormat::Pdf => pdf::render_pdf(data),
      DocumentFormat::Docx => docx::render_docx(data),
    }
  }
}
