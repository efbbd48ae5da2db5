use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::entities::{Customer, Invoice, InvoiceRow};
use super::errors::InvoiceError;
use super::value_objects::{InvoiceStatus, OrderBy};

/// Listing parameters after normalization. `limit`/`offset` are already
/// derived from the requested page.
#[derive(Debug, Clone)]
pub struct InvoiceQuery {
  pub search: Option<String>,
  pub order_by: OrderBy,
  pub limit: i64,
  pub offset: i64,
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  async fn create(&self, invoice: &Invoice) -> Result<Invoice, InvoiceError>;
  async fn update(&self, invoice: &Invoice) -> Result<Invoice, InvoiceError>;
  /// Looks up a live invoice. Soft-deleted records are treated as absent.
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError>;
  async fn count(&self, search: Option<&str>) -> Result<u64, InvoiceError>;
  async fn list(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, InvoiceError>;
}

#[async_trait]
pub trait InvoiceRowRepository: Send + Sync {
  async fn create_many(&self, rows: &[InvoiceRow]) -> Result<Vec<InvoiceRow>, InvoiceError>;
  async fn find_by_invoice_id(&self, invoice_id: Uuid) -> Result<Vec<InvoiceRow>, InvoiceError>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, InvoiceError>;
}

/// Output formats a stored invoice can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
  Pdf,
  Docx,
}

impl DocumentFormat {
  pub fn content_type(&self) -> &'static str {
    match self {
      DocumentFormat::Pdf => "application/pdf",
      DocumentFormat::Docx => {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
      }
    }
  }

  pub fn file_name(&self) -> &'static str {
    match self {
      DocumentFormat::Pdf => "invoice.pdf",
      DocumentFormat::Docx => "invoice.docx",
    }
  }
}

/// Name plus free-form address lines for one party on the document.
#[derive(Debug, Clone)]
pub struct PartyBlock {
  pub name: String,
  pub lines: Vec<String>,
}

/// One row of the rendered table, with the line sum precomputed.
#[derive(Debug, Clone)]
pub struct DocumentRow {
  pub service: String,
  pub unit_price: Decimal,
  pub quantity: Decimal,
  pub sum: Decimal,
}

/// Everything a renderer needs; assembled by the service so renderers stay
/// pure functions over this value.
#[derive(Debug, Clone)]
pub struct InvoiceDocumentData {
  pub number: Uuid,
  pub issued_at: DateTime<Utc>,
  pub start_date: DateTime<Utc>,
  pub end_date: DateTime<Utc>,
  pub status: InvoiceStatus,
  pub seller: PartyBlock,
  pub customer: PartyBlock,
  pub rows: Vec<DocumentRow>,
  pub total_sum: Decimal,
  pub comment: Option<String>,
}

pub trait DocumentRenderer: Send + Sync {
  fn render(
    &self,
    data: &InvoiceDocumentData,
    format: DocumentFormat,
  ) -> Result<Vec<u8>, InvoiceError>;
}
