use uuid::Uuid;

use super::value_objects::ValueObjectError;

#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Customer not found: {0}")]
  CustomerNotFound(Uuid),

  #[error("Invoice must contain at least one row")]
  NoRows,

  #[error("Document rendering failed: {0}")]
  Render(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
