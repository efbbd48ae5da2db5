use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Standard error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Machine-readable error code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional additional details
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
  pub name: String,

  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,

  #[validate(length(max = 500, message = "Address cannot exceed 500 characters"))]
  pub address: Option<String>,

  #[validate(length(max = 50, message = "Phone number cannot exceed 50 characters"))]
  pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditUserRequest {
  #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
  pub name: Option<String>,

  #[validate(length(max = 500, message = "Address cannot exceed 500 characters"))]
  pub address: Option<String>,

  #[validate(length(max = 50, message = "Phone number cannot exceed 50 characters"))]
  pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
  #[validate(length(min = 1, message = "Current password is required"))]
  pub old_password: String,

  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteAccountRequest {
  #[validate(length(min = 1, message = "Password confirmation is required"))]
  pub password: String,
}

// ============================================================================
// Invoice Requests
// ============================================================================

// Serialize is required by the nested validation on CreateInvoiceRequest.rows
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvoiceRowRequest {
  #[validate(length(
    min = 1,
    max = 500,
    message = "Service description must be between 1 and 500 characters"
  ))]
  pub service: String,

  pub quantity: Decimal,

  pub unit_price: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
  pub customer_id: Uuid,

  pub start_date: DateTime<Utc>,

  pub end_date: DateTime<Utc>,

  #[validate(length(max = 1000, message = "Comment cannot exceed 1000 characters"))]
  pub comment: Option<String>,

  #[validate(length(min = 1, message = "Invoice must contain at least one row"))]
  #[validate(nested)]
  pub rows: Vec<CreateInvoiceRowRequest>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditInvoiceRequest {
  pub customer_id: Option<Uuid>,

  pub start_date: Option<DateTime<Utc>>,

  pub end_date: Option<DateTime<Utc>>,

  #[validate(length(max = 1000, message = "Comment cannot exceed 1000 characters"))]
  pub comment: Option<String>,

  pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeStatusRequest {
  #[validate(length(min = 1, message = "Status is required"))]
  pub status: String,
}

fn default_page() -> u32 {
  1
}

fn default_page_size() -> u32 {
  20
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListInvoicesQuery {
  #[serde(default = "default_page")]
  pub page: u32,

  #[serde(default = "default_page_size")]
  pub page_size: u32,

  pub search: Option<String>,

  pub order_by: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn create_request(rows: Vec<CreateInvoiceRowRequest>) -> CreateInvoiceRequest {
    CreateInvoiceRequest {
      customer_id: Uuid::new_v4(),
      start_date: Utc::now(),
      end_date: Utc::now(),
      comment: None,
      rows,
    }
  }

  fn row(service: &str) -> CreateInvoiceRowRequest {
    CreateInvoiceRowRequest {
      service: service.to_string(),
      quantity: dec!(1),
      unit_price: dec!(10),
    }
  }

  #[test]
  fn test_create_invoice_request_validates_rows() {
    assert!(create_request(vec![row("Consulting")]).validate().is_ok());
    assert!(create_request(vec![]).validate().is_err());
  }

  #[test]
  fn test_create_invoice_request_validates_nested_row_fields() {
    let too_long = "x".repeat(501);
    assert!(create_request(vec![row(&too_long)]).validate().is_err());
    assert!(create_request(vec![row("")]).validate().is_err());
  }
}
