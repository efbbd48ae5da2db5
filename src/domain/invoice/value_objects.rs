use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid service description: {0}")]
  InvalidDescription(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid unit price: {0}")]
  InvalidUnitPrice(String),
  #[error("Invalid invoice status: {0}")]
  InvalidStatus(String),
  #[error("Invalid order criteria: {0}")]
  InvalidOrderBy(String),
}

// Invoice Status
//
// Any status may overwrite any other; the lifecycle carries no transition
// table. Callers that need stricter workflows enforce them upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Created,
  Sent,
  Received,
  Paid,
  Cancelled,
  Rejected,
  Archived,
}

impl InvoiceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Created => "created",
      InvoiceStatus::Sent => "sent",
      InvoiceStatus::Received => "received",
      InvoiceStatus::Paid => "paid",
      InvoiceStatus::Cancelled => "cancelled",
      InvoiceStatus::Rejected => "rejected",
      InvoiceStatus::Archived => "archived",
    }
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "created" => Ok(InvoiceStatus::Created),
      "sent" => Ok(InvoiceStatus::Sent),
      "received" => Ok(InvoiceStatus::Received),
      "paid" => Ok(InvoiceStatus::Paid),
      "cancelled" => Ok(InvoiceStatus::Cancelled),
      "rejected" => Ok(InvoiceStatus::Rejected),
      "archived" => Ok(InvoiceStatus::Archived),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Order criteria for invoice listings - enumerated field/direction pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
  CreatedAtAsc,
  #[default]
  CreatedAtDesc,
  StartDateAsc,
  StartDateDesc,
  EndDateAsc,
  EndDateDesc,
  TotalSumAsc,
  TotalSumDesc,
}

impl OrderBy {
  /// SQL fragment for the ORDER BY clause. Values are fixed, never derived
  /// from user input.
  pub fn as_sql(&self) -> &'static str {
    match self {
      OrderBy::CreatedAtAsc => "created_at ASC",
      OrderBy::CreatedAtDesc => "created_at DESC",
      OrderBy::StartDateAsc => "start_date ASC",
      OrderBy::StartDateDesc => "start_date DESC",
      OrderBy::EndDateAsc => "end_date ASC",
      OrderBy::EndDateDesc => "end_date DESC",
      OrderBy::TotalSumAsc => "total_sum ASC",
      OrderBy::TotalSumDesc => "total_sum DESC",
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      OrderBy::CreatedAtAsc => "created_at_asc",
      OrderBy::CreatedAtDesc => "created_at_desc",
      OrderBy::StartDateAsc => "start_date_asc",
      OrderBy::StartDateDesc => "start_date_desc",
      OrderBy::EndDateAsc => "end_date_asc",
      OrderBy::EndDateDesc => "end_date_desc",
      OrderBy::TotalSumAsc => "total_sum_asc",
      OrderBy::TotalSumDesc => "total_sum_desc",
    }
  }
}

impl FromStr for OrderBy {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "created_at_asc" => Ok(OrderBy::CreatedAtAsc),
      "created_at_desc" => Ok(OrderBy::CreatedAtDesc),
      "start_date_asc" => Ok(OrderBy::StartDateAsc),
      "start_date_desc" => Ok(OrderBy::StartDateDesc),
      "end_date_asc" => Ok(OrderBy::EndDateAsc),
      "end_date_desc" => Ok(OrderBy::EndDateDesc),
      "total_sum_asc" => Ok(OrderBy::TotalSumAsc),
      "total_sum_desc" => Ok(OrderBy::TotalSumDesc),
      _ => Err(ValueObjectError::InvalidOrderBy(format!(
        "Unknown order criteria: {}",
        s
      ))),
    }
  }
}

// Service Description - what a row bills for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescription(String);

impl ServiceDescription {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidDescription(
        "Service description cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 500 {
      return Err(ValueObjectError::InvalidDescription(
        "Service description cannot exceed 500 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(Decimal);

impl Quantity {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value <= Decimal::ZERO {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity must be positive".to_string(),
      ));
    }
    if value.scale() > 4 {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity cannot have more than 4 decimal places".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Unit Price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPrice(Decimal);

impl UnitPrice {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() {
      return Err(ValueObjectError::InvalidUnitPrice(
        "Unit price cannot be negative".to_string(),
      ));
    }
    if value.scale() > 4 {
      return Err(ValueObjectError::InvalidUnitPrice(
        "Unit price cannot have more than 4 decimal places".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Page - one slice of a paginated listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub page: u32,
  pub page_size: u32,
  pub total_count: u64,
  pub total_pages: u32,
}

impl<T> Page<T> {
  pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u64) -> Self {
    let total_pages = if page_size == 0 {
      0
    } else {
      total_count.div_ceil(page_size as u64) as u32
    };
    Self {
      items,
      page,
      page_size,
      total_count,
      total_pages,
    }
  }

  pub fn empty(page: u32, page_size: u32, total_count: u64) -> Self {
    Self::new(Vec::new(), page, page_size, total_count)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_invoice_status_round_trip() {
    for status in [
      InvoiceStatus::Created,
      InvoiceStatus::Sent,
      InvoiceStatus::Received,
      InvoiceStatus::Paid,
      InvoiceStatus::Cancelled,
      InvoiceStatus::Rejected,
      InvoiceStatus::Archived,
    ] {
      assert_eq!(InvoiceStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert!(InvoiceStatus::from_str("draft").is_err());
  }

  #[test]
  fn test_invoice_status_parse_is_case_insensitive() {
    assert_eq!(
      InvoiceStatus::from_str("PAID").unwrap(),
      InvoiceStatus::Paid
    );
  }

  #[test]
  fn test_order_by_parsing() {
    assert_eq!(
      OrderBy::from_str("total_sum_desc").unwrap(),
      OrderBy::TotalSumDesc
    );
    assert_eq!(OrderBy::default(), OrderBy::CreatedAtDesc);
    assert!(OrderBy::from_str("comment_asc").is_err());
  }

  #[test]
  fn test_order_by_sql_fragments() {
    assert_eq!(OrderBy::CreatedAtDesc.as_sql(), "created_at DESC");
    assert_eq!(OrderBy::StartDateAsc.as_sql(), "start_date ASC");
  }

  #[test]
  fn test_service_description() {
    assert!(ServiceDescription::new("Consulting".to_string()).is_ok());
    assert!(ServiceDescription::new("   ".to_string()).is_err());
    assert!(ServiceDescription::new("x".repeat(501)).is_err());
    assert_eq!(
      ServiceDescription::new("  Hosting  ".to_string())
        .unwrap()
        .value(),
      "Hosting"
    );
  }

  #[test]
  fn test_quantity() {
    assert!(Quantity::new(dec!(1)).is_ok());
    assert!(Quantity::new(dec!(0.5)).is_ok());
    assert!(Quantity::new(dec!(0)).is_err());
    assert!(Quantity::new(dec!(-2)).is_err());
    assert!(Quantity::new(dec!(1.12345)).is_err());
  }

  #[test]
  fn test_unit_price() {
    assert!(UnitPrice::new(dec!(0)).is_ok());
    assert!(UnitPrice::new(dec!(99.99)).is_ok());
    assert!(UnitPrice::new(dec!(-0.01)).is_err());
  }

  #[test]
  fn test_page_totals() {
    let page = Page::new(vec![1, 2, 3], 1, 3, 7);
    assert_eq!(page.total_pages, 3);

    let page: Page<i32> = Page::empty(4, 10, 0);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
  }
}
