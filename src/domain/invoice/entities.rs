use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{InvoiceStatus, Quantity, ServiceDescription, UnitPrice};

/// Invoice aggregate root. Rows live in a separate table and are loaded
/// alongside when a full representation is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub start_date: DateTime<Utc>,
  pub end_date: DateTime<Utc>,
  pub total_sum: Decimal,
  pub comment: Option<String>,
  pub status: InvoiceStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl Invoice {
  pub fn new(
    customer_id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    total_sum: Decimal,
    comment: Option<String>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      customer_id,
      start_date,
      end_date,
      total_sum,
      comment,
      status: InvoiceStatus::Created,
      created_at: now,
      updated_at: now,
      deleted_at: None,
    }
  }

  /// Applies a partial edit. Fields left as `None` keep their current
  /// value; `updated_at` is bumped unconditionally.
  pub fn apply_edit(&mut self, changes: InvoiceChanges) {
    if let Some(customer_id) = changes.customer_id {
      self.customer_id = customer_id;
    }
    if let Some(start_date) = changes.start_date {
      self.start_date = start_date;
    }
    if let Some(end_date) = changes.end_date {
      self.end_date = end_date;
    }
    if let Some(comment) = changes.comment {
      self.comment = Some(comment);
    }
    if let Some(status) = changes.status {
      self.status = status;
    }
    self.updated_at = Utc::now();
  }

  /// Overwrites the status. Any target status is accepted.
  pub fn change_status(&mut self, status: InvoiceStatus) {
    self.status = status;
    self.updated_at = Utc::now();
  }

  pub fn mark_deleted(&mut self) {
    let now = Utc::now();
    self.deleted_at = Some(now);
    self.updated_at = now;
  }

  pub fn is_deleted(&self) -> bool {
    self.deleted_at.is_some()
  }
}

/// Partial-update payload for an invoice.
#[derive(Debug, Clone, Default)]
pub struct InvoiceChanges {
  pub customer_id: Option<Uuid>,
  pub start_date: Option<DateTime<Utc>>,
  pub end_date: Option<DateTime<Utc>>,
  pub comment: Option<String>,
  pub status: Option<InvoiceStatus>,
}

impl InvoiceChanges {
  pub fn is_empty(&self) -> bool {
    self.customer_id.is_none()
      && self.start_date.is_none()
      && self.end_date.is_none()
      && self.comment.is_none()
      && self.status.is_none()
  }
}

/// One billed line of an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRow {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub service: ServiceDescription,
  pub quantity: Quantity,
  pub unit_price: UnitPrice,
  pub line_order: i32,
}

impl InvoiceRow {
  pub fn new(
    invoice_id: Uuid,
    service: ServiceDescription,
    quantity: Quantity,
    unit_price: UnitPrice,
    line_order: i32,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      invoice_id,
      service,
      quantity,
      unit_price,
      line_order,
    }
  }

  pub fn sum(&self) -> Decimal {
    self.unit_price.value() * self.quantity.value()
  }
}

/// Sums row line totals. The stored invoice total is always derived from
/// this, never taken from the caller.
pub fn rows_total(rows: &[InvoiceRow]) -> Decimal {
  rows.iter().map(|row| row.sum()).sum()
}

/// Billed party. Only resolved by id here; customer management lives
/// outside this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
  pub id: Uuid,
  pub name: String,
  pub email: Option<String>,
  pub street: Option<String>,
  pub city: Option<String>,
  pub postal_code: Option<String>,
  pub country: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Customer {
  /// Postal-address lines for document rendering, skipping blanks.
  pub fn address_lines(&self) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(street) = &self.street {
      lines.push(street.clone());
    }
    match (&self.postal_code, &self.city) {
      (Some(postal), Some(city)) => lines.push(format!("{} {}", postal, city)),
      (Some(postal), None) => lines.push(postal.clone()),
      (None, Some(city)) => lines.push(city.clone()),
      (None, None) => {}
    }
    if let Some(country) = &self.country {
      lines.push(country.clone());
    }
    if let Some(email) = &self.email {
      lines.push(email.clone());
    }
    lines
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn sample_invoice() -> Invoice {
    Invoice::new(
      Uuid::new_v4(),
      Utc::now(),
      Utc::now(),
      dec!(100),
      Some("March retainer".to_string()),
    )
  }

  fn row(invoice_id: Uuid, qty: Decimal, price: Decimal, order: i32) -> InvoiceRow {
    InvoiceRow::new(
      invoice_id,
      ServiceDescription::new("Consulting".to_string()).unwrap(),
      Quantity::new(qty).unwrap(),
      UnitPrice::new(price).unwrap(),
      order,
    )
  }

  #[test]
  fn test_new_invoice_starts_created() {
    let invoice = sample_invoice();
    assert_eq!(invoice.status, InvoiceStatus::Created);
    assert!(invoice.deleted_at.is_none());
  }

  #[test]
  fn test_rows_total() {
    let id = Uuid::new_v4();
    let rows = vec![row(id, dec!(2), dec!(10), 1), row(id, dec!(1), dec!(5), 2)];
    assert_eq!(rows_total(&rows), dec!(25));
  }

  #[test]
  fn test_empty_edit_only_bumps_updated_at() {
    let mut invoice = sample_invoice();
    let before = invoice.clone();
    invoice.apply_edit(InvoiceChanges::default());
    assert_eq!(invoice.customer_id, before.customer_id);
    assert_eq!(invoice.start_date, before.start_date);
    assert_eq!(invoice.end_date, before.end_date);
    assert_eq!(invoice.comment, before.comment);
    assert_eq!(invoice.status, before.status);
    assert!(invoice.updated_at >= before.updated_at);
  }

  #[test]
  fn test_partial_edit_keeps_untouched_fields() {
    let mut invoice = sample_invoice();
    let original_customer = invoice.customer_id;
    invoice.apply_edit(InvoiceChanges {
      comment: Some("Updated".to_string()),
      ..Default::default()
    });
    assert_eq!(invoice.comment.as_deref(), Some("Updated"));
    assert_eq!(invoice.customer_id, original_customer);
  }

  #[test]
  fn test_status_overwrite_is_unconditional() {
    let mut invoice = sample_invoice();
    invoice.change_status(InvoiceStatus::Paid);
    invoice.change_status(InvoiceStatus::Created);
    assert_eq!(invoice.status, InvoiceStatus::Created);
  }

  #[test]
  fn test_mark_deleted() {
    let mut invoice = sample_invoice();
    assert!(!invoice.is_deleted());
    invoice.mark_deleted();
    assert!(invoice.is_deleted());
  }

  #[test]
  fn test_customer_address_lines() {
    let customer = Customer {
      id: Uuid::new_v4(),
      name: "Acme GmbH".to_string(),
      email: Some("billing@acme.test".to_string()),
      street: Some("Hauptstrasse 1".to_string()),
      city: Some("Berlin".to_string()),
      postal_code: Some("10115".to_string()),
      country: Some("Germany".to_string()),
      created_at: Utc::now(),
      updated_at: Utc::now(),
    };
    assert_eq!(
      customer.address_lines(),
      vec![
        "Hauptstrasse 1",
        "10115 Berlin",
        "Germany",
        "billing@acme.test"
      ]
    );
  }
}
