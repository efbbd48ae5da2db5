use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{Email, PasswordHash};

/// Account that owns invoices and appears as the seller on exported
/// documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  pub email: Email,
  pub address: Option<String>,
  pub phone_number: Option<String>,
  pub password_hash: PasswordHash,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
  pub fn new(
    name: String,
    email: Email,
    password_hash: PasswordHash,
    address: Option<String>,
    phone_number: Option<String>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      name,
      email,
      address,
      phone_number,
      password_hash,
      created_at: now,
      updated_at: now,
      deleted_at: None,
    }
  }

  /// Partial profile update; `None` fields are left untouched.
  pub fn update_profile(
    &mut self,
    name: Option<String>,
    address: Option<String>,
    phone_number: Option<String>,
  ) {
    if let Some(name) = name {
      self.name = name;
    }
    if let Some(address) = address {
      self.address = Some(address);
    }
    if let Some(phone_number) = phone_number {
      self.phone_number = Some(phone_number);
    }
    self.updated_at = Utc::now();
  }

  pub fn update_password(&mut self, password_hash: PasswordHash) {
    self.password_hash = password_hash;
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

  /// Seller address lines for document rendering.
  pub fn contact_lines(&self) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(address) = &self.address {
      lines.push(address.clone());
    }
    lines.push(self.email.as_str().to_string());
    if let Some(phone) = &self.phone_number {
      lines.push(phone.clone());
    }
    lines
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::value_objects::Password;

  fn sample_user() -> User {
    User::new(
      "Jane Doe".to_string(),
      Email::new("jane@example.com").unwrap(),
      Password::new("password123").unwrap().hash().unwrap(),
      Some("Main Street 5".to_string()),
      Some("+49 30 1234".to_string()),
    )
  }

  #[test]
  fn test_update_profile_is_partial() {
    let mut user = sample_user();
    user.update_profile(Some("Jane Smith".to_string()), None, None);
    assert_eq!(user.name, "Jane Smith");
    assert_eq!(user.address.as_deref(), Some("Main Street 5"));
  }

  #[test]
  fn test_mark_deleted() {
    let mut user = sample_user();
    assert!(!user.is_deleted());
    user.mark_deleted();
    assert!(user.is_deleted());
  }

  #[test]
  fn test_contact_lines() {
    let user = sample_user();
    assert_eq!(
      user.contact_lines(),
      vec!["Main Street 5", "jane@example.com", "+49 30 1234"]
    );
  }
}
