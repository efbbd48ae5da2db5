use async_trait::async_trait;
use uuid::Uuid;

use super::entities::User;
use super::errors::AuthError;
use super::value_objects::Email;

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, user: &User) -> Result<User, AuthError>;
  async fn update(&self, user: &User) -> Result<User, AuthError>;
  /// Lookups skip soft-deleted accounts.
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;
}

/// Verified claims extracted from a bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
  pub user_id: Uuid,
  pub email: String,
}

/// A freshly issued access token plus its lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
  pub token: String,
  pub expires_in_seconds: u64,
}

/// Issues and verifies signed bearer tokens.
pub trait TokenIssuer: Send + Sync {
  fn issue(&self, user_id: Uuid, email: &str) -> Result<IssuedToken, AuthError>;
  fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}
