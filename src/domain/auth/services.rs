use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::entities::User;
use super::errors::AuthError;
use super::ports::{IssuedToken, TokenIssuer, UserRepository};
use super::value_objects::{Email, Password};

/// Account lifecycle: registration, login with token issuance, profile
/// and password maintenance, soft deletion.
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
  pub fn new(user_repo: Arc<dyn UserRepository>, token_issuer: Arc<dyn TokenIssuer>) -> Self {
    Self {
      user_repo,
      token_issuer,
    }
  }

  pub async fn register(
    &self,
    name: String,
    email: Email,
    password: Password,
    address: Option<String>,
    phone_number: Option<String>,
  ) -> Result<User, AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = password.hash()?;
    let user = User::new(name, email, password_hash, address, phone_number);
    let user = self.user_repo.create(&user).await?;

    info!(user_id = %user.id, "User registered");
    Ok(user)
  }

  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(User, IssuedToken), AuthError> {
    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    if !user.password_hash.verify(&password)? {
      return Err(AuthError::InvalidCredentials);
    }

    let token = self.token_issuer.issue(user.id, user.email.as_str())?;
    info!(user_id = %user.id, "User logged in");
    Ok((user, token))
  }

  pub async fn current_user(&self, user_id: Uuid) -> Result<User, AuthError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  pub async fn edit_profile(
    &self,
    user_id: Uuid,
    name: Option<String>,
    address: Option<String>,
    phone_number: Option<String>,
  ) -> Result<User, AuthError> {
    let mut user = self.current_user(user_id).await?;
    user.update_profile(name, address, phone_number);
    let user = self.user_repo.update(&user).await?;

    info!(user_id = %user.id, "User profile updated");
    Ok(user)
  }

  pub async fn change_password(
    &self,
    user_id: Uuid,
    old_password: Password,
    new_password: Password,
  ) -> Result<(), AuthError> {
    let mut user = self.current_user(user_id).await?;

    if !user.password_hash.verify(&old_password)? {
      return Err(AuthError::InvalidCredentials);
    }

    user.update_password(new_password.hash()?);
    self.user_repo.update(&user).await?;

    info!(user_id = %user_id, "User password changed");
    Ok(())
  }

  /// Soft-deletes the account. Requires the current password as
  /// confirmation.
  pub async fn delete_account(
    &self,
    user_id: Uuid,
    password_confirmation: Password,
  ) -> Result<(), AuthError> {
    let mut user = self.current_user(user_id).await?;

    if !user.password_hash.verify(&password_confirmation)? {
      return Err(AuthError::InvalidCredentials);
    }

    user.mark_deleted();
    self.user_repo.update(&user).await?;

    info!(user_id = %user_id, "User account deleted");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use std::sync::Mutex;

  struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
  }

  impl InMemoryUserRepo {
    fn new() -> Self {
      Self {
        users: Mutex::new(Vec::new()),
      }
    }
  }

  #[async_trait]
  impl UserRepository for InMemoryUserRepo {
    async fn create(&self, user: &User) -> Result<User, AuthError> {
      self.users.lock().unwrap().push(user.clone());
      Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, AuthError> {
      let mut users = self.users.lock().unwrap();
      match users.iter_mut().find(|u| u.id == user.id) {
        Some(stored) => {
          *stored = user.clone();
          Ok(user.clone())
        }
        None => Err(AuthError::UserNotFound),
      }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
      Ok(
        self
          .users
          .lock()
          .unwrap()
          .iter()
          .find(|u| u.id == id && !u.is_deleted())
          .cloned(),
      )
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
      Ok(
        self
          .users
          .lock()
          .unwrap()
          .iter()
          .find(|u| u.email == *email && !u.is_deleted())
          .cloned(),
      )
    }
  }

  struct StaticTokenIssuer;

  impl TokenIssuer for StaticTokenIssuer {
    fn issue(&self, _user_id: Uuid, _email: &str) -> Result<IssuedToken, AuthError> {
      Ok(IssuedToken {
        token: "token".to_string(),
        expires_in_seconds: 3600,
      })
    }

    fn verify(&self, _token: &str) -> Result<crate::domain::auth::ports::TokenClaims, AuthError> {
      Err(AuthError::InvalidToken)
    }
  }

  fn service() -> AuthService {
    AuthService::new(Arc::new(InMemoryUserRepo::new()), Arc::new(StaticTokenIssuer))
  }

  async fn register_sample(service: &AuthService) -> User {
    service
      .register(
        "Jane Doe".to_string(),
        Email::new("jane@example.com").unwrap(),
        Password::new("password123").unwrap(),
        None,
        None,
      )
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn test_register_rejects_duplicate_email() {
    let service = service();
    register_sample(&service).await;

    let result = service
      .register(
        "Other".to_string(),
        Email::new("jane@example.com").unwrap(),
        Password::new("password456").unwrap(),
        None,
        None,
      )
      .await;
    assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
  }

  #[tokio::test]
  async fn test_login_verifies_password() {
    let service = service();
    register_sample(&service).await;

    let ok = service
      .login(
        Email::new("jane@example.com").unwrap(),
        Password::new("password123").unwrap(),
      )
      .await;
    assert!(ok.is_ok());

    let bad = service
      .login(
        Email::new("jane@example.com").unwrap(),
        Password::new("wrongpassword").unwrap(),
      )
      .await;
    assert!(matches!(bad, Err(AuthError::InvalidCredentials)));
  }

  #[tokio::test]
  async fn test_change_password_requires_old_password() {
    let service = service();
    let user = register_sample(&service).await;

    let bad = service
      .change_password(
        user.id,
        Password::new("wrongpassword").unwrap(),
        Password::new("newpassword1").unwrap(),
      )
      .await;
    assert!(matches!(bad, Err(AuthError::InvalidCredentials)));

    service
      .change_password(
        user.id,
        Password::new("password123").unwrap(),
        Password::new("newpassword1").unwrap(),
      )
      .await
      .unwrap();

    let relogin = service
      .login(
        Email::new("jane@example.com").unwrap(),
        Password::new("newpassword1").unwrap(),
      )
      .await;
    assert!(relogin.is_ok());
  }

  #[tokio::test]
  async fn test_delete_account_hides_user() {
    let service = service();
    let user = register_sample(&service).await;

    service
      .delete_account(user.id, Password::new("password123").unwrap())
      .await
      .unwrap();

    let result = service.current_user(user.id).await;
    assert!(matches!(result, Err(AuthError::UserNotFound)));
  }
}
