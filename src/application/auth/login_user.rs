use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::{AuthError, AuthService, Email, Password};

#[derive(Debug, Deserialize)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginUserResponse {
  pub access_token: String,
  pub token_type: String,
  pub expires_in: u64,
  pub user_id: Uuid,
  pub email: String,
}

pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let (user, token) = self.auth_service.login(email, password).await?;

    Ok(LoginUserResponse {
      access_token: token.token,
      token_type: "Bearer".to_string(),
      expires_in: token.expires_in_seconds,
      user_id: user.id,
      email: user.email.into_inner(),
    })
  }
}
