use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::{AuthError, AuthService, Email, Password, User};

#[derive(Debug, Deserialize)]
pub struct RegisterUserCommand {
  pub name: String,
  pub email: String,
  pub password: String,
  pub address: Option<String>,
  pub phone_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub address: Option<String>,
  pub phone_number: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfileResponse {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      name: user.name,
      email: user.email.into_inner(),
      address: user.address,
      phone_number: user.phone_number,
      created_at: user.created_at,
      updated_at: user.updated_at,
    }
  }
}

pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<UserProfileResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let user = self
      .auth_service
      .register(
        command.name,
        email,
        password,
        command.address,
        command.phone_number,
      )
      .await?;

    Ok(UserProfileResponse::from(user))
  }
}
