use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::{AuthError, AuthService, Password};

#[derive(Debug, Deserialize)]
pub struct DeleteUserCommand {
  pub user_id: Uuid,
  pub password: String,
}

pub struct DeleteUserUseCase {
  auth_service: Arc<AuthService>,
}

impl DeleteUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: DeleteUserCommand) -> Result<(), AuthError> {
    let password = Password::new(command.password)?;
    self
      .auth_service
      .delete_account(command.user_id, password)
      .await
  }
}
