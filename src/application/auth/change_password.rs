use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::{AuthError, AuthService, Password};

#[derive(Debug, Deserialize)]
pub struct ChangePasswordCommand {
  pub user_id: Uuid,
  pub old_password: String,
  pub new_password: String,
}

pub struct ChangePasswordUseCase {
  auth_service: Arc<AuthService>,
}

impl ChangePasswordUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: ChangePasswordCommand) -> Result<(), AuthError> {
    let old_password = Password::new(command.old_password)?;
    let new_password = Password::new(command.new_password)?;

    self
      .auth_service
      .change_password(command.user_id, old_password, new_password)
      .await
  }
}
