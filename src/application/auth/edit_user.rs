use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::register_user::UserProfileResponse;
use crate::domain::auth::{AuthError, AuthService};

/// Partial profile update; omitted fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct EditUserCommand {
  pub user_id: Uuid,
  pub name: Option<String>,
  pub address: Option<String>,
  pub phone_number: Option<String>,
}

pub struct EditUserUseCase {
  auth_service: Arc<AuthService>,
}

impl EditUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: EditUserCommand) -> Result<UserProfileResponse, AuthError> {
    let user = self
      .auth_service
      .edit_profile(
        command.user_id,
        command.name,
        command.address,
        command.phone_number,
      )
      .await?;

    Ok(UserProfileResponse::from(user))
  }
}
