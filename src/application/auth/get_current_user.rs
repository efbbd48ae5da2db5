use std::sync::Arc;
use uuid::Uuid;

use super::register_user::UserProfileResponse;
use crate::domain::auth::{AuthError, AuthService};

pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<UserProfileResponse, AuthError> {
    let user = self.auth_service.current_user(user_id).await?;
    Ok(UserProfileResponse::from(user))
  }
}
