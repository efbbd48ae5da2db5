use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{
      ChangePasswordRequest, DeleteAccountRequest, EditUserRequest, LoginRequest, RegisterRequest,
    },
    errors::ApiError,
    middleware::AuthUser,
  },
  application::auth::{
    ChangePasswordCommand, ChangePasswordUseCase, DeleteUserCommand, DeleteUserUseCase,
    EditUserCommand, EditUserUseCase, GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase,
    RegisterUserCommand, RegisterUserUseCase,
  },
};

/// Register new account
/// POST /api/auth/register
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let response = use_case
    .execute(RegisterUserCommand {
      name: request.name,
      email: request.email,
      password: request.password,
      address: request.address,
      phone_number: request.phone_number,
    })
    .await?;

  Ok(HttpResponse::Created().json(response))
}

/// Log in, returning a bearer token
/// POST /api/auth/login
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let response = use_case
    .execute(LoginUserCommand {
      email: request.email,
      password: request.password,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Current account profile
/// GET /api/auth/me
pub async fn get_me_handler(
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();
  let response = use_case.execute(user.id).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Partially edit profile
/// PUT /api/auth/me
pub async fn edit_me_handler(
  request: web::Json<EditUserRequest>,
  use_case: web::Data<Arc<EditUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let user = http_req.authenticated_user();
  let request = request.into_inner();

  let response = use_case
    .execute(EditUserCommand {
      user_id: user.id,
      name: request.name,
      address: request.address,
      phone_number: request.phone_number,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Change password
/// PUT /api/auth/me/password
pub async fn change_password_handler(
  request: web::Json<ChangePasswordRequest>,
  use_case: web::Data<Arc<ChangePasswordUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let user = http_req.authenticated_user();
  let request = request.into_inner();

  use_case
    .execute(ChangePasswordCommand {
      user_id: user.id,
      old_password: request.old_password,
      new_password: request.new_password,
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}

/// Soft-delete account (password confirmation required)
/// DELETE /api/auth/me
pub async fn delete_me_handler(
  request: web::Json<DeleteAccountRequest>,
  use_case: web::Data<Arc<DeleteUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let user = http_req.authenticated_user();

  use_case
    .execute(DeleteUserCommand {
      user_id: user.id,
      password: request.password.clone(),
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}
