use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};
use uuid::Uuid;

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  domain::auth::ports::TokenIssuer,
};

/// Identity extracted from a verified bearer token and attached to the
/// request for downstream handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub id: Uuid,
  pub email: String,
}

/// Bearer token middleware
///
/// Extracts the token from the Authorization header, verifies it, and
/// attaches an [`AuthenticatedUser`] to request extensions. Requests
/// without a valid token get a 401 response.
pub struct AuthMiddleware {
  token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthMiddleware {
  pub fn new(token_issuer: Arc<dyn TokenIssuer>) -> Self {
    Self { token_issuer }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      token_issuer: self.token_issuer.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  token_issuer: Arc<dyn TokenIssuer>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let token_issuer = self.token_issuer.clone();

    Box::pin(async move {
      let token = match extract_bearer_token(&req) {
        Ok(token) => token,
        Err(e) => {
          let (request, _) = req.into_parts();
          // error_response keeps the {error, message} body shape
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      let claims = match token_issuer.verify(&token) {
        Ok(claims) => claims,
        Err(e) => {
          let (request, _) = req.into_parts();
          let api_error: ApiError = e.into();
          let response = api_error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(AuthenticatedUser {
        id: claims.user_id,
        email: claims.email,
      });

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

/// Extension trait to extract the authenticated user from a request
pub trait AuthUser {
  /// Get the authenticated user from request extensions
  ///
  /// # Panics
  ///
  /// Panics if the user is not present in extensions. Only call this in
  /// handlers behind [`AuthMiddleware`].
  fn authenticated_user(&self) -> AuthenticatedUser;
}

impl AuthUser for actix_web::HttpRequest {
  fn authenticated_user(&self) -> AuthenticatedUser {
    self
      .extensions()
      .get::<AuthenticatedUser>()
      .cloned()
      .expect("User not found in request extensions. Did you forget to add AuthMiddleware?")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::AuthError;
  use crate::domain::auth::ports::{IssuedToken, TokenClaims};
  use actix_web::test::TestRequest;
  use actix_web::test as actix_test;
  use actix_web::{App, HttpResponse, web};

  struct RejectingIssuer;

  impl TokenIssuer for RejectingIssuer {
    fn issue(&self, _user_id: Uuid, _email: &str) -> Result<IssuedToken, AuthError> {
      Err(AuthError::InvalidToken)
    }

    fn verify(&self, _token: &str) -> Result<TokenClaims, AuthError> {
      Err(AuthError::InvalidToken)
    }
  }

  #[actix_web::test]
  async fn test_unauthorized_body_has_error_and_message_fields() {
    let app = actix_test::init_service(
      App::new()
        .wrap(AuthMiddleware::new(Arc::new(RejectingIssuer)))
        .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    // Missing token
    let req = TestRequest::get().uri("/").to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_token");
    assert!(body["message"].is_string());

    // Token present but rejected by the issuer
    let req = TestRequest::get()
      .uri("/")
      .insert_header(("Authorization", "Bearer bad-token"))
      .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_token");
    assert!(body["message"].is_string());
  }

  #[test]
  fn test_extract_bearer_token_valid() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    let token = extract_bearer_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_bearer_token_missing() {
    let req = TestRequest::default().to_srv_request();

    let result = extract_bearer_token(&req);
    assert!(result.is_err());
  }

  #[test]
  fn test_extract_bearer_token_invalid_format() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
      .to_srv_request();

    let result = extract_bearer_token(&req);
    assert!(result.is_err());
  }
}
