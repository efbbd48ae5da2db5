pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{AuthMiddleware, AuthUser, AuthenticatedUser, RequestIdMiddleware};
pub use routes::{
  configure_account_routes, configure_invoice_routes, configure_public_auth_routes,
};
