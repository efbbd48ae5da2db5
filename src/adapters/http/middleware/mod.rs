pub mod auth;
pub mod request_id;

pub use auth::{AuthMiddleware, AuthUser, AuthenticatedUser};
pub use request_id::{RequestId, RequestIdMiddleware};
