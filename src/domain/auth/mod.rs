pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::User;
pub use errors::{AuthError, RepositoryError};
pub use ports::{IssuedToken, TokenClaims, TokenIssuer, UserRepository};
pub use services::AuthService;
pub use value_objects::{Email, Password, PasswordHash};
