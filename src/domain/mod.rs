pub mod auth;
pub mod invoice;
