pub mod config;
pub mod persistence;
pub mod rendering;
pub mod security;
