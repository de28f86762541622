//! Shared domain types and validation for the userhub service.

pub mod error;
pub mod registration;
pub mod types;

pub use error::CoreError;
