//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing.

pub mod password;
