//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to `userhub_db` repositories and map errors via
//! [`AppError`](crate::error::AppError).

pub mod users;
