pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/register        register a new user (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(users::router())
}
