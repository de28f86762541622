use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Mount `/users` routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/users/register", post(handlers::users::register))
}
