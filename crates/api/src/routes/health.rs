use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service identifier, so aggregated probes can tell services apart.
    pub service: &'static str,
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

impl HealthResponse {
    fn report(db_healthy: bool) -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health -- returns service identity and database health.
///
/// Broker reachability is intentionally not probed here: the publisher
/// reconnects on demand, and a broker outage must not take the service
/// out of rotation.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = userhub_db::health_check(&state.pool).await.is_ok();
    Json(HealthResponse::report(db_healthy))
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_names_the_service() {
        let json = serde_json::to_value(HealthResponse::report(true)).unwrap();
        assert_eq!(json["service"], "userhub-api");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["db_healthy"], true);
    }

    #[test]
    fn database_outage_degrades_status() {
        let report = HealthResponse::report(false);
        assert_eq!(report.status, "degraded");
        assert!(!report.db_healthy);
    }
}
