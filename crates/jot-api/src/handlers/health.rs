//! Health check handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::AppState;

/// Liveness/readiness probe: pings the database and the inference provider.
///
/// Database reachability decides the status code; a degraded inference
/// provider is reported but does not fail the probe, since CRUD keeps
/// working without it.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = state.db.ping().await.is_ok();
    let inference_ok = state.chat.health_check().await.unwrap_or(false);

    let status = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "status": if database_ok { "healthy" } else { "unhealthy" },
            "version": env!("CARGO_PKG_VERSION"),
            "database": if database_ok { "ok" } else { "unreachable" },
            "inference": if inference_ok { "ok" } else { "unavailable" },
        })),
    )
}
