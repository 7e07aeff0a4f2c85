use crate::middleware::with_origin_guard;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use origin_gate_core::{metrics::GLOBAL_VERDICT_METRICS, BUILTIN_TRUSTED_ORIGINS_VERSION};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Health probes stay outside the guard; everything under `/api` requires an
/// admitted origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/metrics/origin-checks", get(origin_metrics_handler));

    Router::new()
        .route("/health/live", get(liveness_probe))
        .merge(with_origin_guard(api, state))
        .layer(TraceLayer::new_for_http())
}

async fn liveness_probe() -> Json<Value> {
    Json(json!({"status": "alive"}))
}

async fn status_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn origin_metrics_handler() -> Json<Value> {
    Json(json!({
        "admitted": GLOBAL_VERDICT_METRICS.admitted(),
        "denied": GLOBAL_VERDICT_METRICS.denied(),
        "counters": GLOBAL_VERDICT_METRICS.snapshot(),
        "builtin_trusted_version": BUILTIN_TRUSTED_ORIGINS_VERSION,
    }))
}
