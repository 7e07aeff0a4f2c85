use crate::audit::AuditEvent;
use crate::errors::GatewayError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::{HOST, ORIGIN},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use origin_gate_core::metrics::track_verdict;
use std::sync::Arc;
use tracing::{debug, warn};

/// Admits or rejects a browser request by its `Origin` before any other
/// handler runs. A missing or non-UTF-8 `Origin` is treated as empty and
/// denied.
pub async fn origin_guard_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let headers = request.headers();
    let request_host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .map(String::from)
        .or_else(|| request.uri().authority().map(|a| a.to_string()))
        .unwrap_or_default();
    let origin = headers
        .get(ORIGIN)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("")
        .to_string();

    let policy = state.policy.current().await;
    let verdict = policy.evaluate(&request_host, &origin);
    track_verdict(&verdict);

    if !verdict.ok {
        warn!(
            host = %request_host,
            origin = %origin,
            reason = %verdict.reason,
            "Rejected browser origin"
        );
        AuditEvent::origin_rejected(
            &state.settings.service_name,
            &request_host,
            &origin,
            verdict.reason,
        )
        .emit();
        return GatewayError::OriginRejected(verdict.reason).into_response();
    }

    debug!(host = %request_host, origin = %origin, reason = %verdict.reason, "Admitted browser origin");
    request.extensions_mut().insert(verdict);
    next.run(request).await
}

pub fn with_origin_guard(router: Router, state: Arc<AppState>) -> Router {
    router.layer(middleware::from_fn_with_state(state, origin_guard_middleware))
}
