use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use origin_gate_core::ReasonCode;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Origin rejected: {0}")]
    OriginRejected(ReasonCode),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for GatewayError {
    // The reason code stays server-side.
    fn into_response(self) -> Response {
        let (status, body) = match self {
            GatewayError::OriginRejected(_) => (
                StatusCode::FORBIDDEN,
                json!({"error": "Forbidden"}),
            ),
            GatewayError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal Server Error"}),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn origin_rejection_hides_reason() {
        let response = GatewayError::OriginRejected(ReasonCode::OriginNotAllowed).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"error": "Forbidden"}));
        assert!(!text.contains("origin-not-allowed"));
    }

    #[test]
    fn config_error_is_500() {
        let response = GatewayError::Config("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
