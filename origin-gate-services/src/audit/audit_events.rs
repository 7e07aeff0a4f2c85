use origin_gate_core::ReasonCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::SystemTime;
use tracing::{error, warn};

pub const AUDIT_TARGET: &str = "audit";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: String,
    pub timestamp: f64,
    pub service: String,
    pub event_type: String,
    pub action: String,
    pub outcome: String,
    pub payload: HashMap<String, serde_json::Value>,
}

impl AuditEvent {
    pub fn new(service: String, event_type: String, action: String, outcome: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs_f64(),
            service,
            event_type,
            action,
            outcome,
            payload: HashMap::new(),
        }
    }

    pub fn origin_rejected(service: &str, request_host: &str, origin: &str, reason: ReasonCode) -> Self {
        let mut event = Self::new(
            service.to_string(),
            "security.origin_check".to_string(),
            "browser_request".to_string(),
            "denied".to_string(),
        );
        event.payload.insert(
            "request_host".to_string(),
            serde_json::Value::String(request_host.to_string()),
        );
        event.payload.insert(
            "origin".to_string(),
            serde_json::Value::String(origin.to_string()),
        );
        event.payload.insert(
            "reason".to_string(),
            serde_json::Value::String(reason.as_str().to_string()),
        );
        event
    }

    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(line) => warn!(target: AUDIT_TARGET, "{}", line),
            Err(e) => error!("Failed to serialize audit event {}: {}", self.id, e),
        }
    }
}
