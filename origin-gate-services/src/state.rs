use crate::config::Settings;
use origin_gate_core::{OriginPolicy, BUILTIN_TRUSTED_ORIGINS, BUILTIN_TRUSTED_ORIGINS_VERSION};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Holds the active policy. Evaluation works on a cloned `Arc`, so a reload
/// swaps the whole policy between requests and never blocks an in-flight one.
pub struct PolicyHandle {
    policy: RwLock<Arc<OriginPolicy>>,
}

impl PolicyHandle {
    pub fn new<S: AsRef<str>>(allowed_origins: &[S]) -> Self {
        Self {
            policy: RwLock::new(Arc::new(build_policy(allowed_origins))),
        }
    }

    pub async fn current(&self) -> Arc<OriginPolicy> {
        self.policy.read().await.clone()
    }

    pub async fn replace<S: AsRef<str>>(&self, allowed_origins: &[S]) {
        let policy = Arc::new(build_policy(allowed_origins));
        *self.policy.write().await = policy;
        info!("Origin policy replaced");
    }
}

fn build_policy<S: AsRef<str>>(allowed_origins: &[S]) -> OriginPolicy {
    let policy = OriginPolicy::new(allowed_origins);
    for entry in policy.rejected_entries() {
        warn!("Ignoring allowlist entry that is not a valid origin: {:?}", entry);
    }
    info!(
        allowed = policy.allowed_origins().len(),
        builtin = BUILTIN_TRUSTED_ORIGINS.len(),
        builtin_version = BUILTIN_TRUSTED_ORIGINS_VERSION,
        "Origin allowlist loaded"
    );
    policy
}

pub struct AppState {
    pub settings: Settings,
    pub policy: PolicyHandle,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let policy = PolicyHandle::new(&settings.allowed_origins);
        Self { settings, policy }
    }
}
