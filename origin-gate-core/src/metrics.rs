use crate::verdict::{ReasonCode, Verdict};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

pub struct MetricNames;

impl MetricNames {
    pub const ORIGIN_CHECKS_TOTAL: &'static str = "origin_checks";
}

/// Verdict counters keyed by reason, e.g. `origin_checks{reason=same-origin}`.
pub struct VerdictMetrics {
    counters: Mutex<HashMap<String, u64>>,
}

impl Default for VerdictMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl VerdictMetrics {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
        }
    }

    fn make_key(reason: ReasonCode) -> String {
        format!("{}{{reason={}}}", MetricNames::ORIGIN_CHECKS_TOTAL, reason)
    }

    pub fn record(&self, verdict: &Verdict) {
        let key = Self::make_key(verdict.reason);
        match self.counters.lock() {
            Ok(mut counters) => *counters.entry(key).or_insert(0) += 1,
            Err(e) => warn!("Verdict metrics lock poisoned: {}", e),
        }
    }

    pub fn count(&self, reason: ReasonCode) -> u64 {
        self.counters
            .lock()
            .ok()
            .and_then(|c| c.get(&Self::make_key(reason)).copied())
            .unwrap_or(0)
    }

    pub fn admitted(&self) -> u64 {
        ReasonCode::ALL
            .iter()
            .filter(|r| r.is_admit())
            .map(|r| self.count(*r))
            .sum()
    }

    pub fn denied(&self) -> u64 {
        ReasonCode::ALL
            .iter()
            .filter(|r| !r.is_admit())
            .map(|r| self.count(*r))
            .sum()
    }

    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counters
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

lazy_static! {
    pub static ref GLOBAL_VERDICT_METRICS: VerdictMetrics = VerdictMetrics::new();
}

pub fn track_verdict(verdict: &Verdict) {
    GLOBAL_VERDICT_METRICS.record(verdict);
}
