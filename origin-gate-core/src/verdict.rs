use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable reason codes attached to every verdict. These strings go to logs
/// and metrics only; they are never returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonCode {
    SameOrigin,
    LoopbackOrigin,
    BuiltinTrusted,
    Allowlisted,
    MissingOrInvalidOrigin,
    OriginNotAllowed,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 6] = [
        ReasonCode::SameOrigin,
        ReasonCode::LoopbackOrigin,
        ReasonCode::BuiltinTrusted,
        ReasonCode::Allowlisted,
        ReasonCode::MissingOrInvalidOrigin,
        ReasonCode::OriginNotAllowed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::SameOrigin => "same-origin",
            ReasonCode::LoopbackOrigin => "loopback-origin",
            ReasonCode::BuiltinTrusted => "builtin-trusted",
            ReasonCode::Allowlisted => "allowlisted",
            ReasonCode::MissingOrInvalidOrigin => "missing-or-invalid-origin",
            ReasonCode::OriginNotAllowed => "origin-not-allowed",
        }
    }

    pub fn is_admit(&self) -> bool {
        matches!(
            self,
            ReasonCode::SameOrigin
                | ReasonCode::LoopbackOrigin
                | ReasonCode::BuiltinTrusted
                | ReasonCode::Allowlisted
        )
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub ok: bool,
    pub reason: ReasonCode,
}

impl Verdict {
    pub fn admit(reason: ReasonCode) -> Self {
        Self { ok: true, reason }
    }

    pub fn deny(reason: ReasonCode) -> Self {
        Self { ok: false, reason }
    }
}
