pub mod gatekeeper;
pub mod metrics;
pub mod origin;
pub mod verdict;

pub use gatekeeper::{
    evaluate, OriginPolicy, Rule, BUILTIN_TRUSTED_ORIGINS, BUILTIN_TRUSTED_ORIGINS_VERSION,
};
pub use origin::{HostError, OriginError, ParsedOrigin, RequestHost};
pub use verdict::{ReasonCode, Verdict};
