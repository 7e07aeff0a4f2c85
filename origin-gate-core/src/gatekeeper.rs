//! Browser-origin admission.
//!
//! The gate is a pure function of the request host, the declared `Origin`
//! and the operator allowlist. Rules are tried in [`Rule::ORDER`] and the
//! first one that matches decides the verdict. Anything that cannot be parsed
//! is a deny, never an error.

use crate::origin::{OriginError, ParsedOrigin, RequestHost};
use crate::verdict::{ReasonCode, Verdict};

/// First-party origins admitted regardless of operator configuration.
/// Bump `BUILTIN_TRUSTED_ORIGINS_VERSION` whenever this list changes.
pub const BUILTIN_TRUSTED_ORIGINS: [&str; 2] = ["https://storyclaw.com", "https://app.storyclaw.com"];
pub const BUILTIN_TRUSTED_ORIGINS_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    SameOrigin,
    LoopbackOrigin,
    BuiltinTrusted,
    Allowlisted,
}

impl Rule {
    pub const ORDER: [Rule; 4] = [
        Rule::SameOrigin,
        Rule::LoopbackOrigin,
        Rule::BuiltinTrusted,
        Rule::Allowlisted,
    ];

    pub fn reason(&self) -> ReasonCode {
        match self {
            Rule::SameOrigin => ReasonCode::SameOrigin,
            Rule::LoopbackOrigin => ReasonCode::LoopbackOrigin,
            Rule::BuiltinTrusted => ReasonCode::BuiltinTrusted,
            Rule::Allowlisted => ReasonCode::Allowlisted,
        }
    }

    fn matches(&self, candidate: &Candidate, policy: &OriginPolicy) -> bool {
        match self {
            Rule::SameOrigin => candidate
                .request_host
                .as_ref()
                .is_some_and(|host| host.matches(&candidate.origin)),
            Rule::LoopbackOrigin => candidate.origin.is_loopback(),
            Rule::BuiltinTrusted => BUILTIN_TRUSTED_ORIGINS.contains(&candidate.canonical.as_str()),
            Rule::Allowlisted => policy.allowed.iter().any(|a| *a == candidate.canonical),
        }
    }

    fn first_match(candidate: &Candidate, policy: &OriginPolicy) -> Option<Rule> {
        Self::ORDER
            .into_iter()
            .find(|rule| rule.matches(candidate, policy))
    }
}

struct Candidate {
    origin: ParsedOrigin,
    canonical: String,
    // A request host that does not parse only disables the same-origin rule.
    request_host: Option<RequestHost>,
}

impl Candidate {
    fn new(request_host: &str, origin: &str) -> Result<Self, OriginError> {
        let origin = ParsedOrigin::parse(origin)?;
        Ok(Self {
            canonical: origin.serialize(),
            origin,
            request_host: RequestHost::parse(request_host).ok(),
        })
    }
}

/// Evaluation context with a pre-normalised allowlist.
///
/// Build it once from configuration and share it; it is immutable, so
/// concurrent evaluation needs no synchronisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginPolicy {
    allowed: Vec<String>,
    rejected: Vec<String>,
}

impl OriginPolicy {
    pub fn new<I, S>(allowed_origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed = Vec::new();
        let mut rejected = Vec::new();
        for entry in allowed_origins {
            let entry = entry.as_ref();
            match ParsedOrigin::parse(entry) {
                Ok(origin) => allowed.push(origin.serialize()),
                Err(_) => rejected.push(entry.to_string()),
            }
        }
        Self { allowed, rejected }
    }

    /// Canonical forms of the allowlist entries that parsed.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed
    }

    /// Raw allowlist entries that are not valid origins and can never match.
    pub fn rejected_entries(&self) -> &[String] {
        &self.rejected
    }

    pub fn evaluate(&self, request_host: &str, origin: &str) -> Verdict {
        let candidate = match Candidate::new(request_host, origin) {
            Ok(c) => c,
            Err(_) => return Verdict::deny(ReasonCode::MissingOrInvalidOrigin),
        };

        match Rule::first_match(&candidate, self) {
            Some(rule) => Verdict::admit(rule.reason()),
            None => Verdict::deny(ReasonCode::OriginNotAllowed),
        }
    }

    /// Every rule that would admit this origin, in evaluation order. The
    /// verdict is decided by the first entry alone.
    pub fn matching_rules(&self, request_host: &str, origin: &str) -> Result<Vec<Rule>, OriginError> {
        let candidate = Candidate::new(request_host, origin)?;
        Ok(Rule::ORDER
            .into_iter()
            .filter(|rule| rule.matches(&candidate, self))
            .collect())
    }
}

pub fn evaluate<S: AsRef<str>>(request_host: &str, origin: &str, allowed_origins: &[S]) -> Verdict {
    OriginPolicy::new(allowed_origins).evaluate(request_host, origin)
}
