use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;
use url::{Host, Url};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OriginError {
    #[error("Origin header is empty")]
    Empty,
    #[error("Origin is not an absolute URL: {0}")]
    Malformed(String),
    #[error("Origin has no host component")]
    MissingHost,
    #[error("Origin carries user credentials")]
    Credentials,
    #[error("Origin carries a path, query or fragment")]
    HasPath,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Request host is empty")]
    Empty,
    #[error("Request host is malformed: {0}")]
    Malformed(String),
    #[error("Request host has an invalid port: {0}")]
    InvalidPort(String),
    #[error("Request host name is invalid: {0}")]
    InvalidHost(#[from] url::ParseError),
}

/// Default port for the schemes a browser can put in an Origin header.
pub fn known_default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        "ftp" => Some(21),
        _ => None,
    }
}

/// A browser-declared origin, reduced to scheme, normalised host and port.
///
/// Hosts go through `url::Host::parse`, so domains are lower-cased and
/// IDNA-encoded and IP literals are canonicalised. `port` only holds an
/// explicit, non-default port; `effective_port` falls back to the scheme
/// default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOrigin {
    scheme: String,
    host: Host<String>,
    port: Option<u16>,
    effective_port: Option<u16>,
}

impl ParsedOrigin {
    /// Parses a raw `Origin` header value.
    ///
    /// Values carrying a path (other than a bare `/`), a query, a fragment or
    /// userinfo are rejected rather than stripped: a browser never sends
    /// them, so their presence means the value did not come from one. The
    /// same goes for any spelling the URL parser had to rewrite (embedded
    /// tabs, `\`, percent-escapes, IPv4 shorthand). Only ASCII case, an
    /// explicit default port and one trailing `/` may differ from the
    /// canonical form.
    pub fn parse(raw: &str) -> Result<Self, OriginError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OriginError::Empty);
        }

        let url = Url::parse(trimmed).map_err(|e| OriginError::Malformed(e.to_string()))?;

        let host_str = url.host_str().filter(|h| !h.is_empty()).ok_or(OriginError::MissingHost)?;

        if !url.username().is_empty() || url.password().is_some() {
            return Err(OriginError::Credentials);
        }
        if !matches!(url.path(), "" | "/") || url.query().is_some() || url.fragment().is_some() {
            return Err(OriginError::HasPath);
        }

        // Non-special schemes keep their host opaque; re-parse to normalise.
        let host = Host::parse(host_str).map_err(|e| OriginError::Malformed(e.to_string()))?;
        let scheme = url.scheme().to_ascii_lowercase();
        let default_port = known_default_port(&scheme);
        let port = url.port().filter(|p| Some(*p) != default_port);

        let origin = Self {
            effective_port: port.or(default_port),
            scheme,
            host,
            port,
        };
        if !origin.is_spelled_as(trimmed) {
            return Err(OriginError::Malformed(format!(
                "origin is not in serialized form: {:?}",
                trimmed
            )));
        }
        Ok(origin)
    }

    fn is_spelled_as(&self, raw: &str) -> bool {
        let lowered = raw.to_ascii_lowercase();
        let spelled = lowered.strip_suffix('/').unwrap_or(&lowered);
        let canonical = self.serialize();
        if spelled == canonical {
            return true;
        }
        match (self.port, self.default_port()) {
            (None, Some(default)) => spelled == format!("{}:{}", canonical, default),
            _ => false,
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &Host<String> {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn effective_port(&self) -> Option<u16> {
        self.effective_port
    }

    pub fn default_port(&self) -> Option<u16> {
        known_default_port(&self.scheme)
    }

    pub fn is_loopback(&self) -> bool {
        is_loopback_host(&self.host)
    }

    /// Canonical `scheme://host[:port]` form used for exact matching.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParsedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

/// The `host[:port]` the client used to address the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHost {
    host: Host<String>,
    port: Option<u16>,
}

impl RequestHost {
    pub fn parse(raw: &str) -> Result<Self, HostError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HostError::Empty);
        }
        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '?' | '#' | '@'))
        {
            return Err(HostError::Malformed(trimmed.to_string()));
        }

        let (name, port) = if trimmed.starts_with('[') {
            let close = trimmed
                .find(']')
                .ok_or_else(|| HostError::Malformed(trimmed.to_string()))?;
            let (name, rest) = trimmed.split_at(close + 1);
            match rest {
                "" => (name, None),
                _ => match rest.strip_prefix(':') {
                    Some(port) => (name, Some(port)),
                    None => return Err(HostError::Malformed(trimmed.to_string())),
                },
            }
        } else {
            match trimmed.split_once(':') {
                Some((name, port)) => (name, Some(port)),
                None => (trimmed, None),
            }
        };

        let port = port.map(parse_port).transpose()?;
        let host = Host::parse(name)?;

        Ok(Self { host, port })
    }

    pub fn host(&self) -> &Host<String> {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Same host and same effective port. A request host without a port is
    /// taken to be on the origin scheme's default port.
    pub fn matches(&self, origin: &ParsedOrigin) -> bool {
        self.host == *origin.host() && self.port.or(origin.default_port()) == origin.effective_port()
    }
}

fn parse_port(raw: &str) -> Result<u16, HostError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HostError::InvalidPort(raw.to_string()));
    }
    raw.parse::<u16>()
        .map_err(|_| HostError::InvalidPort(raw.to_string()))
}

pub fn is_loopback_host(host: &Host<String>) -> bool {
    match host {
        Host::Domain(name) => name == "localhost",
        Host::Ipv4(addr) => *addr == Ipv4Addr::LOCALHOST,
        Host::Ipv6(addr) => *addr == Ipv6Addr::LOCALHOST,
    }
}
