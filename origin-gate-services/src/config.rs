use crate::errors::GatewayError;
use std::env;
use std::net::SocketAddr;

pub const ALLOWED_ORIGINS_VAR: &str = "GATEWAY_ALLOWED_ORIGINS";
pub const BIND_ADDR_VAR: &str = "GATEWAY_BIND";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";
pub const SERVICE_NAME_VAR: &str = "SERVICE_NAME";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:18789";
const DEFAULT_SERVICE_NAME: &str = "origin-gate";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub service_name: String,
    pub bind_addr: String,
    pub allowed_origins: Vec<String>,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            allowed_origins: Vec::new(),
            log_json: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            service_name: lookup(SERVICE_NAME_VAR)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.service_name),
            bind_addr: lookup(BIND_ADDR_VAR)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            allowed_origins: lookup(ALLOWED_ORIGINS_VAR)
                .map(|v| parse_origin_list(&v))
                .unwrap_or_default(),
            log_json: lookup(LOG_FORMAT_VAR)
                .map(|v| v.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, GatewayError> {
        self.bind_addr
            .parse()
            .map_err(|_| GatewayError::Config(format!("invalid {}: {}", BIND_ADDR_VAR, self.bind_addr)))
    }
}

/// Splits a comma-separated origin list, trimming whitespace and dropping
/// empty items.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
