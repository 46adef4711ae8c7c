//! Configuration loaded from the environment.
//!
//! Variables:
//! - `VITE_API_HOST` -- API origin host, scheme included (default `http://localhost`)
//! - `VITE_API_PORT` -- API origin port (default `8080`)
//! - `VITE_HOST` -- dev server bind host (default `0.0.0.0`)
//! - `VITE_PORT` -- dev server bind port (default `3000`)
//!
//! Empty values count as unset. Values are read once, when the config is
//! built; nothing re-reads the environment afterwards.

use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_API_HOST: &str = "http://localhost";
pub const DEFAULT_API_PORT: &str = "8080";
pub const DEFAULT_DEV_HOST: &str = "0.0.0.0";
pub const DEFAULT_DEV_PORT: u16 = 3000;

/// Where the feeds backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    /// Kept as text and joined verbatim, like the host.
    pub port: String,
}

impl ApiConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: non_empty(&lookup, "VITE_API_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_owned()),
            port: non_empty(&lookup, "VITE_API_PORT").unwrap_or_else(|| DEFAULT_API_PORT.to_owned()),
        }
    }

    /// `host:port`, prepended to every API path.
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Bind address of the development server that serves the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevServerConfig {
    pub host: String,
    pub port: u16,
}

impl DevServerConfig {
    /// A `VITE_PORT` that is not a positive integer falls back to the
    /// default rather than failing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = non_empty(&lookup, "VITE_PORT")
            .and_then(|raw| leading_integer(&raw))
            .filter(|port| *port != 0)
            .unwrap_or(DEFAULT_DEV_PORT);
        Self {
            host: non_empty(&lookup, "VITE_HOST").unwrap_or_else(|| DEFAULT_DEV_HOST.to_owned()),
            port,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Complete configuration: API origin plus dev server settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub dev_server: DevServerConfig,
}

impl Config {
    /// Load `.env` from the working directory (if there is one), then read
    /// the process environment. Variables already set win over `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Ok(Self::from_lookup(|name| std::env::var(name).ok()))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api: ApiConfig::from_lookup(&lookup),
            dev_server: DevServerConfig::from_lookup(&lookup),
        }
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|v| !v.is_empty())
}

/// Leading decimal digits of `raw` (after surrounding whitespace and an
/// optional `+`), so `"4000abc"` reads as 4000 and `"+5"` as 5.
fn leading_integer(raw: &str) -> Option<u16> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(trimmed, |(i, _)| &trimmed[..i]);
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = Config::from_lookup(env(&[]));
        assert_eq!(config.api.base_url(), "http://localhost:8080");
        assert_eq!(config.dev_server.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn api_port_override_changes_base_url() {
        let api = ApiConfig::from_lookup(env(&[("VITE_API_PORT", "9090")]));
        assert_eq!(api.base_url(), "http://localhost:9090");
    }

    #[test]
    fn api_host_override_is_joined_verbatim() {
        let api = ApiConfig::from_lookup(env(&[
            ("VITE_API_HOST", "https://feeds.example.com"),
            ("VITE_API_PORT", "443"),
        ]));
        assert_eq!(api.base_url(), "https://feeds.example.com:443");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = Config::from_lookup(env(&[("VITE_API_HOST", ""), ("VITE_HOST", "")]));
        assert_eq!(config.api.host, DEFAULT_API_HOST);
        assert_eq!(config.dev_server.host, DEFAULT_DEV_HOST);
    }

    #[test]
    fn dev_port_parses_leading_digits() {
        let dev = DevServerConfig::from_lookup(env(&[("VITE_PORT", "4000abc")]));
        assert_eq!(dev.port, 4000);
        let dev = DevServerConfig::from_lookup(env(&[("VITE_PORT", " 5173 ")]));
        assert_eq!(dev.port, 5173);
    }

    #[test]
    fn dev_port_accepts_plus_sign() {
        let dev = DevServerConfig::from_lookup(env(&[("VITE_PORT", "+5")]));
        assert_eq!(dev.port, 5);
        let dev = DevServerConfig::from_lookup(env(&[("VITE_PORT", " +4000abc")]));
        assert_eq!(dev.port, 4000);
    }

    #[test]
    fn unusable_dev_port_falls_back_to_default() {
        for raw in ["abc", "0", "70000", "-1", "+", "++5", "+-5"] {
            let dev = DevServerConfig::from_lookup(env(&[("VITE_PORT", raw)]));
            assert_eq!(dev.port, DEFAULT_DEV_PORT, "VITE_PORT={raw}");
        }
    }

    #[test]
    fn dev_host_override() {
        let dev = DevServerConfig::from_lookup(env(&[("VITE_HOST", "127.0.0.1"), ("VITE_PORT", "8000")]));
        assert_eq!(dev.bind_addr(), "127.0.0.1:8000");
    }
}
