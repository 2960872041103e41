//! Server configuration resolved from environment variables.
//!
//! Every setting has a default, so an empty environment yields a working
//! local setup: `127.0.0.1:8000`, the `http://localhost:3000` frontend, and
//! model artifacts in the working directory.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid bind address {value:?}: {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Invalid allowed origin {0:?}")]
    InvalidOrigin(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8000);
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_SPEC_MODEL_PATH: &str = "final_model_spec.json";
pub const DEFAULT_PRICE_MODEL_PATH: &str = "final_model_price.json";

// ─────────────────────────────────────────────────────────────────────────────
// Server Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// The single browser origin allowed to call the API with credentials.
    pub allowed_origin: String,
    pub spec_model_path: PathBuf,
    pub price_model_path: PathBuf,
}

impl ServerConfig {
    /// Resolves the config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the config through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let bind_addr = match var("BIND_ADDR") {
            Some(addr) => addr
                .parse()
                .map_err(|source| ConfigError::InvalidAddr { value: addr, source })?,
            None => DEFAULT_BIND_ADDR,
        };

        let allowed_origin = get("ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN);
        validate_origin(&allowed_origin)?;

        Ok(Self {
            bind_addr,
            allowed_origin,
            spec_model_path: get("SPEC_MODEL_PATH", DEFAULT_SPEC_MODEL_PATH).into(),
            price_model_path: get("PRICE_MODEL_PATH", DEFAULT_PRICE_MODEL_PATH).into(),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.into(),
            spec_model_path: DEFAULT_SPEC_MODEL_PATH.into(),
            price_model_path: DEFAULT_PRICE_MODEL_PATH.into(),
        }
    }
}

/// An origin is `scheme://host[:port]`: no path, no trailing slash, and only
/// visible ASCII so it can be sent back as a header value.
fn validate_origin(origin: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidOrigin(origin.to_string());

    let rest = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .ok_or_else(invalid)?;
    if rest.is_empty() || rest.contains('/') || !rest.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn resolve(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(config.allowed_origin, "http://localhost:3000");
        assert_eq!(config.spec_model_path, PathBuf::from("final_model_spec.json"));
        assert_eq!(config.price_model_path, PathBuf::from("final_model_price.json"));
    }

    #[test]
    fn test_overrides() {
        let config = resolve(&[
            ("BIND_ADDR", "0.0.0.0:9000"),
            ("ALLOWED_ORIGIN", "https://laptops.example.com"),
            ("SPEC_MODEL_PATH", "/models/spec.json"),
            ("PRICE_MODEL_PATH", "/models/price.json"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.allowed_origin, "https://laptops.example.com");
        assert_eq!(config.spec_model_path, PathBuf::from("/models/spec.json"));
        assert_eq!(config.price_model_path, PathBuf::from("/models/price.json"));
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = resolve(&[("BIND_ADDR", "  "), ("SPEC_MODEL_PATH", "")]).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_invalid_addr() {
        let err = resolve(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddr { .. }));
    }

    #[test]
    fn test_invalid_origin() {
        for origin in ["localhost:3000", "http://", "http://host/path", "http://a b"] {
            let err = resolve(&[("ALLOWED_ORIGIN", origin)]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidOrigin(_)), "{origin}");
        }
    }
}
