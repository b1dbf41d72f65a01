use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Request body cap for the upload route. Sits above the 5 MiB image
    /// limit so oversized files reach the validator and get the proper
    /// "File too large" reason instead of a bare 413.
    pub max_body_bytes: usize,
    /// Permissive CORS for browser clients on other origins.
    pub allow_cross_origin: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".parse().expect("valid default addr"),
            max_body_bytes: 8 * 1024 * 1024,
            allow_cross_origin: true,
        }
    }
}

impl ServerConfig {
    /// Load a config from a TOML file. Missing keys fall back to defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8787".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_body_bytes, 8 * 1024 * 1024);
        assert!(c.allow_cross_origin);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: ServerConfig = toml::from_str("bind_addr = \"0.0.0.0:9000\"").unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_body_bytes, ServerConfig::default().max_body_bytes);
    }
}
