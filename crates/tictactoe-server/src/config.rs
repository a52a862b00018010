//! Startup configuration read from the environment.

use std::net::SocketAddr;

/// Environment variable holding the listen address
pub const ADDR_VAR: &str = "SERVER_ADDR";

/// Listen address used when `SERVER_ADDR` is unset
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_addr_var(std::env::var(ADDR_VAR).ok())
    }

    fn from_addr_var(value: Option<String>) -> anyhow::Result<Self> {
        let raw = value.unwrap_or_else(|| DEFAULT_ADDR.into());
        let addr = raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {ADDR_VAR} {raw:?}: {e}"))?;
        Ok(Self { addr })
    }
}
