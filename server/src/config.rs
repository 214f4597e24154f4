//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("cannot resolve HOST {host:?}: {source}")]
    Resolve { host: String, source: std::io::Error },

    #[error("HOST {host:?} resolved to no addresses")]
    NoAddress { host: String },
}

/// `HOST` may be an IP literal or a hostname; names are resolved at bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `HOST` (default `0.0.0.0`) and `PORT` (default 3000).
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").ok();
        let port = std::env::var("PORT").ok();
        Self::from_values(host.as_deref(), port.as_deref())
    }

    pub fn from_values(host: Option<&str>, port: Option<&str>) -> Result<Self, ConfigError> {
        let host = host
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_HOST)
            .to_owned();
        let port = match port.map(str::trim).filter(|v| !v.is_empty()) {
            None => DEFAULT_PORT,
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value: value.to_owned(), source })?,
        };
        Ok(Self { host, port })
    }

    /// Resolve `host:port` to the first address the system resolver returns.
    pub async fn resolve(&self) -> Result<SocketAddr, ConfigError> {
        let mut addrs = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|source| ConfigError::Resolve { host: self.host.clone(), source })?;
        addrs
            .next()
            .ok_or_else(|| ConfigError::NoAddress { host: self.host.clone() })
    }
}
