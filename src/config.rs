//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub host: IpAddr,

    /// HTTP port (default: 8000)
    pub port: u16,

    /// Log output format (default: text)
    pub log_format: LogFormat,

    /// JSON file of coupons loaded at startup
    pub seed_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("COUPON_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("COUPON_HOST".to_string()))?;

        let port = lookup("COUPON_PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("COUPON_PORT".to_string()))?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        };

        let seed_file = lookup("COUPON_SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(ServerConfig {
            host,
            port,
            log_format,
            seed_file,
        })
    }

    /// Address the HTTP listener binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Cannot read coupon seed file {path:?}: {source}")]
    SeedFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Coupon seed file {path:?} is not a JSON array of coupons: {source}")]
    SeedFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}
