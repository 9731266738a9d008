//! Reference service configuration, resolved once at startup.

use std::net::SocketAddr;

pub const ENV_REST_ADDR: &str = "MEDIMIND_REST_ADDR";
pub const ENV_MAX_UPLOAD_BYTES: &str = "MEDIMIND_MAX_UPLOAD_BYTES";

pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8000";

/// Largest accepted request body (all parts together).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ServerConfigError {
    #[error("MEDIMIND_REST_ADDR '{value}' is not a socket address: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("MEDIMIND_MAX_UPLOAD_BYTES must be a positive integer, got '{0}'")]
    InvalidUploadLimit(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    addr: SocketAddr,
    max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn new(addr: SocketAddr, max_upload_bytes: usize) -> Self {
        Self {
            addr,
            max_upload_bytes,
        }
    }

    /// Build from raw environment values; absent or blank values use the defaults.
    pub fn from_env_values(
        addr: Option<String>,
        max_upload_bytes: Option<String>,
    ) -> Result<Self, ServerConfigError> {
        let addr = non_blank(addr).unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|source| ServerConfigError::InvalidAddr {
                value: addr.clone(),
                source,
            })?;

        let max_upload_bytes = match non_blank(max_upload_bytes) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ServerConfigError::InvalidUploadLimit(raw)),
            },
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self::new(addr, max_upload_bytes))
    }

    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_env_values(
            std::env::var(ENV_REST_ADDR).ok(),
            std::env::var(ENV_MAX_UPLOAD_BYTES).ok(),
        )
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::from_env_values(None, Some("  ".into())).unwrap();
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.addr().to_string(), DEFAULT_REST_ADDR);
    }

    #[test]
    fn test_custom_values() {
        let cfg =
            ServerConfig::from_env_values(Some("127.0.0.1:9100".into()), Some("1024".into()))
                .unwrap();
        assert_eq!(cfg.addr().port(), 9100);
        assert_eq!(cfg.max_upload_bytes(), 1024);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ServerConfig::from_env_values(Some("localhost".into()), None),
            Err(ServerConfigError::InvalidAddr { .. })
        ));
        assert!(matches!(
            ServerConfig::from_env_values(None, Some("0".into())),
            Err(ServerConfigError::InvalidUploadLimit(_))
        ));
        assert!(matches!(
            ServerConfig::from_env_values(None, Some("lots".into())),
            Err(ServerConfigError::InvalidUploadLimit(_))
        ));
    }
}
