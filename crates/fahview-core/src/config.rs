use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 36330;
pub const DEFAULT_BOND_LENGTH: f64 = 2.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub read_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            password: None,
            read_timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringConfig {
    /// Edge length of a grid cell; atoms closer than this land in the same or adjacent cells.
    pub bond_length: f64,
    /// Whether fragmented molecules are translated back into one piece.
    pub reassemble: bool,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            bond_length: DEFAULT_BOND_LENGTH,
            reassemble: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InspectConfig {
    pub client: ClientConfig,
    pub clustering: ClusteringConfig,
}

#[derive(Default)]
pub struct InspectConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    password: Option<String>,
    read_timeout: Option<Duration>,
    bond_length: Option<f64>,
    reassemble: Option<bool>,
}

impl InspectConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
    pub fn bond_length(mut self, length: f64) -> Self {
        self.bond_length = Some(length);
        self
    }
    pub fn reassemble(mut self, enabled: bool) -> Self {
        self.reassemble = Some(enabled);
        self
    }

    pub fn build(self) -> Result<InspectConfig, ConfigError> {
        let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        if host.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "host",
                reason: "must not be empty".to_string(),
            });
        }

        let port = self.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "port",
                reason: "must be between 1 and 65535".to_string(),
            });
        }

        if self.read_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidParameter {
                name: "read_timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        let bond_length = self.bond_length.unwrap_or(DEFAULT_BOND_LENGTH);
        if !bond_length.is_finite() || bond_length <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "bond_length",
                reason: format!("must be a positive length, got {}", bond_length),
            });
        }

        Ok(InspectConfig {
            client: ClientConfig {
                host,
                port,
                password: self.password.filter(|p| !p.is_empty()),
                read_timeout: self.read_timeout,
            },
            clustering: ClusteringConfig {
                bond_length,
                reassemble: self.reassemble.unwrap_or(true),
            },
        })
    }
}
