// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server configuration module
//!
//! This module provides configuration structures and logic for the Shakespeare
//! quote server, supporting different environments and validation of
//! configuration parameters.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use anyhow::{Result, anyhow, ensure};
use config::{Config, ConfigError, Environment as ConfigEnv, File};
use serde::{Deserialize, Deserializer, Serialize, de};
use shared_types::ServiceIdentity;

use crate::error::{ServerError, ServerResult};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CRASH_DELAY_MS: u64 = 1000;
const MAX_CRASH_DELAY_MS: u64 = 60_000;

/// A validated server port that ensures the value is appropriate for the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerPort {
    port: u16,
    environment: Environment,
}

impl ServerPort {
    /// Create a new `ServerPort`, ensuring it's valid for the given environment
    ///
    /// # Errors
    ///
    /// Returns an error if the port is 0 in non-testing environments
    pub fn new(port: u16, environment: Environment) -> Result<Self> {
        if port == 0 && environment != Environment::Testing {
            return Err(anyhow!("port cannot be 0 in non-testing environments"));
        }
        Ok(Self { port, environment })
    }

    /// Default service port for development
    pub const fn default_development() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: Environment::Development,
        }
    }

    /// Create a safe testing port (port 0)
    pub const fn testing() -> Self {
        Self {
            port: 0,
            environment: Environment::Testing,
        }
    }

    /// Get the port value
    pub fn value(&self) -> u16 {
        self.port
    }
}

impl<'de> Deserialize<'de> for ServerPort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let port = u16::deserialize(deserializer)?;
        // Re-validated during loading once the environment is known
        Ok(Self {
            port,
            environment: Environment::Development,
        })
    }
}

/// A validated timeout duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(Duration);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within valid bounds
    ///
    /// # Errors
    ///
    /// Returns an error if timeout is 0 or greater than 300 seconds
    pub fn new(seconds: u64) -> Result<Self> {
        ensure!(seconds != 0, "timeout must be greater than 0");
        ensure!(seconds <= 300, "timeout cannot exceed 300");
        Ok(Self(Duration::from_secs(seconds)))
    }

    /// Create a safe default timeout (30 seconds)
    pub const fn default_value() -> Self {
        Self(Duration::from_secs(30))
    }

    /// Create a safe testing timeout (5 seconds)
    pub const fn testing() -> Self {
        Self(Duration::from_secs(5))
    }

    /// Get the timeout value
    pub fn value(&self) -> Duration {
        self.0
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self::default_value()
    }
}

/// A validated fault-injection delay in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DelayMillis(Duration);

impl DelayMillis {
    /// Create a new `DelayMillis`
    ///
    /// # Errors
    ///
    /// Returns an error if the delay exceeds 60 seconds
    pub fn new(millis: u64) -> Result<Self> {
        ensure!(
            millis <= MAX_CRASH_DELAY_MS,
            "delay cannot exceed {MAX_CRASH_DELAY_MS} ms"
        );
        Ok(Self(Duration::from_millis(millis)))
    }

    /// Get the delay value
    pub fn value(&self) -> Duration {
        self.0
    }
}

impl<'de> Deserialize<'de> for DelayMillis {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Self::new(millis).map_err(|e| de::Error::custom(e.to_string()))
    }
}

impl Default for DelayMillis {
    fn default() -> Self {
        Self(Duration::from_millis(DEFAULT_CRASH_DELAY_MS))
    }
}

/// Settings of the `/crash` fault-injection endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashConfig {
    /// Whether the endpoint is routed at all
    pub enabled: bool,
    /// Wait before requesting graceful termination
    pub terminate_delay_ms: DelayMillis,
    /// Wait between graceful and forced termination
    pub kill_delay_ms: DelayMillis,
}

impl Default for CrashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            terminate_delay_ms: DelayMillis::default(),
            kill_delay_ms: DelayMillis::default(),
        }
    }
}

impl CrashConfig {
    /// Short delays so tests can exercise the endpoint quickly
    pub const fn testing() -> Self {
        Self {
            enabled: true,
            terminate_delay_ms: DelayMillis(Duration::from_millis(10)),
            kill_delay_ms: DelayMillis(Duration::from_millis(10)),
        }
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Development environment
    Development,
    /// Testing environment
    Testing,
}

/// Server configuration for different environments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: IpAddr,
    /// Server port (validated for environment compatibility)
    pub port: ServerPort,
    /// Request timeout in seconds (validated range: 1-300)
    pub timeout_seconds: TimeoutSeconds,
    /// Environment type
    pub environment: Environment,
    /// Host name reported in every response envelope
    pub hostname: Option<String>,
    /// Fault-injection endpoint settings
    #[serde(default)]
    pub crash: CrashConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: ServerPort::default_development(),
            timeout_seconds: TimeoutSeconds::default(),
            environment: Environment::Development,
            hostname: std::env::var("HOSTNAME").ok(),
            crash: CrashConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables and optional configuration files
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if configuration is invalid or cannot be loaded.
    pub fn from_env() -> ServerResult<Self> {
        Self::load().map_err(|e| ServerError::Config {
            message: format!("failed to load configuration: {e}"),
        })
    }

    /// Load configuration using the config crate with hierarchical sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values (`hostname` defaults to the `HOSTNAME` environment variable)
    /// 2. Configuration file (config.json)
    /// 3. Environment-specific files (config.{env}.json)
    /// 4. Environment variables with `SERVER_` prefix, `__` between nested keys
    ///    (for example `SERVER_CRASH__ENABLED=false`)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let env_var = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let mut config_builder = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("timeout_seconds", 30)?
            .set_default("environment", "development")?
            .set_default("crash.enabled", true)?
            .set_default("crash.terminate_delay_ms", 1000)?
            .set_default("crash.kill_delay_ms", 1000)?;

        if let Ok(hostname) = std::env::var("HOSTNAME") {
            config_builder = config_builder.set_default("hostname", hostname)?;
        }

        config_builder = config_builder
            .add_source(File::with_name("config.json").required(false))
            .add_source(
                File::with_name(&format!("config.{}.json", env_var.to_lowercase())).required(false),
            )
            .add_source(
                ConfigEnv::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        if std::env::var("ENVIRONMENT").is_ok() {
            config_builder = config_builder.set_override("environment", env_var.to_lowercase())?;
        }

        let config = config_builder.build()?;
        let mut server_config: Self = config.try_deserialize()?;

        server_config.port = ServerPort::new(server_config.port.value(), server_config.environment)
            .map_err(|e| ConfigError::Message(format!("invalid port configuration: {e}")))?;

        Ok(server_config)
    }

    /// Create configuration optimized for testing
    pub fn for_testing() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: ServerPort::testing(),
            timeout_seconds: TimeoutSeconds::testing(),
            environment: Environment::Testing,
            hostname: Some("shakespeare-test".to_string()),
            crash: CrashConfig::testing(),
        }
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port.value())
    }

    /// Identity stamped into every response envelope
    pub fn identity(&self) -> ServiceIdentity {
        ServiceIdentity::new(self.hostname.clone(), env!("CARGO_PKG_VERSION"))
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
            Environment::Testing => write!(f, "testing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_validation() {
        assert!(TimeoutSeconds::new(0).is_err());
        assert!(TimeoutSeconds::new(400).is_err());

        assert!(TimeoutSeconds::new(30).is_ok());
        assert!(TimeoutSeconds::new(1).is_ok());
        assert!(TimeoutSeconds::new(300).is_ok());
    }

    #[test]
    fn server_port_validation() {
        // Port 0 should only be valid in testing environment
        assert!(ServerPort::new(0, Environment::Testing).is_ok());
        assert!(ServerPort::new(0, Environment::Development).is_err());
        assert!(ServerPort::new(0, Environment::Production).is_err());

        assert!(ServerPort::new(5000, Environment::Development).is_ok());
        assert!(ServerPort::new(443, Environment::Production).is_ok());
    }

    #[test]
    fn delay_validation() {
        assert!(DelayMillis::new(0).is_ok());
        assert!(DelayMillis::new(MAX_CRASH_DELAY_MS).is_ok());
        assert!(DelayMillis::new(MAX_CRASH_DELAY_MS + 1).is_err());
        assert_eq!(DelayMillis::default().value(), Duration::from_secs(1));
    }

    #[test]
    fn crash_config_deserializes_from_millis() {
        let crash: CrashConfig = serde_json::from_str(
            r#"{"enabled": false, "terminate_delay_ms": 250, "kill_delay_ms": 500}"#,
        )
        .unwrap();

        assert!(!crash.enabled);
        assert_eq!(crash.terminate_delay_ms.value(), Duration::from_millis(250));
        assert_eq!(crash.kill_delay_ms.value(), Duration::from_millis(500));

        let too_long: Result<CrashConfig, _> = serde_json::from_str(
            r#"{"enabled": true, "terminate_delay_ms": 600000, "kill_delay_ms": 1}"#,
        );
        assert!(too_long.is_err());
    }

    #[test]
    fn defaults_match_service_conventions() {
        let config = ServerConfig::default();
        assert_eq!(config.port.value(), 5000);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert!(config.crash.enabled);
    }

    #[test]
    fn testing_identity() {
        let identity = ServerConfig::for_testing().identity();
        assert_eq!(identity.hostname(), Some("shakespeare-test"));
        assert_eq!(identity.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Testing.to_string(), "testing");
    }
}
