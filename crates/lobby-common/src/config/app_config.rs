//! Application configuration structs
//!
//! Loads configuration from environment variables, with typed defaults for every value.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub gateway: GatewayConfig,
    pub heartbeat: HeartbeatConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Unrecognized `APP_ENV` value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown environment: {0}")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

/// WebSocket gateway listener configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Capacity of each connection's outbound frame queue
    pub message_buffer: usize,
}

impl GatewayConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Liveness probe configuration
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Seconds between two liveness probes on the same connection
    pub interval_secs: u64,
}

impl HeartbeatConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_heartbeat_interval(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "lobby".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_message_buffer() -> usize {
    100
}

fn default_heartbeat_interval() -> u64 {
    60
}

/// Parse an optional variable, falling back to `default` when it is unset.
fn parse_or<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(var, raw)),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interval_secs = parse_or(&lookup, "HEARTBEAT_INTERVAL_SECS", default_heartbeat_interval())?;
        if interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "HEARTBEAT_INTERVAL_SECS",
                interval_secs.to_string(),
            ));
        }

        let message_buffer = parse_or(&lookup, "MESSAGE_BUFFER_SIZE", default_message_buffer())?;
        if message_buffer == 0 {
            return Err(ConfigError::InvalidValue(
                "MESSAGE_BUFFER_SIZE",
                message_buffer.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_or(&lookup, "APP_ENV", Environment::default())?,
            },
            gateway: GatewayConfig {
                host: lookup("GATEWAY_HOST").unwrap_or_else(default_host),
                port: parse_or(&lookup, "GATEWAY_PORT", default_port())?,
                message_buffer,
            },
            heartbeat: HeartbeatConfig { interval_secs },
        })
    }

    /// Configuration for tests: loopback host, ephemeral port, default intervals
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            gateway: GatewayConfig {
                host: default_host(),
                port: 0,
                message_buffer: default_message_buffer(),
            },
            heartbeat: HeartbeatConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
