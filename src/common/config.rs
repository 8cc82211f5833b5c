//! Configuration for cluster-group components

use crate::client::RetryPolicy;
use crate::common::{Error, Host, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cluster-group.toml";

/// Prefix for environment overrides (e.g. `CLUSTER_GROUP_HOSTS`)
pub const ENV_PREFIX: &str = "CLUSTER_GROUP";

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ordered host list; order drives creation and rollback
    #[serde(default)]
    pub hosts: Vec<Host>,

    /// Per-host retry policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// Stub host settings
    #[serde(default)]
    pub node: NodeConfig,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            retry: RetryConfig::default(),
            node: NodeConfig::default(),
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration for per-host operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per host operation (first try included)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff multiplier
    #[serde(default = "default_multiplier")]
    pub multiplier_ms: u64,

    /// Lower bound for a single wait
    #[serde(default = "default_min_wait")]
    pub min_wait_ms: u64,

    /// Upper bound for a single wait
    #[serde(default = "default_max_wait")]
    pub max_wait_ms: u64,

    /// Per-attempt request timeout
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}
fn default_multiplier() -> u64 {
    1_000
}
fn default_min_wait() -> u64 {
    1_000
}
fn default_max_wait() -> u64 {
    10_000
}
fn default_timeout() -> u64 {
    10_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            multiplier_ms: default_multiplier(),
            min_wait_ms: default_min_wait(),
            max_wait_ms: default_max_wait(),
            timeout_ms: default_timeout(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            multiplier: Duration::from_millis(self.multiplier_ms),
            min_wait: Duration::from_millis(self.min_wait_ms),
            max_wait: Duration::from_millis(self.max_wait_ms),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "retry.max_attempts must be at least 1".into(),
            ));
        }
        if self.min_wait_ms > self.max_wait_ms {
            return Err(Error::InvalidConfig(format!(
                "retry.min_wait_ms ({}) exceeds retry.max_wait_ms ({})",
                self.min_wait_ms, self.max_wait_ms
            )));
        }
        if self.timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "retry.timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Stub host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Bind address for the group API
    #[serde(default = "default_node_bind")]
    pub bind_addr: SocketAddr,
}

fn default_node_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8001))
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_node_bind(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file, then environment.
    ///
    /// Without an explicit path, `cluster-group.toml` is read if present.
    /// Environment variables win over the file: `CLUSTER_GROUP_HOSTS`
    /// takes a comma-separated list, nested keys use `__`
    /// (`CLUSTER_GROUP_RETRY__MAX_ATTEMPTS=5`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("hosts")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.retry.validate()?;
        Ok(config)
    }

    /// Checks required for driving a coordinator from the CLI.
    pub fn validate(&self) -> Result<()> {
        if self.hosts.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one host is required (config `hosts` or --hosts)".into(),
            ));
        }
        self.retry.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retry_config() {
        let retry = RetryConfig::default();
        assert_eq!(retry.max_attempts, 3);
        let policy = retry.policy();
        assert_eq!(policy.multiplier, Duration::from_secs(1));
        assert_eq!(policy.min_wait, Duration::from_secs(1));
        assert_eq!(policy.max_wait, Duration::from_secs(10));
        assert_eq!(policy.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_retry_validation() {
        let zero_attempts = RetryConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(zero_attempts.validate().is_err());

        let inverted = RetryConfig {
            min_wait_ms: 5_000,
            max_wait_ms: 1_000,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let no_timeout = RetryConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(no_timeout.validate().is_err());

        assert!(RetryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_requires_hosts() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let config = Config {
            hosts: vec![Host::new("http://localhost:8001")],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
