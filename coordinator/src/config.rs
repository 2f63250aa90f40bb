//! Coordinator configuration.
//!
//! These knobs are handed to the engine at construction time by the
//! embedding layer. Per-call timeout or cancellation parameters are
//! deliberately absent from the transactional verbs.

use std::time::Duration;

use shardtx_common::{Result, ShardTxError};

/// Transaction timing configuration.
#[derive(Debug, Clone)]
pub struct TransactionConfig {
    /// Default transaction timeout applied by the engine.
    pub default_timeout: Duration,
    /// Maximum transaction timeout the engine will accept.
    pub max_timeout: Duration,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(30),
            max_timeout: Duration::from_secs(300),
        }
    }
}

/// Crash recovery configuration.
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Interval between engine scans for in-doubt transactions.
    pub scan_interval: Duration,
    /// Directory for the engine's recovery log.
    pub log_dir: String,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            scan_interval: Duration::from_secs(60),
            log_dir: "/var/lib/shardtx/recovery".to_string(),
        }
    }
}

/// Main coordinator configuration.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Node ID (must be unique within the deployment).
    pub node_id: Option<String>,
    /// Transaction timing configuration.
    pub transaction: TransactionConfig,
    /// Crash recovery configuration.
    pub recovery: RecoveryConfig,
    /// Log level.
    pub log_level: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            node_id: None,
            transaction: TransactionConfig::default(),
            recovery: RecoveryConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl CoordinatorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(node_id) = std::env::var("SHARDTX_NODE_ID") {
            config.node_id = Some(node_id);
        }

        if let Ok(secs) = std::env::var("SHARDTX_TX_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.transaction.default_timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(secs) = std::env::var("SHARDTX_RECOVERY_SCAN_SECS") {
            if let Ok(secs) = secs.parse() {
                config.recovery.scan_interval = Duration::from_secs(secs);
            }
        }

        if let Ok(dir) = std::env::var("SHARDTX_RECOVERY_LOG_DIR") {
            config.recovery.log_dir = dir;
        }

        if let Ok(level) = std::env::var("SHARDTX_LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.transaction.default_timeout.is_zero() {
            return Err(ShardTxError::Configuration(
                "Default transaction timeout cannot be zero".to_string(),
            ));
        }

        if self.transaction.default_timeout > self.transaction.max_timeout {
            return Err(ShardTxError::Configuration(
                "Default transaction timeout cannot exceed max timeout".to_string(),
            ));
        }

        if self.recovery.log_dir.is_empty() {
            return Err(ShardTxError::Configuration(
                "Recovery log directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoordinatorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = CoordinatorConfig::default();
        config.transaction.default_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_timeout_bounded_by_max() {
        let mut config = CoordinatorConfig::default();
        config.transaction.default_timeout = Duration::from_secs(600);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_dir_rejected() {
        let mut config = CoordinatorConfig::default();
        config.recovery.log_dir.clear();
        assert!(config.validate().is_err());
    }
}
