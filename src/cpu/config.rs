//! Datapath configuration.
//!
//! Every option has a default, so a JSON config file only needs the fields
//! it changes:
//!
//! ```json
//! { "memorySize": 64, "clockIntervalMs": 250 }
//! ```

use std::time::Duration;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Default number of memory cells. MAR is a byte, so this is also the maximum.
pub const DEFAULT_MEMORY_SIZE: usize = 256;

/// Default number of general registers, `R[0]` to `R[7]`.
pub const DEFAULT_REGISTER_COUNT: usize = 8;

/// Default delay between automatic steps.
pub const DEFAULT_CLOCK_INTERVAL_MS: u64 = 1000;

/// Sizing and timing of a [`crate::cpu::Datapath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DatapathConfig {
    /// Number of memory cells (1-256).
    #[serde(default = "DatapathConfig::default_memory_size")]
    pub memory_size: usize,

    /// Number of general registers (1-256).
    #[serde(default = "DatapathConfig::default_register_count")]
    pub register_count: usize,

    /// Milliseconds between steps while running.
    #[serde(default = "DatapathConfig::default_clock_interval_ms")]
    pub clock_interval_ms: u64,
}

impl DatapathConfig {
    fn default_memory_size() -> usize {
        DEFAULT_MEMORY_SIZE
    }

    fn default_register_count() -> usize {
        DEFAULT_REGISTER_COUNT
    }

    fn default_clock_interval_ms() -> u64 {
        DEFAULT_CLOCK_INTERVAL_MS
    }

    /// Start a builder from the defaults.
    pub fn builder() -> DatapathConfigBuilder {
        DatapathConfigBuilder { config: Self::default() }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Delay between automatic steps.
    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    /// Check every option is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=DEFAULT_MEMORY_SIZE).contains(&self.memory_size) {
            return Err(ConfigError::MemorySize(self.memory_size));
        }
        if !(1..=256).contains(&self.register_count) {
            return Err(ConfigError::RegisterCount(self.register_count));
        }
        if self.clock_interval_ms == 0 {
            return Err(ConfigError::ClockInterval);
        }
        Ok(())
    }
}

impl Default for DatapathConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            register_count: DEFAULT_REGISTER_COUNT,
            clock_interval_ms: DEFAULT_CLOCK_INTERVAL_MS,
        }
    }
}

/// Builder for [`DatapathConfig`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct DatapathConfigBuilder {
    config: DatapathConfig,
}

impl DatapathConfigBuilder {
    pub fn memory_size(mut self, cells: usize) -> Self {
        self.config.memory_size = cells;
        self
    }

    pub fn register_count(mut self, count: usize) -> Self {
        self.config.register_count = count;
        self
    }

    pub fn clock_interval(mut self, interval: Duration) -> Self {
        self.config.clock_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn build(self) -> Result<DatapathConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Errors that can occur when building a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("memory size {0} out of range (1-256)")]
    MemorySize(usize),

    #[error("register count {0} out of range (1-256)")]
    RegisterCount(usize),

    #[error("clock interval must be at least 1 ms")]
    ClockInterval,

    #[error("invalid config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DatapathConfig::default();
        assert_eq!(config.memory_size, 256);
        assert_eq!(config.register_count, 8);
        assert_eq!(config.clock_interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = DatapathConfig::builder()
            .memory_size(16)
            .register_count(4)
            .clock_interval(Duration::from_millis(50))
            .build()
            .unwrap();
        assert_eq!(config.memory_size, 16);
        assert_eq!(config.register_count, 4);
        assert_eq!(config.clock_interval_ms, 50);
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert_eq!(
            DatapathConfig::builder().memory_size(0).build(),
            Err(ConfigError::MemorySize(0))
        );
        assert_eq!(
            DatapathConfig::builder().memory_size(257).build(),
            Err(ConfigError::MemorySize(257))
        );
        assert_eq!(
            DatapathConfig::builder().register_count(0).build(),
            Err(ConfigError::RegisterCount(0))
        );
        assert_eq!(
            DatapathConfig::builder().clock_interval(Duration::ZERO).build(),
            Err(ConfigError::ClockInterval)
        );
    }

    #[test]
    fn test_json_partial() {
        let config = DatapathConfig::from_json(r#"{ "memorySize": 64 }"#).unwrap();
        assert_eq!(config.memory_size, 64);
        assert_eq!(config.register_count, DEFAULT_REGISTER_COUNT);
        assert_eq!(config.clock_interval_ms, DEFAULT_CLOCK_INTERVAL_MS);
    }

    #[test]
    fn test_json_rejects_unknown_and_invalid() {
        assert!(matches!(
            DatapathConfig::from_json(r#"{ "memorySise": 64 }"#),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(
            DatapathConfig::from_json(r#"{ "registerCount": 1000 }"#),
            Err(ConfigError::RegisterCount(1000))
        );
    }

    #[test]
    fn test_json_keys_match_snapshots() {
        let json = serde_json::to_value(DatapathConfig::default()).unwrap();
        assert_eq!(json["memorySize"], 256);
        assert_eq!(json["registerCount"], 8);
        assert_eq!(json["clockIntervalMs"], 1000);

        assert!(matches!(
            DatapathConfig::from_json(r#"{ "memory_size": 64 }"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
