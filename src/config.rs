//! Configuration management for the model serving core

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Registry and simulation timing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Simulated model load latency in milliseconds
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,
    /// Simulated training duration in milliseconds
    #[serde(default = "default_train_delay_ms")]
    pub train_delay_ms: u64,
}

impl RegistryConfig {
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn train_delay(&self) -> Duration {
        Duration::from_millis(self.train_delay_ms)
    }
}

fn default_load_delay_ms() -> u64 {
    150
}

fn default_train_delay_ms() -> u64 {
    400
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: default_load_delay_ms(),
            train_delay_ms: default_train_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.registry.load_delay_ms, 150);
        assert_eq!(config.registry.train_delay_ms, 400);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_delay_conversions() {
        let registry = RegistryConfig {
            load_delay_ms: 10,
            train_delay_ms: 20,
        };
        assert_eq!(registry.load_delay(), Duration::from_millis(10));
        assert_eq!(registry.train_delay(), Duration::from_millis(20));
    }
}
