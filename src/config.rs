//! Configuration system.
//!
//! Hierarchical configuration loading: a base `config.toml`, an optional
//! git-ignored `config.local.toml`, then environment variables, merged via
//! `figment`.
//!
//! ## Example
//!
//! ```toml
//! [scheduler]
//! max_predator_size = 4
//! max_cluster_size = 1024
//! ```
//!
//! Environment overrides:
//! ```bash
//! STATE_ALGEBRA_SCHEDULER__MAX_PREDATOR_SIZE=6
//! ```

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Compilation scheduler tuning.
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tunable parameters for the compilation scheduler.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Threshold separating predators from prey in Phase 1.
    #[serde(default = "default_max_predator_size")]
    pub max_predator_size: usize,

    /// Cap on intermediate StateVector size during Jaccard clustering.
    #[serde(default = "default_max_cluster_size")]
    pub max_cluster_size: usize,
}

fn default_max_predator_size() -> usize {
    4
}
fn default_max_cluster_size() -> usize {
    1024
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            max_predator_size: default_max_predator_size(),
            max_cluster_size: default_max_cluster_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// Merges in order: `config.toml`, `config.local.toml`, then
    /// `STATE_ALGEBRA_*` environment variables (`__` as the nesting
    /// separator).
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Toml::file("config.local.toml"))
            .merge(Env::prefixed("STATE_ALGEBRA_").split("__"))
            .extract()
    }

    /// Load configuration from a specific file path.
    pub fn from_file(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("STATE_ALGEBRA_").split("__"))
            .extract()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheduler: SchedulerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.scheduler.max_predator_size, 4);
        assert_eq!(config.scheduler.max_cluster_size, 1024);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("[scheduler]"));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scheduler.max_predator_size, config.scheduler.max_predator_size);
    }
}
