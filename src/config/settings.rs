//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub scheduling: SchedulingConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Scheduling trigger configuration
///
/// The core itself never reads a clock; these knobs belong to the embedding
/// application's trigger (app launch hook or periodic job).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulingConfig {
    /// Run a generation sweep when the application starts.
    pub run_on_launch: bool,
    /// Hour of day (0..=23) for the periodic generation sweep.
    pub daily_run_hour: u8,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub shared_groups: bool,
    pub notifications: bool,
}

impl Settings {
    /// Load settings from the default configuration file and environment
    /// variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("TASKBUDDY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load settings from an explicit file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::TaskBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scheduling: SchedulingConfig {
                run_on_launch: true,
                daily_run_hour: 6,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
            features: FeaturesConfig {
                shared_groups: true,
                notifications: true,
            },
        }
    }
}
