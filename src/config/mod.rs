//! Configuration module

pub mod settings;
pub mod validation;

pub use settings::{FeaturesConfig, LoggingConfig, SchedulingConfig, Settings};
