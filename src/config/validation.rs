//! Configuration validation

use crate::config::settings::Settings;
use crate::utils::errors::TaskBuddyError;

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a loaded settings structure
pub fn validate_settings(settings: &Settings) -> Result<(), TaskBuddyError> {
    if !VALID_LEVELS.contains(&settings.logging.level.as_str()) {
        return Err(TaskBuddyError::Config(format!(
            "unknown log level '{}'",
            settings.logging.level
        )));
    }

    if settings.logging.file_path.is_empty() {
        return Err(TaskBuddyError::Config(
            "logging.file_path must not be empty".to_string(),
        ));
    }

    if settings.scheduling.daily_run_hour > 23 {
        return Err(TaskBuddyError::Config(format!(
            "scheduling.daily_run_hour {} is out of range 0..=23",
            settings.scheduling.daily_run_hour
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_settings_validate() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(
            validate_settings(&settings),
            Err(TaskBuddyError::Config(_))
        );
    }

    #[test]
    fn test_out_of_range_run_hour_rejected() {
        let mut settings = Settings::default();
        settings.scheduling.daily_run_hour = 24;
        assert_matches!(
            validate_settings(&settings),
            Err(TaskBuddyError::Config(_))
        );
    }
}
