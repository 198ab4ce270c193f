//! Configuration loading tests

use std::io::Write;

use assert_matches::assert_matches;

use TaskBuddy::config::Settings;
use TaskBuddy::TaskBuddyError;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_settings_from_toml_file() {
    let file = write_config(
        r#"
[scheduling]
run_on_launch = false
daily_run_hour = 5

[logging]
level = "debug"
file_path = "logs"

[features]
shared_groups = true
notifications = false
"#,
    );

    let settings = Settings::from_file(file.path()).unwrap();
    assert!(!settings.scheduling.run_on_launch);
    assert_eq!(settings.scheduling.daily_run_hour, 5);
    assert_eq!(settings.logging.level, "debug");
    assert!(settings.features.shared_groups);
    assert!(!settings.features.notifications);
    assert!(settings.validate().is_ok());
}

#[test]
fn validation_catches_bad_values() {
    let file = write_config(
        r#"
[scheduling]
run_on_launch = true
daily_run_hour = 30

[logging]
level = "info"
file_path = "logs"

[features]
shared_groups = true
notifications = true
"#,
    );

    let settings = Settings::from_file(file.path()).unwrap();
    assert_matches!(settings.validate(), Err(TaskBuddyError::Config(_)));
}

#[test]
fn default_settings_are_valid() {
    let settings = Settings::default();
    assert!(settings.validate().is_ok());
}
