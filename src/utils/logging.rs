//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for TaskBuddy.

use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard must be held for the lifetime of the application or
/// buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "taskbuddy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log one generation run for a template
pub fn log_generation_run(template_id: Uuid, existing_count: usize, created_count: usize) {
    if created_count > 0 {
        info!(
            %template_id,
            existing_count = existing_count,
            created_count = created_count,
            "Task instances generated"
        );
    } else {
        debug!(%template_id, existing_count = existing_count, "Generation run created nothing new");
    }
}

/// Log group membership and settings events
pub fn log_group_event(group_id: i64, event: &str, user_id: Option<i64>) {
    info!(
        group_id = group_id,
        event = event,
        user_id = user_id,
        "Group event occurred"
    );
}

/// Log template management actions
pub fn log_template_action(template_id: Uuid, action: &str, user_id: i64) {
    info!(
        %template_id,
        action = action,
        user_id = user_id,
        "Template action performed"
    );
}

/// Log denied mutations; these are surfaced to the caller as
/// permission-denied outcomes, never silently downgraded
pub fn log_permission_denied(user_id: i64, action: &str, detail: &str) {
    warn!(
        user_id = user_id,
        action = action,
        detail = detail,
        "Permission denied"
    );
}
