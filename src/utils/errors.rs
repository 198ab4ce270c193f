//! Error handling for TaskBuddy
//!
//! This module defines the main error types used throughout the library
//! and provides a unified error handling strategy.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for TaskBuddy operations
#[derive(Error, Debug)]
pub enum TaskBuddyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Template not found: {template_id}")]
    TemplateNotFound { template_id: Uuid },

    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: Uuid },

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: i64 },

    #[error("User {user_id} is not a member of group {group_id}")]
    MemberNotFound { group_id: i64, user_id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for TaskBuddy operations
pub type Result<T> = std::result::Result<T, TaskBuddyError>;

impl TaskBuddyError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TaskBuddyError::Config(_) => ErrorSeverity::Critical,
            TaskBuddyError::PermissionDenied(_) => ErrorSeverity::Warning,
            TaskBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            TaskBuddyError::Io(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
