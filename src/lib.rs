//! TaskBuddy core library
//!
//! The heart of a personal/shared task-reminder application: recurrence
//! rules with deterministic next-date projection, bounded instance-window
//! generation, and a role/capability model for group-owned templates,
//! tasks and membership. Rendering, notification delivery, identity and
//! durable persistence are external collaborators; everything here is
//! driven by explicit inputs.

#![allow(non_snake_case)]

pub mod config;
pub mod models;
pub mod permissions;
pub mod recurrence;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use models::{Group, GroupMember, ScheduleTemplate, TaskInstance};
pub use permissions::{GroupAction, GroupRole};
pub use recurrence::{next_date, project_instances, RecurrenceRule};
pub use services::ServiceFactory;
pub use utils::errors::{Result, TaskBuddyError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
