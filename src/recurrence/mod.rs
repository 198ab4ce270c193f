//! Recurrence engine
//!
//! The pure core of TaskBuddy: rule definitions, next-date projection and
//! window generation. Everything here is synchronous, side-effect free and
//! bounded; callers inject the current date.

pub mod generator;
pub mod projector;
pub mod rule;

pub use generator::{project_instances, window_end, MAX_PROJECTED_DATES};
pub use projector::next_date;
pub use rule::RecurrenceRule;
