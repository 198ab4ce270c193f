//! Role and capability model for group-owned resources

pub mod capabilities;
pub mod roles;

pub use capabilities::{can_leave_group, can_remove_member, role_allows, GroupAction};
pub use roles::GroupRole;
