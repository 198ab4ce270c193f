//! Data models
//!
//! Plain record types exchanged with the persistence and identity
//! collaborators. The core never reads these from a global; everything is
//! passed in explicitly.

pub mod group;
pub mod task;
pub mod template;

pub use group::{AddMemberRequest, CreateGroupRequest, Group, GroupMember, UpdateGroupRequest};
pub use task::{CreateTaskRequest, TaskInstance, UpdateTaskRequest};
pub use template::{CreateTemplateRequest, ScheduleTemplate, UpdateTemplateRequest};
