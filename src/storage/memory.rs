//! In-memory repository implementations
//!
//! These repositories are the persistence collaborator seen by the
//! services: they hand out template records and existing instance dates,
//! and accept idempotent instance upserts keyed by
//! `(template_id, scheduled_date)`. The upsert keying makes concurrent
//! generation runs for the same template safe to race without a lock.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::group::{AddMemberRequest, CreateGroupRequest, Group, GroupMember, UpdateGroupRequest};
use crate::models::task::{CreateTaskRequest, TaskInstance, UpdateTaskRequest};
use crate::models::template::{CreateTemplateRequest, ScheduleTemplate, UpdateTemplateRequest};
use crate::permissions::roles::GroupRole;
use crate::utils::errors::{Result, TaskBuddyError};

/// Template repository over in-memory state
#[derive(Clone, Default)]
pub struct TemplateRepository {
    templates: Arc<RwLock<HashMap<Uuid, ScheduleTemplate>>>,
}

impl TemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new template. The start date defaults to the current day.
    pub async fn create(&self, request: CreateTemplateRequest) -> Result<ScheduleTemplate> {
        let now = Utc::now();
        let template = ScheduleTemplate {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            rule: request.rule,
            requires_completion: request.requires_completion,
            is_active: true,
            group_id: request.group_id,
            created_by: request.created_by,
            start_date: request.start_date.unwrap_or_else(|| now.date_naive()),
            last_completed_date: None,
            created_at: now,
            updated_at: now,
        };

        self.templates.write().await.insert(template.id, template.clone());
        Ok(template)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ScheduleTemplate>> {
        Ok(self.templates.read().await.get(&id).cloned())
    }

    /// Apply a partial update; absent fields keep their current value.
    pub async fn update(&self, id: Uuid, request: UpdateTemplateRequest) -> Result<ScheduleTemplate> {
        let mut templates = self.templates.write().await;
        let template = templates
            .get_mut(&id)
            .ok_or(TaskBuddyError::TemplateNotFound { template_id: id })?;

        if let Some(title) = request.title {
            template.title = title;
        }
        if let Some(description) = request.description {
            template.description = Some(description);
        }
        if let Some(rule) = request.rule {
            template.rule = rule;
        }
        if let Some(requires_completion) = request.requires_completion {
            template.requires_completion = requires_completion;
        }
        if let Some(is_active) = request.is_active {
            template.is_active = is_active;
        }
        template.updated_at = Utc::now();

        Ok(template.clone())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.templates
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskBuddyError::TemplateNotFound { template_id: id })
    }

    pub async fn list_active(&self) -> Result<Vec<ScheduleTemplate>> {
        let mut active: Vec<ScheduleTemplate> = self
            .templates
            .read()
            .await
            .values()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        active.sort_by_key(|t| t.created_at);
        Ok(active)
    }

    /// Record a completion as the new projection base date.
    pub async fn set_last_completed(&self, id: Uuid, date: NaiveDate) -> Result<ScheduleTemplate> {
        let mut templates = self.templates.write().await;
        let template = templates
            .get_mut(&id)
            .ok_or(TaskBuddyError::TemplateNotFound { template_id: id })?;

        template.last_completed_date = Some(date);
        template.updated_at = Utc::now();
        Ok(template.clone())
    }
}

/// Task instance repository over in-memory state
#[derive(Clone, Default)]
pub struct TaskRepository {
    state: Arc<RwLock<TaskState>>,
}

#[derive(Default)]
struct TaskState {
    tasks: HashMap<Uuid, TaskInstance>,
    // (template_id, scheduled_date) -> task id; the idempotency key
    by_schedule: HashMap<(Uuid, NaiveDate), Uuid>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an instance for `(template_id, scheduled_date)` unless one
    /// already exists, in which case the existing instance is returned
    /// untouched.
    pub async fn upsert_instance(&self, request: CreateTaskRequest) -> Result<TaskInstance> {
        let mut state = self.state.write().await;
        let key = (request.template_id, request.scheduled_date);

        if let Some(existing_id) = state.by_schedule.get(&key) {
            if let Some(existing) = state.tasks.get(existing_id) {
                return Ok(existing.clone());
            }
        }

        let now = Utc::now();
        let task = TaskInstance {
            id: Uuid::new_v4(),
            template_id: request.template_id,
            group_id: request.group_id,
            title: request.title,
            scheduled_date: request.scheduled_date,
            recurrence: request.recurrence,
            completed_at: None,
            completed_by: None,
            created_at: now,
            updated_at: now,
        };

        state.by_schedule.insert(key, task.id);
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TaskInstance>> {
        Ok(self.state.read().await.tasks.get(&id).cloned())
    }

    /// All scheduled dates that already have an instance for the template.
    pub async fn scheduled_dates(&self, template_id: Uuid) -> Result<BTreeSet<NaiveDate>> {
        Ok(self
            .state
            .read()
            .await
            .by_schedule
            .keys()
            .filter(|(tid, _)| *tid == template_id)
            .map(|(_, date)| *date)
            .collect())
    }

    pub async fn list_for_template(&self, template_id: Uuid) -> Result<Vec<TaskInstance>> {
        let mut tasks: Vec<TaskInstance> = self
            .state
            .read()
            .await
            .tasks
            .values()
            .filter(|t| t.template_id == template_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.scheduled_date);
        Ok(tasks)
    }

    pub async fn update(&self, id: Uuid, request: UpdateTaskRequest) -> Result<TaskInstance> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskBuddyError::TaskNotFound { task_id: id })?;

        if let Some(title) = request.title {
            task.title = title;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    pub async fn mark_completed(
        &self,
        id: Uuid,
        completed_by: i64,
        completed_at: DateTime<Utc>,
    ) -> Result<TaskInstance> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskBuddyError::TaskNotFound { task_id: id })?;

        task.completed_at = Some(completed_at);
        task.completed_by = Some(completed_by);
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .remove(&id)
            .ok_or(TaskBuddyError::TaskNotFound { task_id: id })?;
        state
            .by_schedule
            .remove(&(task.template_id, task.scheduled_date));
        Ok(())
    }
}

/// Group repository over in-memory state
#[derive(Clone, Default)]
pub struct GroupRepository {
    state: Arc<RwLock<GroupState>>,
}

#[derive(Default)]
struct GroupState {
    groups: HashMap<i64, Group>,
    members: HashMap<i64, Vec<GroupMember>>,
    next_group_id: i64,
}

impl GroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group; the creator becomes its sole Owner.
    pub async fn create(&self, request: CreateGroupRequest) -> Result<Group> {
        let mut state = self.state.write().await;
        state.next_group_id += 1;

        let now = Utc::now();
        let group = Group {
            id: state.next_group_id,
            title: request.title,
            description: request.description,
            owner_id: request.owner_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        state.groups.insert(group.id, group.clone());
        state.members.insert(
            group.id,
            vec![GroupMember {
                group_id: group.id,
                user_id: request.owner_id,
                role: GroupRole::Owner,
                joined_at: now,
            }],
        );
        Ok(group)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Group>> {
        Ok(self.state.read().await.groups.get(&id).cloned())
    }

    pub async fn update(&self, id: i64, request: UpdateGroupRequest) -> Result<Group> {
        let mut state = self.state.write().await;
        let group = state
            .groups
            .get_mut(&id)
            .ok_or(TaskBuddyError::GroupNotFound { group_id: id })?;

        if let Some(title) = request.title {
            group.title = title;
        }
        if let Some(description) = request.description {
            group.description = Some(description);
        }
        if let Some(is_active) = request.is_active {
            group.is_active = is_active;
        }
        group.updated_at = Utc::now();
        Ok(group.clone())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .groups
            .remove(&id)
            .ok_or(TaskBuddyError::GroupNotFound { group_id: id })?;
        state.members.remove(&id);
        Ok(())
    }

    /// Hand ownership from `old_owner_id` to `new_owner_id`: demote the
    /// old owner to Admin, promote the new one to Owner and repoint the
    /// group, all under a single write lock. A concurrent member removal
    /// can therefore never observe (or produce) a group without exactly
    /// one Owner; if the target is no longer a member, nothing changes.
    pub async fn transfer_ownership(
        &self,
        group_id: i64,
        old_owner_id: i64,
        new_owner_id: i64,
    ) -> Result<Group> {
        let mut state = self.state.write().await;
        if !state.groups.contains_key(&group_id) {
            return Err(TaskBuddyError::GroupNotFound { group_id });
        }

        let members = state
            .members
            .get_mut(&group_id)
            .ok_or(TaskBuddyError::GroupNotFound { group_id })?;
        if !members.iter().any(|m| m.user_id == new_owner_id) {
            return Err(TaskBuddyError::MemberNotFound { group_id, user_id: new_owner_id });
        }

        for member in members.iter_mut() {
            if member.user_id == old_owner_id {
                member.role = GroupRole::Admin;
            } else if member.user_id == new_owner_id {
                member.role = GroupRole::Owner;
            }
        }

        let group = state
            .groups
            .get_mut(&group_id)
            .ok_or(TaskBuddyError::GroupNotFound { group_id })?;
        group.owner_id = new_owner_id;
        group.updated_at = Utc::now();
        Ok(group.clone())
    }

    pub async fn add_member(&self, request: AddMemberRequest) -> Result<GroupMember> {
        let mut state = self.state.write().await;
        if !state.groups.contains_key(&request.group_id) {
            return Err(TaskBuddyError::GroupNotFound { group_id: request.group_id });
        }

        let member = GroupMember {
            group_id: request.group_id,
            user_id: request.user_id,
            role: request.role.unwrap_or(GroupRole::Member),
            joined_at: Utc::now(),
        };

        let members = state.members.entry(request.group_id).or_default();
        if members.iter().any(|m| m.user_id == request.user_id) {
            return Err(TaskBuddyError::InvalidInput(format!(
                "user {} is already a member of group {}",
                request.user_id, request.group_id
            )));
        }
        members.push(member.clone());
        Ok(member)
    }

    pub async fn remove_member(&self, group_id: i64, user_id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        let members = state
            .members
            .get_mut(&group_id)
            .ok_or(TaskBuddyError::GroupNotFound { group_id })?;

        let before = members.len();
        members.retain(|m| m.user_id != user_id);
        if members.len() == before {
            return Err(TaskBuddyError::MemberNotFound { group_id, user_id });
        }
        Ok(())
    }

    pub async fn get_members(&self, group_id: i64) -> Result<Vec<GroupMember>> {
        self.state
            .read()
            .await
            .members
            .get(&group_id)
            .cloned()
            .ok_or(TaskBuddyError::GroupNotFound { group_id })
    }

    /// Role of a user within a group, `None` when not a member.
    pub async fn role_of(&self, group_id: i64, user_id: i64) -> Result<Option<GroupRole>> {
        Ok(self
            .state
            .read()
            .await
            .members
            .get(&group_id)
            .and_then(|members| members.iter().find(|m| m.user_id == user_id))
            .map(|m| m.role))
    }

    pub async fn update_member_role(
        &self,
        group_id: i64,
        user_id: i64,
        role: GroupRole,
    ) -> Result<GroupMember> {
        let mut state = self.state.write().await;
        let members = state
            .members
            .get_mut(&group_id)
            .ok_or(TaskBuddyError::GroupNotFound { group_id })?;

        let member = members
            .iter_mut()
            .find(|m| m.user_id == user_id)
            .ok_or(TaskBuddyError::MemberNotFound { group_id, user_id })?;
        member.role = role;
        Ok(member.clone())
    }
}
