//! Scheduler service implementation
//!
//! Materializes projected occurrence dates into task instances and records
//! completions. Generation is idempotent: the projection output is diffed
//! against the dates already stored for the template, and the upsert is
//! keyed by `(template_id, scheduled_date)`, so re-running for the same
//! day never duplicates an instance.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::task::{CreateTaskRequest, TaskInstance, UpdateTaskRequest};
use crate::models::template::ScheduleTemplate;
use crate::permissions::capabilities::{role_allows, GroupAction};
use crate::recurrence::generator::project_instances;
use crate::storage::memory::{GroupRepository, TaskRepository, TemplateRepository};
use crate::utils::errors::{Result, TaskBuddyError};
use crate::utils::logging::log_generation_run;

/// Scheduler service for instance generation and completion
#[derive(Clone)]
pub struct SchedulerService {
    template_repository: TemplateRepository,
    task_repository: TaskRepository,
    group_repository: GroupRepository,
}

impl SchedulerService {
    /// Create a new SchedulerService instance
    pub fn new(
        template_repository: TemplateRepository,
        task_repository: TaskRepository,
        group_repository: GroupRepository,
    ) -> Self {
        Self {
            template_repository,
            task_repository,
            group_repository,
        }
    }

    /// Generate the missing task instances for one template.
    ///
    /// `today` is injected by the scheduling trigger, never read from a
    /// clock here, so runs are deterministic and testable.
    pub async fn generate_for_template(
        &self,
        template_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<TaskInstance>> {
        let template = self
            .template_repository
            .find_by_id(template_id)
            .await?
            .ok_or(TaskBuddyError::TemplateNotFound { template_id })?;

        self.generate(&template, today).await
    }

    /// Run generation over every active template.
    pub async fn generate_all(&self, today: NaiveDate) -> Result<Vec<TaskInstance>> {
        let templates = self.template_repository.list_active().await?;
        debug!(template_count = templates.len(), %today, "Starting generation sweep");

        let mut created = Vec::new();
        for template in &templates {
            created.extend(self.generate(template, today).await?);
        }

        info!(
            template_count = templates.len(),
            created_count = created.len(),
            "Generation sweep finished"
        );
        Ok(created)
    }

    async fn generate(&self, template: &ScheduleTemplate, today: NaiveDate) -> Result<Vec<TaskInstance>> {
        let existing = self.task_repository.scheduled_dates(template.id).await?;
        let projected = project_instances(template, today, &existing);

        let mut created = Vec::new();
        for date in projected {
            if existing.contains(&date) {
                continue;
            }
            let task = self
                .task_repository
                .upsert_instance(CreateTaskRequest {
                    template_id: template.id,
                    group_id: template.group_id,
                    title: template.title.clone(),
                    scheduled_date: date,
                    recurrence: template.rule.clone(),
                })
                .await?;
            created.push(task);
        }

        log_generation_run(template.id, existing.len(), created.len());
        Ok(created)
    }

    /// Mark a task instance completed and feed the completion date back as
    /// the template's new projection base.
    pub async fn complete_task(
        &self,
        requester_id: i64,
        task_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<TaskInstance> {
        let task = self
            .task_repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskBuddyError::TaskNotFound { task_id })?;

        self.authorize_task(&task, requester_id, GroupAction::UpdateTask)
            .await?;

        let task = self
            .task_repository
            .mark_completed(task_id, requester_id, completed_at)
            .await?;

        match self
            .template_repository
            .set_last_completed(task.template_id, completed_at.date_naive())
            .await
        {
            Ok(_) => {}
            Err(TaskBuddyError::TemplateNotFound { template_id }) => {
                // Completing an orphaned instance is fine; there is just no
                // base date left to advance.
                warn!(%template_id, %task_id, "Completed task references a deleted template");
            }
            Err(e) => return Err(e),
        }

        info!(%task_id, user_id = requester_id, "Task completed");
        Ok(task)
    }

    /// Update a task instance. Any group member may do this.
    pub async fn update_task(
        &self,
        requester_id: i64,
        task_id: Uuid,
        request: UpdateTaskRequest,
    ) -> Result<TaskInstance> {
        let task = self
            .task_repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskBuddyError::TaskNotFound { task_id })?;

        self.authorize_task(&task, requester_id, GroupAction::UpdateTask)
            .await?;
        self.task_repository.update(task_id, request).await
    }

    /// Delete a task instance. Owner/Admin only for group tasks.
    pub async fn delete_task(&self, requester_id: i64, task_id: Uuid) -> Result<()> {
        let task = self
            .task_repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskBuddyError::TaskNotFound { task_id })?;

        self.authorize_task(&task, requester_id, GroupAction::DeleteTask)
            .await?;
        self.task_repository.delete(task_id).await?;

        info!(%task_id, user_id = requester_id, "Task deleted");
        Ok(())
    }

    pub async fn get_task(&self, task_id: Uuid) -> Result<Option<TaskInstance>> {
        self.task_repository.find_by_id(task_id).await
    }

    pub async fn list_tasks_for_template(&self, template_id: Uuid) -> Result<Vec<TaskInstance>> {
        self.task_repository.list_for_template(template_id).await
    }

    /// Capability check for a task mutation. Group tasks go through the
    /// role table; personal tasks are only touchable by the template
    /// creator.
    async fn authorize_task(
        &self,
        task: &TaskInstance,
        requester_id: i64,
        action: GroupAction,
    ) -> Result<()> {
        match task.group_id {
            Some(group_id) => {
                let role = self
                    .group_repository
                    .role_of(group_id, requester_id)
                    .await?
                    .ok_or_else(|| {
                        TaskBuddyError::PermissionDenied(format!(
                            "user {} is not a member of group {}",
                            requester_id, group_id
                        ))
                    })?;

                if !role_allows(role, action) {
                    return Err(TaskBuddyError::PermissionDenied(format!(
                        "role {} may not perform {:?}",
                        role, action
                    )));
                }
                Ok(())
            }
            None => {
                let template = self
                    .template_repository
                    .find_by_id(task.template_id)
                    .await?;
                let owner_id = template.map(|t| t.created_by);
                if owner_id == Some(requester_id) {
                    Ok(())
                } else {
                    Err(TaskBuddyError::PermissionDenied(format!(
                        "user {} does not own task {}",
                        requester_id, task.id
                    )))
                }
            }
        }
    }
}
