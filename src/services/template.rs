//! Template service implementation
//!
//! CRUD over schedule templates with creation-time rule validation and
//! role checks for group-owned templates. Personal templates answer only
//! to their creator.

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::template::{CreateTemplateRequest, ScheduleTemplate, UpdateTemplateRequest};
use crate::permissions::capabilities::{role_allows, GroupAction};
use crate::storage::memory::{GroupRepository, TemplateRepository};
use crate::utils::errors::{Result, TaskBuddyError};
use crate::utils::logging::log_template_action;

/// Template service for schedule template management
#[derive(Clone)]
pub struct TemplateService {
    template_repository: TemplateRepository,
    group_repository: GroupRepository,
}

impl TemplateService {
    /// Create a new TemplateService instance
    pub fn new(template_repository: TemplateRepository, group_repository: GroupRepository) -> Self {
        Self {
            template_repository,
            group_repository,
        }
    }

    /// Create a template. The recurrence rule is validated up front so
    /// malformed parameters are rejected here instead of silently
    /// degrading at projection time.
    pub async fn create_template(&self, request: CreateTemplateRequest) -> Result<ScheduleTemplate> {
        request.rule.validate()?;
        self.authorize(request.group_id, request.created_by, request.created_by, GroupAction::CreateTemplate)
            .await?;

        let template = self.template_repository.create(request).await?;
        log_template_action(template.id, "template_created", template.created_by);
        Ok(template)
    }

    pub async fn get_template(&self, template_id: Uuid) -> Result<Option<ScheduleTemplate>> {
        self.template_repository.find_by_id(template_id).await
    }

    /// Update a template. Owner/Admin for group templates.
    pub async fn update_template(
        &self,
        requester_id: i64,
        template_id: Uuid,
        request: UpdateTemplateRequest,
    ) -> Result<ScheduleTemplate> {
        if let Some(rule) = &request.rule {
            rule.validate()?;
        }

        let template = self
            .template_repository
            .find_by_id(template_id)
            .await?
            .ok_or(TaskBuddyError::TemplateNotFound { template_id })?;
        self.authorize(template.group_id, template.created_by, requester_id, GroupAction::UpdateTemplate)
            .await?;

        let template = self.template_repository.update(template_id, request).await?;
        log_template_action(template_id, "template_updated", requester_id);
        Ok(template)
    }

    /// Retire a template: it keeps its record and its instances but stops
    /// projecting new ones.
    pub async fn retire_template(&self, requester_id: i64, template_id: Uuid) -> Result<ScheduleTemplate> {
        let request = UpdateTemplateRequest {
            is_active: Some(false),
            ..Default::default()
        };
        let template = self.update_template(requester_id, template_id, request).await?;
        debug!(%template_id, user_id = requester_id, "Template retired");
        Ok(template)
    }

    /// Delete a template outright. Owner/Admin for group templates.
    pub async fn delete_template(&self, requester_id: i64, template_id: Uuid) -> Result<()> {
        let template = self
            .template_repository
            .find_by_id(template_id)
            .await?
            .ok_or(TaskBuddyError::TemplateNotFound { template_id })?;
        self.authorize(template.group_id, template.created_by, requester_id, GroupAction::DeleteTemplate)
            .await?;

        self.template_repository.delete(template_id).await?;
        info!(%template_id, user_id = requester_id, "Template deleted");
        Ok(())
    }

    /// Capability check: group templates go through the role table,
    /// personal templates only answer to their creator.
    async fn authorize(
        &self,
        group_id: Option<i64>,
        owner_id: i64,
        requester_id: i64,
        action: GroupAction,
    ) -> Result<()> {
        match group_id {
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
                        "role {} may not perform {:?} in group {}",
                        role, action, group_id
                    )));
                }
                Ok(())
            }
            None if requester_id == owner_id => Ok(()),
            None => Err(TaskBuddyError::PermissionDenied(format!(
                "user {} does not own this template",
                requester_id
            ))),
        }
    }
}
