//! Services module
//!
//! This module contains business logic services

pub mod group;
pub mod scheduler;
pub mod template;

// Re-export commonly used services
pub use group::GroupService;
pub use scheduler::SchedulerService;
pub use template::TemplateService;

use crate::storage::memory::{GroupRepository, TaskRepository, TemplateRepository};

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub scheduler_service: SchedulerService,
    pub group_service: GroupService,
    pub template_service: TemplateService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services wired over the given
    /// repositories
    pub fn new(
        template_repository: TemplateRepository,
        task_repository: TaskRepository,
        group_repository: GroupRepository,
    ) -> Self {
        let scheduler_service = SchedulerService::new(
            template_repository.clone(),
            task_repository,
            group_repository.clone(),
        );
        let group_service = GroupService::new(group_repository.clone());
        let template_service = TemplateService::new(template_repository, group_repository);

        Self {
            scheduler_service,
            group_service,
            template_service,
        }
    }

    /// Factory over fresh in-memory repositories
    pub fn in_memory() -> Self {
        Self::new(
            TemplateRepository::new(),
            TaskRepository::new(),
            GroupRepository::new(),
        )
    }
}
