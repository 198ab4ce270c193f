//! Group service implementation
//!
//! Membership and group-settings mutations, each guarded by the role
//! capability checks before storage is touched. Sole-Owner protection
//! lives here: the capability table only answers who may do what, it does
//! not know how many Owners a group has.

use tracing::info;

use crate::models::group::{AddMemberRequest, CreateGroupRequest, Group, GroupMember, UpdateGroupRequest};
use crate::permissions::capabilities::{can_leave_group, can_remove_member, role_allows, GroupAction};
use crate::permissions::roles::GroupRole;
use crate::storage::memory::GroupRepository;
use crate::utils::errors::{Result, TaskBuddyError};
use crate::utils::logging::{log_group_event, log_permission_denied};

/// Group service for membership and settings management
#[derive(Clone)]
pub struct GroupService {
    group_repository: GroupRepository,
}

impl GroupService {
    /// Create a new GroupService instance
    pub fn new(group_repository: GroupRepository) -> Self {
        Self { group_repository }
    }

    /// Create a group. The creator becomes its sole Owner.
    pub async fn create_group(&self, request: CreateGroupRequest) -> Result<Group> {
        let owner_id = request.owner_id;
        let group = self.group_repository.create(request).await?;
        log_group_event(group.id, "group_created", Some(owner_id));
        Ok(group)
    }

    pub async fn get_group(&self, group_id: i64) -> Result<Option<Group>> {
        self.group_repository.find_by_id(group_id).await
    }

    pub async fn get_members(&self, group_id: i64) -> Result<Vec<GroupMember>> {
        self.group_repository.get_members(group_id).await
    }

    /// Update group settings. Owner or Admin.
    pub async fn update_group(
        &self,
        requester_id: i64,
        group_id: i64,
        request: UpdateGroupRequest,
    ) -> Result<Group> {
        self.require(group_id, requester_id, GroupAction::UpdateGroupSettings)
            .await?;
        let group = self.group_repository.update(group_id, request).await?;
        log_group_event(group_id, "group_updated", Some(requester_id));
        Ok(group)
    }

    /// Delete a group with its membership. Owner only.
    pub async fn delete_group(&self, requester_id: i64, group_id: i64) -> Result<()> {
        self.require(group_id, requester_id, GroupAction::DeleteGroup)
            .await?;
        self.group_repository.delete(group_id).await?;
        log_group_event(group_id, "group_deleted", Some(requester_id));
        Ok(())
    }

    /// Add a member. Owner or Admin; a second Owner can never be added.
    pub async fn add_member(&self, requester_id: i64, request: AddMemberRequest) -> Result<GroupMember> {
        self.require(request.group_id, requester_id, GroupAction::AddMember)
            .await?;

        if request.role == Some(GroupRole::Owner) {
            return Err(TaskBuddyError::InvalidInput(
                "a group has exactly one owner; transfer ownership instead".to_string(),
            ));
        }

        let member = self.group_repository.add_member(request).await?;
        log_group_event(member.group_id, "member_added", Some(requester_id));
        Ok(member)
    }

    /// Remove a member, subject to the removal matrix: the Owner is never
    /// removable, the Owner may remove anyone else, Admins may remove only
    /// plain Members.
    pub async fn remove_member(&self, requester_id: i64, group_id: i64, target_id: i64) -> Result<()> {
        let requester_role = self.member_role(group_id, requester_id).await?;
        let target_role = self.member_role(group_id, target_id).await?;

        let group = self
            .group_repository
            .find_by_id(group_id)
            .await?
            .ok_or(TaskBuddyError::GroupNotFound { group_id })?;
        let target_is_owner = group.owner_id == target_id;

        if !can_remove_member(requester_role, target_role, target_is_owner) {
            return Err(TaskBuddyError::PermissionDenied(format!(
                "role {} may not remove a {} from group {}",
                requester_role, target_role, group_id
            )));
        }

        self.group_repository.remove_member(group_id, target_id).await?;
        log_group_event(group_id, "member_removed", Some(requester_id));
        Ok(())
    }

    /// Change a member's role. Owner only; demoting the sole Owner is
    /// rejected, as is promoting a second Owner.
    pub async fn change_role(
        &self,
        requester_id: i64,
        group_id: i64,
        target_id: i64,
        new_role: GroupRole,
    ) -> Result<GroupMember> {
        self.require(group_id, requester_id, GroupAction::ChangeRole)
            .await?;

        let group = self
            .group_repository
            .find_by_id(group_id)
            .await?
            .ok_or(TaskBuddyError::GroupNotFound { group_id })?;

        if group.owner_id == target_id {
            return Err(TaskBuddyError::InvalidInput(
                "the sole owner cannot be demoted; transfer ownership instead".to_string(),
            ));
        }
        if new_role == GroupRole::Owner {
            return Err(TaskBuddyError::InvalidInput(
                "a group has exactly one owner; transfer ownership instead".to_string(),
            ));
        }

        let member = self
            .group_repository
            .update_member_role(group_id, target_id, new_role)
            .await?;
        log_group_event(group_id, "role_changed", Some(requester_id));
        Ok(member)
    }

    /// Hand ownership to another member. The previous Owner stays in the
    /// group as an Admin, keeping exactly one Owner at all times.
    pub async fn transfer_ownership(
        &self,
        requester_id: i64,
        group_id: i64,
        new_owner_id: i64,
    ) -> Result<Group> {
        let group = self
            .group_repository
            .find_by_id(group_id)
            .await?
            .ok_or(TaskBuddyError::GroupNotFound { group_id })?;

        if group.owner_id != requester_id {
            return Err(TaskBuddyError::PermissionDenied(format!(
                "only the owner may transfer ownership of group {}",
                group_id
            )));
        }

        // single repository call: the role swap and the owner pointer move
        // together, so a racing removal cannot leave the group ownerless
        let group = self
            .group_repository
            .transfer_ownership(group_id, requester_id, new_owner_id)
            .await?;

        info!(group_id = group_id, old_owner = requester_id, new_owner = new_owner_id, "Ownership transferred");
        Ok(group)
    }

    /// Leave a group voluntarily. The Owner is refused and must transfer
    /// ownership first.
    pub async fn leave_group(&self, requester_id: i64, group_id: i64) -> Result<()> {
        let role = self.member_role(group_id, requester_id).await?;

        if !can_leave_group(role) {
            return Err(TaskBuddyError::PermissionDenied(format!(
                "the owner must transfer ownership before leaving group {}",
                group_id
            )));
        }

        self.group_repository.remove_member(group_id, requester_id).await?;
        log_group_event(group_id, "member_left", Some(requester_id));
        Ok(())
    }

    async fn require(&self, group_id: i64, requester_id: i64, action: GroupAction) -> Result<()> {
        let role = self.member_role(group_id, requester_id).await?;
        if !role_allows(role, action) {
            log_permission_denied(requester_id, &format!("{:?}", action), &format!("group {}", group_id));
            return Err(TaskBuddyError::PermissionDenied(format!(
                "role {} may not perform {:?} in group {}",
                role, action, group_id
            )));
        }
        Ok(())
    }

    async fn member_role(&self, group_id: i64, user_id: i64) -> Result<GroupRole> {
        self.group_repository
            .role_of(group_id, user_id)
            .await?
            .ok_or(TaskBuddyError::MemberNotFound { group_id, user_id })
    }
}
