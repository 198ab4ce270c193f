//! Role-based capability checks
//!
//! Pure predicates mapping a group role to the mutations it may perform.
//! Every mutating operation on group-owned templates, tasks and membership
//! consults these before touching storage. The checks carry no per-group
//! state; member-removal is the one rule that also needs to know who the
//! target is.

use crate::permissions::roles::GroupRole;

/// Mutations on group-owned resources that require a capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupAction {
    UpdateGroupSettings,
    DeleteGroup,
    AddMember,
    ChangeRole,
    CreateTask,
    UpdateTask,
    DeleteTask,
    CreateTemplate,
    UpdateTemplate,
    DeleteTemplate,
}

/// Capability table keyed by role and action.
///
/// Owner and Admin share all group-management and template-management
/// rights except role changes and group deletion, which stay Owner-only.
/// Plain members may create and update tasks, nothing else.
pub fn role_allows(role: GroupRole, action: GroupAction) -> bool {
    use GroupAction::*;

    match role {
        GroupRole::Owner => true,
        GroupRole::Admin => !matches!(action, DeleteGroup | ChangeRole),
        GroupRole::Member => matches!(action, CreateTask | UpdateTask),
    }
}

/// Whether `requester` may remove a member holding `target` role.
///
/// The Owner can never be removed by anyone; the Owner may remove Admins
/// and Members; an Admin may remove only Members; a Member removes no one.
pub fn can_remove_member(requester: GroupRole, target: GroupRole, target_is_owner: bool) -> bool {
    if target_is_owner {
        return false;
    }
    match requester {
        GroupRole::Owner => true,
        GroupRole::Admin => target == GroupRole::Member,
        GroupRole::Member => false,
    }
}

/// Whether a member holding `role` may voluntarily leave the group.
///
/// The Owner must transfer ownership first.
pub fn can_leave_group(role: GroupRole) -> bool {
    role != GroupRole::Owner
}

#[cfg(test)]
mod tests {
    use super::*;
    use GroupAction::*;
    use GroupRole::*;

    const ALL_ACTIONS: [GroupAction; 10] = [
        UpdateGroupSettings,
        DeleteGroup,
        AddMember,
        ChangeRole,
        CreateTask,
        UpdateTask,
        DeleteTask,
        CreateTemplate,
        UpdateTemplate,
        DeleteTemplate,
    ];

    #[test]
    fn test_owner_allows_every_action() {
        for action in ALL_ACTIONS {
            assert!(role_allows(Owner, action), "owner denied {:?}", action);
        }
    }

    #[test]
    fn test_admin_denied_only_owner_actions() {
        for action in ALL_ACTIONS {
            let expected = !matches!(action, DeleteGroup | ChangeRole);
            assert_eq!(role_allows(Admin, action), expected, "admin on {:?}", action);
        }
    }

    #[test]
    fn test_member_allowed_only_task_create_and_update() {
        for action in ALL_ACTIONS {
            let expected = matches!(action, CreateTask | UpdateTask);
            assert_eq!(role_allows(Member, action), expected, "member on {:?}", action);
        }
    }

    #[test]
    fn test_owner_is_never_removable() {
        for requester in [Owner, Admin, Member] {
            assert!(!can_remove_member(requester, Owner, true));
        }
    }

    #[test]
    fn test_owner_removes_admins_and_members() {
        assert!(can_remove_member(Owner, Admin, false));
        assert!(can_remove_member(Owner, Member, false));
    }

    #[test]
    fn test_admin_removes_only_members() {
        assert!(can_remove_member(Admin, Member, false));
        assert!(!can_remove_member(Admin, Admin, false));
    }

    #[test]
    fn test_member_removes_no_one() {
        assert!(!can_remove_member(Member, Member, false));
        assert!(!can_remove_member(Member, Admin, false));
    }

    #[test]
    fn test_only_owner_cannot_leave() {
        assert!(!can_leave_group(Owner));
        assert!(can_leave_group(Admin));
        assert!(can_leave_group(Member));
    }
}
