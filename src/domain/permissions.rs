use thiserror::Error;

use super::{Member, Project, Role, UserId};

/// Project-scoped action requiring an authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    ViewProject,
    ManageTasks,
    UpdateProject,
    DeleteProject,
    ManageInvitations,
    ManageRequests,
    ManageMembers,
}

impl ProjectAction {
    fn required_role(&self) -> Role {
        match self {
            ProjectAction::ViewProject => Role::Member,
            ProjectAction::DeleteProject => Role::Owner,
            ProjectAction::ManageTasks
            | ProjectAction::UpdateProject
            | ProjectAction::ManageInvitations
            | ProjectAction::ManageRequests
            | ProjectAction::ManageMembers => Role::Admin,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PermissionError {
    #[error("Not a member of this project")]
    NotAMember,
    #[error("Insufficient role for this action")]
    InsufficientRole,
    #[error("The project owner's membership cannot be modified")]
    OwnerImmutable,
    #[error("Members cannot remove themselves; leave the project instead")]
    SelfRemoval,
    #[error("The project owner cannot leave the project")]
    OwnerCannotLeave,
}

/// Allow/deny for a project-scoped action. `role` is the actor's membership
/// role, or `None` when the actor is not a member. Viewing a public project
/// is the only action open to non-members.
pub fn check_project_action(
    project: &Project,
    role: Option<Role>,
    action: ProjectAction,
) -> Result<(), PermissionError> {
    if action == ProjectAction::ViewProject && project.is_public {
        return Ok(());
    }

    let role = role.ok_or(PermissionError::NotAMember)?;
    if role >= action.required_role() {
        Ok(())
    } else {
        Err(PermissionError::InsufficientRole)
    }
}

/// The OWNER role is immutable in both directions: nobody is promoted to
/// OWNER and the owner's role is never changed (no ownership transfer
/// exists). OWNER and ADMIN may move any other member between MEMBER and
/// ADMIN.
pub fn check_role_change(
    actor: &Member,
    target: &Member,
    new_role: Role,
) -> Result<(), PermissionError> {
    if new_role == Role::Owner || target.role == Role::Owner {
        return Err(PermissionError::OwnerImmutable);
    }

    match actor.role {
        Role::Owner | Role::Admin => Ok(()),
        Role::Member => Err(PermissionError::InsufficientRole),
    }
}

/// The OWNER is never removable. Self-removal must go through the leave
/// flow. OWNER removes any non-owner; ADMIN removes MEMBERs only.
pub fn check_member_removal(
    actor: &Member,
    target: &Member,
) -> Result<(), PermissionError> {
    if target.role == Role::Owner {
        return Err(PermissionError::OwnerImmutable);
    }
    if actor.member_id == target.member_id {
        return Err(PermissionError::SelfRemoval);
    }

    match actor.role {
        Role::Owner => Ok(()),
        Role::Admin if target.role == Role::Member => Ok(()),
        _ => Err(PermissionError::InsufficientRole),
    }
}

pub fn check_leave(
    project: &Project,
    user_id: &UserId,
) -> Result<(), PermissionError> {
    if &project.owner_id == user_id {
        return Err(PermissionError::OwnerCannotLeave);
    }
    Ok(())
}
