use super::{
    Email, InvitationCode, Member, MemberId, MembershipRequest, Password,
    Project, ProjectId, RequestId, Role, Task, TaskId, User, UserId,
};
use color_eyre::eyre::{Report, Result};
use secrecy::Secret;
use thiserror::Error;

#[async_trait::async_trait]
pub trait UserStore {
    async fn add_user(&mut self, user: User) -> Result<(), UserStoreError>;
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn validate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<(), UserStoreError>;
    async fn delete_user(
        &mut self,
        email: &Email,
    ) -> Result<(), UserStoreError>;
}

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::InvalidCredentials, Self::InvalidCredentials)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait BannedTokenStore {
    async fn add_token(&mut self, token: &Secret<String>) -> Result<()>;
    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError>;
}

#[derive(Debug, Error)]
pub enum BannedTokenStoreError {
    #[error("Token is banned")]
    BannedToken,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for BannedTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::BannedToken, Self::BannedToken)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Authoritative store for projects and everything scoped to them:
/// memberships, tasks, invitation codes and membership requests.
///
/// All membership mutations go through these operations; uniqueness of the
/// (project, user) member pair and of the PENDING request per pair is
/// enforced here, and `approve_membership_request` performs the status flip
/// and the member insertion as one atomic unit.
#[async_trait::async_trait]
pub trait ProjectStore {
    // Projects
    async fn add_project(
        &mut self,
        project: &Project,
        owner: &Member,
    ) -> Result<(), ProjectStoreError>;
    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError>;
    async fn get_projects_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Project>, ProjectStoreError>;
    async fn update_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError>;
    async fn delete_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), ProjectStoreError>;

    // Members
    async fn get_member(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<Option<Member>, ProjectStoreError>;
    async fn get_member_by_id(
        &self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<Member, ProjectStoreError>;
    async fn get_members(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Member>, ProjectStoreError>;
    async fn add_member(
        &mut self,
        member: &Member,
    ) -> Result<(), ProjectStoreError>;
    async fn update_member_role(
        &mut self,
        project_id: &ProjectId,
        member_id: &MemberId,
        role: Role,
    ) -> Result<(), ProjectStoreError>;
    async fn remove_member(
        &mut self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<(), ProjectStoreError>;
    async fn remove_member_by_user(
        &mut self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<(), ProjectStoreError>;
    async fn remove_user_memberships(
        &mut self,
        user_id: &UserId,
    ) -> Result<(), ProjectStoreError>;

    // Invitation codes
    async fn upsert_invitation_code(
        &mut self,
        invitation: &InvitationCode,
    ) -> Result<(), ProjectStoreError>;
    async fn get_invitation_code(
        &self,
        project_id: &ProjectId,
    ) -> Result<InvitationCode, ProjectStoreError>;

    // Membership requests
    async fn add_membership_request(
        &mut self,
        request: &MembershipRequest,
    ) -> Result<(), ProjectStoreError>;
    async fn get_membership_request(
        &self,
        request_id: &RequestId,
    ) -> Result<MembershipRequest, ProjectStoreError>;
    async fn get_membership_requests(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<MembershipRequest>, ProjectStoreError>;
    async fn approve_membership_request(
        &mut self,
        request_id: &RequestId,
        member: &Member,
    ) -> Result<(), ProjectStoreError>;
    async fn reject_membership_request(
        &mut self,
        request_id: &RequestId,
    ) -> Result<(), ProjectStoreError>;

    // Tasks
    async fn add_task(&mut self, task: &Task)
        -> Result<(), ProjectStoreError>;
    async fn get_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> Result<Task, ProjectStoreError>;
    async fn get_tasks(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Task>, ProjectStoreError>;
    async fn update_task(
        &mut self,
        task: &Task,
    ) -> Result<(), ProjectStoreError>;
    async fn delete_task(
        &mut self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> Result<(), ProjectStoreError>;

    // Account deletion
    async fn delete_projects_owned_by(
        &mut self,
        user_id: &UserId,
    ) -> Result<(), ProjectStoreError>;
}

#[derive(Debug, Error)]
pub enum ProjectStoreError {
    #[error("Project ID not found")]
    ProjectIDNotFound,
    #[error("Member not found")]
    MemberNotFound,
    #[error("Member already exists for this project and user")]
    MemberExists,
    #[error("Task ID not found")]
    TaskIDNotFound,
    #[error("No invitation code for this project")]
    InvitationCodeNotFound,
    #[error("Request ID not found")]
    RequestIDNotFound,
    #[error("A pending request already exists for this project and user")]
    PendingRequestExists,
    #[error("Request has already been processed")]
    RequestAlreadyProcessed,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ProjectStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ProjectIDNotFound, Self::ProjectIDNotFound)
                | (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::MemberExists, Self::MemberExists)
                | (Self::TaskIDNotFound, Self::TaskIDNotFound)
                | (
                    Self::InvitationCodeNotFound,
                    Self::InvitationCodeNotFound
                )
                | (Self::RequestIDNotFound, Self::RequestIDNotFound)
                | (Self::PendingRequestExists, Self::PendingRequestExists)
                | (
                    Self::RequestAlreadyProcessed,
                    Self::RequestAlreadyProcessed
                )
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
