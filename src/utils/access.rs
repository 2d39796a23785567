use color_eyre::eyre::eyre;

use crate::{
    app_state::ProjectStoreType,
    domain::{
        check_project_action, AuthAPIError, Member, Project, ProjectAPIError,
        ProjectAction, ProjectId, ProjectStoreError, UserId,
    },
};

use super::auth::SessionClaims;

/// Ordered checks shared by every project-scoped handler: the project must
/// exist (a 404 is revealed before membership is consulted), then the
/// caller's membership is looked up and judged against the requested
/// action.
#[tracing::instrument(name = "Check user access to project", skip_all)]
pub async fn require_project_access(
    project_store: &ProjectStoreType,
    user_id: &UserId,
    project_id: &ProjectId,
    action: ProjectAction,
) -> Result<(Project, Option<Member>), ProjectAPIError> {
    let store = project_store.read().await;

    let project =
        store.get_project(project_id).await.map_err(|e| match e {
            ProjectStoreError::ProjectIDNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let membership = store
        .get_member(project_id, user_id)
        .await
        .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

    check_project_action(
        &project,
        membership.as_ref().map(|m| m.role),
        action,
    )
    .map_err(|e| ProjectAPIError::ForbiddenError(e.to_string()))?;

    Ok((project, membership))
}

/// Requests that act on behalf of a user carry the user's ID in the body;
/// it must match the authenticated session (rejects parameter tampering).
pub fn require_identity_match(
    claims: &SessionClaims,
    supplied_user_id: &str,
) -> Result<UserId, ProjectAPIError> {
    match UserId::parse(supplied_user_id) {
        Ok(user_id) if user_id == claims.id => Ok(user_id),
        _ => Err(ProjectAPIError::AuthenticationError(
            AuthAPIError::IncorrectCredentials,
        )),
    }
}
