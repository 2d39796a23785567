use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    domain::{
        check_role_change, MemberId, PermissionError, ProjectAPIError,
        ProjectAction, ProjectId, ProjectStoreError, Role,
    },
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

#[tracing::instrument(name = "Update member role route handler", skip_all)]
pub async fn update_member_role(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<UpdateMemberRoleRequest>,
) -> Result<(StatusCode, CookieJar, Json<UpdateMemberRoleResponse>), ProjectAPIError>
{
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::parse(&request.project_id)?;
    let member_id = MemberId::parse(&request.member_id)?;
    let new_role = Role::from_str(&request.role)?;

    let (_project, membership) = require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ManageMembers,
    )
    .await?;
    let actor = membership.ok_or(ProjectAPIError::ForbiddenError(
        PermissionError::NotAMember.to_string(),
    ))?;

    let target = state
        .project_store
        .read()
        .await
        .get_member_by_id(&project_id, &member_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::MemberNotFound => {
                ProjectAPIError::IDNotFoundError(*member_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    check_role_change(&actor, &target, new_role)
        .map_err(|e| ProjectAPIError::ForbiddenError(e.to_string()))?;

    // A concurrent removal may have deleted the member since the lookup;
    // surfacing the store's not-found is the accepted race outcome.
    state
        .project_store
        .write()
        .await
        .update_member_role(&project_id, &member_id, new_role)
        .await
        .map_err(|e| match e {
            ProjectStoreError::MemberNotFound => {
                ProjectAPIError::IDNotFoundError(*member_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(UpdateMemberRoleResponse {
        project_id: project_id.as_ref().to_string(),
        member_id: member_id.as_ref().to_string(),
        role: new_role,
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateMemberRoleRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "memberId")]
    pub member_id: String,
    pub role: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberRoleResponse {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "memberId")]
    pub member_id: String,
    pub role: Role,
}
